mod cli;
mod render;
mod server;
mod source;

use std::{env, future, net::SocketAddr};

use anyhow::{Context, Result};
use chrono::Local;
use eventgrid::{DayDetail, DisplayedMonth, Event, MonthView};
use log::{error, info};
use tokio::{net::TcpListener, signal};

use crate::cli::Command;

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "eventgrid=info,eventgrid_server=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let args = cli::parse(env::args().skip(1).collect());
    let events = source::load_events_or_default(&args.events).await;
    let today = Local::now().date_naive();

    match args.command {
        Command::Serve => serve(args.address, events).await?,
        Command::Show(month) => {
            let month = month.unwrap_or_else(|| DisplayedMonth::containing(today));
            let view = MonthView::build(month, &events, Some(today));
            println!("{}", render::month(&view, args.color));
        }
        Command::Day(date) => {
            println!("{}", render::day(&DayDetail::build(date, &events), args.color));
        }
    }

    Ok(())
}

async fn serve(addr: SocketAddr, events: Vec<Event>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening at http://{addr}{}", server::CALENDAR_PATH);

    axum::serve(listener, server::router(events))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(err) => {
            error!("Failed to listen for ctrl-c, running until killed: {err}");
            future::pending::<()>().await;
        }
    }
}

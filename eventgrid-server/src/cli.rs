use std::env;
use std::io::{self, IsTerminal};
use std::net::SocketAddr;
use std::process;

use chrono::NaiveDate;
use eventgrid::month::parse_day;
use eventgrid::DisplayedMonth;
use getopts::{Matches, Options};

use crate::source::EventSource;

const ADDRESS_ENV: &str = "EVENTGRID_ADDR";
const EVENTS_ENV: &str = "EVENTGRID_EVENTS";
const DEFAULT_EVENTS: &str = "config.json";

pub enum Command {
    Serve,
    Show(Option<DisplayedMonth>),
    Day(NaiveDate),
}

pub struct Args {
    pub command: Command,
    pub address: SocketAddr,
    pub events: EventSource,
    pub color: bool,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: 127.0.0.1:8080, env: EVENTGRID_ADDR]",
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "e",
        "events",
        "JSON event list, a file path or an http(s) URL [Default: config.json, env: EVENTGRID_EVENTS]",
        "PATH_OR_URL",
    );
    opts.optflag("", "no-color", "Disable colors when printing to a terminal");
    opts
}

fn usage(opts: &Options) -> String {
    let brief = format!(
        "Usage: {} [options] [serve | show [YYYY-MM] | day YYYY-MM-DD]",
        env!("CARGO_PKG_NAME")
    );
    opts.usage(&brief)
}

fn fail(message: impl AsRef<str>) -> ! {
    eprintln!("{}", message.as_ref());
    process::exit(1);
}

fn option_or_env(matches: &Matches, name: &str, var: &str) -> Option<String> {
    matches.opt_str(name).or_else(|| env::var(var).ok())
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(err) => fail(err.to_string()),
    };

    if matches.opt_present("help") {
        println!("{}", usage(&opts));
        process::exit(0);
    }

    let address = match option_or_env(&matches, "address", ADDRESS_ENV) {
        None => SocketAddr::from(([127, 0, 0, 1], 8080)),
        Some(value) => match value.parse::<SocketAddr>() {
            Ok(address) => address,
            Err(err) => fail(format!("Provided value for option 'address' is invalid: {err}")),
        },
    };

    let events = option_or_env(&matches, "events", EVENTS_ENV)
        .map_or_else(|| EventSource::from(DEFAULT_EVENTS), EventSource::from);

    let color = !matches.opt_present("no-color") && io::stdout().is_terminal();

    let command = match parse_command(&matches.free) {
        Ok(command) => command,
        Err(err) => fail(format!("{err}\n\n{}", usage(&opts))),
    };

    Args {
        command,
        address,
        events,
        color,
    }
}

fn parse_command(free: &[String]) -> Result<Command, String> {
    let mut free = free.iter().map(String::as_str);

    let command = match free.next() {
        None | Some("serve") => Command::Serve,
        Some("show") => Command::Show(
            free.next()
                .map(str::parse::<DisplayedMonth>)
                .transpose()
                .map_err(|err| err.to_string())?,
        ),
        Some("day") => {
            let date = free.next().ok_or("Missing date for 'day', expected YYYY-MM-DD")?;
            Command::Day(parse_day(date).map_err(|err| err.to_string())?)
        }
        Some(other) => return Err(format!("Unknown command '{other}'")),
    };

    match free.next() {
        Some(extra) => Err(format!("Unexpected argument '{extra}'")),
        None => Ok(command),
    }
}

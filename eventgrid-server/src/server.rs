use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use eventgrid::month::parse_day;
use eventgrid::{DayDetail, DisplayedMonth, Event, MonthView};
use log::debug;
use serde::Deserialize;

use crate::render;

type Events = Arc<Vec<Event>>;

pub const CALENDAR_PATH: &str = "/calendar";
pub const DAY_PATH: &str = "/calendar/day";
pub const EVENTS_PATH: &str = "/calendar/events";

const ICS_CONTENT_TYPE: &str = "text/calendar";

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Format {
    #[default]
    Text,
    Json,
    Ics,
}

#[derive(Deserialize)]
struct MonthQuery {
    month: Option<String>,
    #[serde(default)]
    format: Format,
}

#[derive(Deserialize)]
struct DayQuery {
    date: String,
    #[serde(default)]
    format: Format,
}

pub fn router(events: Vec<Event>) -> Router {
    Router::new()
        .route(CALENDAR_PATH, get(handle_month))
        .route(DAY_PATH, get(handle_day))
        .route(EVENTS_PATH, get(handle_events))
        .fallback(|| async { Redirect::permanent(CALENDAR_PATH) })
        .with_state(Arc::new(events))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn bad_request(err: eventgrid::Error) -> Response {
    debug!("Rejecting request: {err}");
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}

async fn handle_month(State(events): State<Events>, Query(query): Query<MonthQuery>) -> Response {
    let today = today();

    let month = match query.month.as_deref().map(str::parse::<DisplayedMonth>).transpose() {
        Ok(month) => month.unwrap_or_else(|| DisplayedMonth::containing(today)),
        Err(err) => return bad_request(err),
    };

    match query.format {
        Format::Text => render::month(&MonthView::build(month, &events, Some(today)), false).into_response(),
        Format::Json => Json(MonthView::build(month, &events, Some(today))).into_response(),
        Format::Ics => (
            [("content-type", ICS_CONTENT_TYPE)],
            eventgrid::ics::month_calendar(month, &events).to_string(),
        )
            .into_response(),
    }
}

async fn handle_day(State(events): State<Events>, Query(query): Query<DayQuery>) -> Response {
    let date = match parse_day(&query.date) {
        Ok(date) => date,
        Err(err) => return bad_request(err),
    };

    let detail = DayDetail::build(date, &events);

    match query.format {
        Format::Text => render::day(&detail, false).into_response(),
        Format::Json => Json(detail).into_response(),
        Format::Ics => (
            [("content-type", ICS_CONTENT_TYPE)],
            eventgrid::ics::to_ics(detail.label.clone(), detail.events.iter().map(|annotated| annotated.event))
                .to_string(),
        )
            .into_response(),
    }
}

async fn handle_events(State(events): State<Events>) -> Response {
    Json(events.as_ref()).into_response()
}

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use eventgrid::{parse_events, Event};
use log::{error, info};
use tokio::fs;

/// Where the static event list lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    File(PathBuf),
    Url(String),
}

impl From<&str> for EventSource {
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            EventSource::Url(value.to_string())
        } else {
            EventSource::File(PathBuf::from(value))
        }
    }
}

impl From<String> for EventSource {
    fn from(value: String) -> Self {
        EventSource::from(value.as_str())
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSource::File(path) => write!(f, "{}", path.display()),
            EventSource::Url(url) => f.write_str(url),
        }
    }
}

/// Reads the event list once. No retry.
pub async fn load_events(source: &EventSource) -> Result<Vec<Event>> {
    let body = match source {
        EventSource::File(path) => fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        EventSource::Url(url) => reqwest::get(url)
            .await
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("Failed to fetch {url}"))?
            .text()
            .await
            .with_context(|| format!("Failed to read response body of {url}"))?,
    };

    parse_events(body).with_context(|| format!("Failed to parse events from {source}"))
}

/// [`load_events`], falling back to an empty list so the calendar still renders.
pub async fn load_events_or_default(source: &EventSource) -> Vec<Event> {
    match load_events(source).await {
        Ok(events) => {
            info!("Loaded {} events from {source}", events.len());
            events
        }
        Err(err) => {
            error!("Failed to load events, showing an empty calendar: {err:#}");
            Vec::new()
        }
    }
}

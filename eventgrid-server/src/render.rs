//! Plain text rendering of the month grid and the day detail.
//!
//! The same text is served over HTTP and printed by the `show`/`day`
//! commands; colors are only added for terminals.

use eventgrid::view::PREVIEW_LIMIT;
use eventgrid::{DayCell, DayDetail, EventWithConflict, MonthView};
use owo_colors::OwoColorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CELL_WIDTH: usize = 14;

/// Day number, the preview chips and the overflow marker.
const CELL_HEIGHT: usize = PREVIEW_LIMIT + 2;

pub fn month(view: &MonthView<'_>, color: bool) -> String {
    let separator = format!("+{}", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(7));

    let mut lines = vec![
        paint_bold(&view.label, color),
        format!("< {}   today   {} >", view.prev, view.next),
        separator.clone(),
        row(view.weekdays.iter().map(|weekday| fit(weekday))),
        separator.clone(),
    ];

    for week in view.weeks() {
        let cells = week.iter().map(|cell| cell_lines(cell, color)).collect::<Vec<_>>();

        for line in 0..CELL_HEIGHT {
            let padding = (cells.len()..7).map(|_| blank());
            lines.push(row(cells.iter().map(|cell| cell[line].clone()).chain(padding)));
        }
        lines.push(separator.clone());
    }

    lines.join("\n")
}

pub fn day(detail: &DayDetail<'_>, color: bool) -> String {
    let mut lines = vec![paint_bold(&detail.label, color)];

    if detail.events.is_empty() {
        lines.push("  No events".to_string());
    }

    for annotated in &detail.events {
        let event = annotated.event;
        let mut line = format!("  {}  {}", event.time_range(), event.title);

        if annotated.has_conflict {
            let warning = format!(
                "  ! overlaps {} other {}",
                annotated.conflict_level,
                pluralize("event", annotated.conflict_level)
            );
            line.push_str(&if color { warning.red().to_string() } else { warning });
        }

        lines.push(line);
    }

    lines.join("\n")
}

fn row(cells: impl Iterator<Item = String>) -> String {
    cells.fold(String::from("|"), |mut line, cell| {
        line.push_str(&cell);
        line.push('|');
        line
    })
}

fn cell_lines(cell: &DayCell<'_>, color: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(CELL_HEIGHT);

    if let Some(day) = cell.day {
        let label = if cell.is_today {
            fit(&format!("[{day}]"))
        } else {
            fit(&day.to_string())
        };
        lines.push(if color && cell.is_today {
            label.reversed().to_string()
        } else {
            label
        });

        lines.extend(cell.events.iter().map(|annotated| chip(annotated, color)));

        if cell.overflow > 0 {
            lines.push(fit(&format!("… +{}", cell.overflow)));
        }
    }

    lines.resize_with(CELL_HEIGHT, blank);
    lines
}

fn chip(annotated: &EventWithConflict<'_>, color: bool) -> String {
    let marker = if annotated.has_conflict { '!' } else { '·' };
    let text = fit(&format!("{marker} {}", annotated.event.title));

    if !color {
        return text;
    }

    match hex_rgb(&annotated.event.color) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text,
    }
}

/// Clips to the cell width in terminal columns with a trailing ellipsis and
/// pads with spaces. Wide characters count as two columns.
fn fit(text: &str) -> String {
    if text.width() <= CELL_WIDTH {
        return format!("{text}{}", " ".repeat(CELL_WIDTH - text.width()));
    }

    let mut clipped = String::new();
    let mut width = 0;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > CELL_WIDTH - 1 {
            break;
        }
        clipped.push(c);
        width += char_width;
    }
    clipped.push('…');

    format!("{clipped}{}", " ".repeat(CELL_WIDTH - 1 - width))
}

fn blank() -> String {
    " ".repeat(CELL_WIDTH)
}

fn paint_bold(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// `#rrggbb` to its channels. Other CSS color forms are left unpainted.
fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

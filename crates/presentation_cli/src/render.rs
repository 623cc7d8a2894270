//! Console rendering of the map scene and the panel

use std::fmt::Write as _;

use application::{ItineraryView, PanelState};
use domain::{PointRole, StopMarker};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Turn itinerary markup into console text
///
/// `<b>` becomes bold; every other tag is dropped.
pub fn console_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    let mut bold = false;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            rest = &rest[open..];
            break;
        };
        match rest[open + 1..open + close].trim().to_ascii_lowercase().as_str() {
            "b" | "strong" => {
                out.push_str(BOLD);
                bold = true;
            },
            "/b" | "/strong" => {
                out.push_str(RESET);
                bold = false;
            },
            _ => {},
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    if bold {
        out.push_str(RESET);
    }
    out
}

fn itinerary_text(view: &ItineraryView, out: &mut String) {
    let _ = writeln!(out, "Itinerary: {}", view.headline());
    for (index, entry) in view.entries.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. [{}] {}", index + 1, entry.kind, entry.desc);
        if !entry.sub.is_empty() {
            let _ = writeln!(out, "        {}", console_markup(&entry.sub));
        }
    }
}

/// Text of the panel below the map
pub fn panel_text(panel: &PanelState) -> String {
    let mut out = String::new();

    for role in PointRole::ALL {
        let marker = if panel.armed == Some(role) { ">" } else { " " };
        let status = panel.status(role).unwrap_or("not set");
        let _ = writeln!(out, "{marker} {:<5}  {status}", role.label());
    }

    let _ = writeln!(out, "  time   {}", panel.time);
    let button = if panel.find_button.enabled {
        "enabled"
    } else {
        "disabled"
    };
    let _ = writeln!(out, "  [{}] ({button})", panel.find_button.label);
    let overlay = if panel.overlay_active { "on" } else { "off" };
    let _ = writeln!(out, "  bus network overlay: {overlay}");

    if let Some(notice) = &panel.notice {
        let _ = writeln!(out, "⚠️  {}", notice.text());
    }
    if let Some(view) = &panel.itinerary {
        itinerary_text(view, &mut out);
    }
    out
}

/// One line per stop
pub fn stops_text(stops: &[StopMarker]) -> String {
    let mut out = String::new();
    for stop in stops {
        let id = stop.id.as_deref().unwrap_or("-");
        let _ = writeln!(out, "{id:>6}  {}  {}", stop.position, stop.label());
    }
    let _ = write!(out, "{} stops", stops.len());
    out
}

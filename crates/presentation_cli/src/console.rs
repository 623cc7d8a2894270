//! Interactive console commands

use domain::{GeoPoint, PointRole};

/// Shown by `help`
pub const HELP: &str = "\
Commands:
  start              pick the start point with the next click
  end                pick the end point with the next click
  click <lat> <lon>  click the map at a coordinate
  time <HH:MM>       set the departure time
  find               find a route between the picked points
  overlay            show or hide the bus stop network
  show               print the map and panel
  help               print this help
  quit               leave";

/// One line of console input
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Pick(PointRole),
    Click(GeoPoint),
    /// Raw time text, validated by the controller
    Time(String),
    Find,
    Overlay,
    Show,
    Help,
    Quit,
    Empty,
}

/// Parse one input line
pub fn parse(line: &str) -> Result<ConsoleCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ConsoleCommand::Empty);
    };
    let rest: Vec<&str> = words.collect();

    let command = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("start", []) => ConsoleCommand::Pick(PointRole::Start),
        ("end", []) => ConsoleCommand::Pick(PointRole::End),
        ("click", [pair]) => ConsoleCommand::Click(parse_lat_lon(pair)?),
        ("click", [lat, lon]) => ConsoleCommand::Click(parse_point(lat, lon)?),
        ("time", [value]) => ConsoleCommand::Time((*value).to_string()),
        ("find", []) => ConsoleCommand::Find,
        ("overlay", []) => ConsoleCommand::Overlay,
        ("show", []) => ConsoleCommand::Show,
        ("help" | "?", []) => ConsoleCommand::Help,
        ("quit" | "exit", []) => ConsoleCommand::Quit,
        ("click", _) => return Err("usage: click <lat> <lon>".to_string()),
        ("time", _) => return Err("usage: time <HH:MM>".to_string()),
        (other, _) => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(command)
}

/// Parse `LAT,LON`
pub fn parse_lat_lon(input: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{input}'"))?;
    parse_point(lat, lon)
}

fn parse_point(lat: &str, lon: &str) -> Result<GeoPoint, String> {
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    GeoPoint::new(lat, lon).map_err(|e| e.to_string())
}

//! BusMap CLI
//!
//! Console client for the BusMap routing service: pick a start and an end
//! point on the map, choose a departure time, and get a bus itinerary.

#![allow(clippy::print_stdout)]

mod console;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::{
    ApplicationError, MapController, MapEvent, RouteTicket, RoutingPort, fetch_stops,
};
use clap::{Parser, Subcommand};
use domain::{GeoPoint, PointRole, RouteOutcome, StopMarker, TimeOfDay};
use infrastructure::{AppConfig, RoutingAdapter, SceneSurface, init_logging};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::console::ConsoleCommand;

/// BusMap CLI
#[derive(Parser)]
#[command(name = "busmap")]
#[command(author, version, about = "Bus route finder for the BusMap routing service", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./busmap.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Routing service URL, overriding the configuration
    #[arg(short, long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive map session (default)
    Interactive,

    /// List every known bus stop
    Stops {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Find a route between two points
    ///
    /// Example: busmap route --from 21.03,105.85 --to 21.05,105.90 --time 08:30
    Route {
        /// Start point as LAT,LON
        #[arg(long, value_parser = console::parse_lat_lon, allow_hyphen_values = true)]
        from: GeoPoint,

        /// End point as LAT,LON
        #[arg(long, value_parser = console::parse_lat_lon, allow_hyphen_values = true)]
        to: GeoPoint,

        /// Departure time as HH:MM (default: now)
        #[arg(short, long)]
        time: Option<TimeOfDay>,
    },

    /// Check that the routing service answers
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

type RouteResult = Result<RouteOutcome, ApplicationError>;
type StopsResult = Result<Vec<StopMarker>, ApplicationError>;

/// A route request running on its own task
struct RouteTask {
    ticket: RouteTicket,
    handle: JoinHandle<RouteResult>,
}

fn join_error(e: &tokio::task::JoinError) -> ApplicationError {
    ApplicationError::Internal(format!("background task failed: {e}"))
}

/// Wait for the in-flight route request, or forever if there is none
async fn route_settled(task: &mut Option<RouteTask>) -> MapEvent {
    let Some(RouteTask { ticket, handle }) = task.as_mut() else {
        return std::future::pending().await;
    };
    let result = handle.await.unwrap_or_else(|e| Err(join_error(&e)));
    MapEvent::RouteSettled {
        ticket: *ticket,
        result,
    }
}

/// Wait for the startup stop fetch, or forever once it has been applied
async fn stops_loaded(task: &mut Option<JoinHandle<StopsResult>>) -> MapEvent {
    let Some(handle) = task.as_mut() else {
        return std::future::pending().await;
    };
    MapEvent::StopsLoaded(handle.await.unwrap_or_else(|e| Err(join_error(&e))))
}

fn show(controller: &MapController<SceneSurface>) {
    println!("{}", controller.surface());
    print!("{}", render::panel_text(&controller.panel()));
}

async fn run_interactive(
    config: &AppConfig,
    routing: &Arc<dyn RoutingPort>,
) -> anyhow::Result<()> {
    let surface = SceneSurface::from_config(&config.map)?;
    let mut controller = MapController::new(surface, config.style.clone());

    println!("BusMap ({}). Type 'help' for commands.", config.routing.base_url);
    show(&controller);

    run_session(BufReader::new(tokio::io::stdin()), &mut controller, routing).await?;
    info!("Session ended");
    Ok(())
}

/// Feed console lines to the controller until input ends or `quit`.
///
/// A route request still running at that point is awaited and shown before
/// returning.
async fn run_session<R>(
    input: R,
    controller: &mut MapController<SceneSurface>,
    routing: &Arc<dyn RoutingPort>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut stops_task: Option<JoinHandle<StopsResult>> = Some(tokio::spawn({
        let routing = Arc::clone(routing);
        async move { fetch_stops(routing.as_ref()).await }
    }));
    let mut route_task: Option<RouteTask> = None;

    let mut lines = input.lines();
    let mut input_open = true;
    while input_open || route_task.is_some() {
        tokio::select! {
            event = route_settled(&mut route_task), if route_task.is_some() => {
                route_task = None;
                controller.dispatch(event);
                show(controller);
            },
            event = stops_loaded(&mut stops_task), if stops_task.is_some() => {
                stops_task = None;
                controller.dispatch(event);
                debug!(stops = controller.overlay().stops().len(), "Stop overlay ready");
            },
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };

                let command = match console::parse(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{message}");
                        continue;
                    },
                };

                match command {
                    ConsoleCommand::Empty => continue,
                    ConsoleCommand::Quit => {
                        input_open = false;
                        continue;
                    },
                    ConsoleCommand::Help => {
                        println!("{}", console::HELP);
                        continue;
                    },
                    ConsoleCommand::Show => {},
                    ConsoleCommand::Pick(role) => {
                        controller.dispatch(MapEvent::PickArmed(role));
                    },
                    ConsoleCommand::Click(at) => {
                        controller.dispatch(MapEvent::MapClicked(at));
                    },
                    ConsoleCommand::Time(text) => {
                        if let Err(e) = controller.set_time_text(&text) {
                            println!("{e}");
                            continue;
                        }
                    },
                    ConsoleCommand::Overlay => {
                        controller.dispatch(MapEvent::OverlayToggled);
                    },
                    ConsoleCommand::Find => {
                        let Some(ticket) = controller.dispatch(MapEvent::RouteRequested) else {
                            println!("Pick a start and an end point first");
                            continue;
                        };
                        let routing = Arc::clone(routing);
                        let handle = tokio::spawn(async move {
                            routing.find_route(&ticket.request).await
                        });
                        route_task = Some(RouteTask { ticket, handle });
                    },
                }
                show(controller);
            },
        }
    }
    Ok(())
}

async fn run_stops(routing: &dyn RoutingPort, json: bool) -> anyhow::Result<()> {
    let stops = routing
        .list_stops()
        .await
        .context("Failed to fetch stops")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stops)?);
    } else {
        println!("{}", render::stops_text(&stops));
    }
    Ok(())
}

async fn run_route(
    config: &AppConfig,
    routing: &dyn RoutingPort,
    from: GeoPoint,
    to: GeoPoint,
    time: Option<TimeOfDay>,
) -> anyhow::Result<()> {
    let surface = SceneSurface::from_config(&config.map)?;
    let mut controller = MapController::new(surface, config.style.clone());
    if let Some(time) = time {
        controller = controller.with_time(time);
    }

    for (role, at) in [(PointRole::Start, from), (PointRole::End, to)] {
        controller.dispatch(MapEvent::PickArmed(role));
        controller.dispatch(MapEvent::MapClicked(at));
    }

    if controller.find_route(routing).await.is_none() {
        bail!("Route request was not issued");
    }

    show(&controller);
    let panel = controller.panel();
    if let Some(notice) = panel.notice {
        bail!("{}", notice.text());
    }
    Ok(())
}

async fn run_health(routing: &dyn RoutingPort, url: &str) -> anyhow::Result<()> {
    if !routing.is_available().await {
        bail!("Routing service at {url} is unreachable");
    }
    println!("Routing service at {url} is reachable");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.url {
        config.routing.base_url = url;
        config.routing.validate().map_err(anyhow::Error::msg)?;
    }
    if cli.verbose > 0 {
        config.log.level = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_logging(&config.log)?;

    let routing = Arc::new(RoutingAdapter::from_config(&config.routing)?);
    debug!(?routing, "Routing adapter ready");

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let routing: Arc<dyn RoutingPort> = routing;
            run_interactive(&config, &routing).await
        },
        Commands::Stops { json } => run_stops(routing.as_ref(), json).await,
        Commands::Route { from, to, time } => {
            run_route(&config, routing.as_ref(), from, to, time).await
        },
        Commands::Health => run_health(routing.as_ref(), &config.routing.base_url).await,
    }
}

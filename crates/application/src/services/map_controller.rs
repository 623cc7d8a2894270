//! Map controller
//!
//! The single application-state object of the client. It owns the map
//! surface and every piece of interaction state, and changes them only in
//! response to a [`MapEvent`]. Network calls are not made here: a
//! `RouteRequested` event hands back a [`RouteTicket`] which the caller
//! sends and later returns through `RouteSettled`.

use domain::{DomainError, PointRole, RouteOutcome, TimeOfDay};
use tracing::{debug, info, instrument, warn};

use super::{
    FindRouteControl, MarkerManager, NetworkOverlay, PointSelection, RouteRenderer, RouteStyle,
    fetch_stops,
};
use crate::error::ApplicationError;
use crate::events::{MapEvent, RouteTicket};
use crate::ports::{MapLayer, MapSurfacePort, RoutingPort};
use crate::view::{FindButton, ItineraryView, Notice, PanelState};

const START_SELECTED: &str = "Start point selected";
const END_SELECTED: &str = "End point selected";

/// Interaction state of the map client
#[derive(Debug)]
pub struct MapController<S> {
    surface: S,
    selection: PointSelection,
    markers: MarkerManager,
    overlay: NetworkOverlay,
    control: FindRouteControl,
    renderer: RouteRenderer,
    time: TimeOfDay,
    itinerary: Option<ItineraryView>,
    notice: Option<Notice>,
}

impl<S: MapSurfacePort> MapController<S> {
    /// Create a controller around a map surface
    ///
    /// The route layer starts attached, the network layer detached, and the
    /// time of day defaults to the local wall clock.
    pub fn new(mut surface: S, style: RouteStyle) -> Self {
        surface.set_layer_attached(MapLayer::Route, true);
        surface.set_layer_attached(MapLayer::Network, false);

        Self {
            surface,
            selection: PointSelection::new(),
            markers: MarkerManager::new(),
            overlay: NetworkOverlay::new(style.stop_dot.clone()),
            control: FindRouteControl::new(),
            renderer: RouteRenderer::new(style),
            time: TimeOfDay::now_local(),
            itinerary: None,
            notice: None,
        }
    }

    /// Override the default time of day
    #[must_use]
    pub fn with_time(mut self, time: TimeOfDay) -> Self {
        self.time = time;
        self
    }

    /// Apply one event
    ///
    /// Returns a ticket only for an accepted `RouteRequested`; the caller
    /// must send `ticket.request` and report back with `RouteSettled`.
    pub fn dispatch(&mut self, event: MapEvent) -> Option<RouteTicket> {
        match event {
            MapEvent::PickArmed(role) => {
                self.selection.arm(role);
                self.surface.set_picking(Some(role));
            },
            MapEvent::MapClicked(at) => {
                let Some(role) = self.selection.consume_click(at) else {
                    debug!(%at, "Click ignored, no pick armed");
                    return None;
                };
                self.markers.set_marker(&mut self.surface, role, at);
                self.surface.set_picking(None);
                self.control.set_points_ready(self.selection.both_set());
                info!(%role, %at, "Point picked");
            },
            MapEvent::TimeEdited(time) => {
                debug!(%time, "Time of day edited");
                self.time = time;
            },
            MapEvent::RouteRequested => return self.begin_route_request(),
            MapEvent::RouteSettled { ticket, result } => self.settle_route_request(ticket, result),
            MapEvent::OverlayToggled => {
                let attached = self.overlay.toggle(&mut self.surface);
                debug!(attached, "Network overlay toggled");
            },
            MapEvent::StopsLoaded(result) => self.overlay.load(&mut self.surface, result),
        }
        None
    }

    /// Parse and apply an edit of the time-of-day field
    ///
    /// An invalid entry leaves the current value untouched.
    pub fn set_time_text(&mut self, input: &str) -> Result<TimeOfDay, DomainError> {
        let time = TimeOfDay::parse(input)?;
        self.dispatch(MapEvent::TimeEdited(time));
        Ok(time)
    }

    fn begin_route_request(&mut self) -> Option<RouteTicket> {
        let (start, end) = self.selection.pair()?;
        let generation = self.control.begin()?;

        self.renderer.clear(&mut self.surface);
        self.itinerary = None;
        self.notice = None;

        let ticket = RouteTicket {
            generation,
            request: domain::RouteRequest::new(start, end, self.time),
        };
        info!(generation, %start, %end, time = %self.time, "Requesting route");
        Some(ticket)
    }

    fn settle_route_request(
        &mut self,
        ticket: RouteTicket,
        result: Result<RouteOutcome, ApplicationError>,
    ) {
        if !self.control.settle(ticket.generation, self.selection.both_set()) {
            return;
        }

        match result {
            Ok(RouteOutcome::Found(itinerary)) => {
                let issued_for = (ticket.request.start, ticket.request.end);
                if self.selection.pair() != Some(issued_for) {
                    warn!(
                        generation = ticket.generation,
                        "Points changed while the route was computed, discarding result"
                    );
                    self.notice = Some(Notice::StaleResult);
                    return;
                }
                let view = self.renderer.render(&mut self.surface, &itinerary);
                info!(
                    generation = ticket.generation,
                    segments = view.entries.len(),
                    summary = %itinerary.format_summary(),
                    "Route rendered"
                );
                self.itinerary = Some(view);
            },
            Ok(RouteOutcome::Rejected { message }) => {
                info!(%message, "Routing service declined the request");
                self.notice = Some(Notice::ServerMessage(message));
            },
            Err(e) => {
                warn!(error = %e, "Route request failed");
                self.notice = Some(Notice::TransportFailure);
            },
        }
    }

    /// Issue a route request and wait for it, as one step
    ///
    /// Returns the ticket that was sent, or `None` if the control was not
    /// enabled.
    #[instrument(skip(self, routing))]
    pub async fn find_route(&mut self, routing: &dyn RoutingPort) -> Option<RouteTicket> {
        let ticket = self.dispatch(MapEvent::RouteRequested)?;
        let result = routing.find_route(&ticket.request).await;
        self.dispatch(MapEvent::RouteSettled { ticket, result });
        Some(ticket)
    }

    /// Fetch the stop list and apply it to the overlay
    pub async fn load_stops(&mut self, routing: &dyn RoutingPort) {
        let result = fetch_stops(routing).await;
        self.dispatch(MapEvent::StopsLoaded(result));
    }

    /// Snapshot of the panel controls
    #[must_use]
    pub fn panel(&self) -> PanelState {
        let status = |role: PointRole, text: &'static str| {
            self.selection.get(role).map(|_| text)
        };

        PanelState {
            start_status: status(PointRole::Start, START_SELECTED),
            end_status: status(PointRole::End, END_SELECTED),
            armed: self.selection.mode().armed(),
            find_button: FindButton {
                enabled: self.control.is_enabled(),
                label: self.control.label(),
            },
            time: self.time,
            overlay_active: self.surface.is_layer_attached(MapLayer::Network),
            itinerary: self.itinerary.clone(),
            notice: self.notice.clone(),
        }
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub const fn selection(&self) -> &PointSelection {
        &self.selection
    }

    #[must_use]
    pub const fn markers(&self) -> &MarkerManager {
        &self.markers
    }

    #[must_use]
    pub const fn overlay(&self) -> &NetworkOverlay {
        &self.overlay
    }

    #[must_use]
    pub const fn control(&self) -> &FindRouteControl {
        &self.control
    }

    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use domain::{GeoPoint, RouteItinerary, RouteSegment, SegmentKind, StopMarker};

    use super::*;
    use crate::ports::MockRoutingPort;
    use crate::services::{BUSY_LABEL, IDLE_LABEL};
    use crate::testing::RecordingSurface;

    fn controller() -> MapController<RecordingSurface> {
        MapController::new(RecordingSurface::default(), RouteStyle::default())
            .with_time(TimeOfDay::new(8, 30).unwrap())
    }

    fn start() -> GeoPoint {
        GeoPoint::new(21.03, 105.85).unwrap()
    }

    fn end() -> GeoPoint {
        GeoPoint::new(21.05, 105.90).unwrap()
    }

    fn pick(controller: &mut MapController<RecordingSurface>, role: PointRole, at: GeoPoint) {
        controller.dispatch(MapEvent::PickArmed(role));
        controller.dispatch(MapEvent::MapClicked(at));
    }

    fn picked_controller() -> MapController<RecordingSurface> {
        let mut c = controller();
        pick(&mut c, PointRole::Start, start());
        pick(&mut c, PointRole::End, end());
        c
    }

    fn segment(kind: &str, coords: &[(f64, f64)]) -> RouteSegment {
        RouteSegment {
            kind: SegmentKind::from(kind),
            coords: coords
                .iter()
                .map(|&(lat, lon)| GeoPoint::new_unchecked(lat, lon))
                .collect(),
            desc: format!("{kind} desc"),
            sub: format!("{kind} sub"),
        }
    }

    fn found() -> RouteOutcome {
        RouteOutcome::Found(RouteItinerary {
            total_duration_minutes: 35,
            arrival_time: None,
            segments: vec![
                segment("walk", &[(21.03, 105.85), (21.031, 105.852)]),
                segment("bus", &[(21.031, 105.852), (21.048, 105.895)]),
                segment("transfer", &[(21.048, 105.895), (21.05, 105.90)]),
            ],
        })
    }

    #[test]
    fn initial_panel() {
        let c = controller();
        let panel = c.panel();
        assert_eq!(panel.start_status, None);
        assert_eq!(panel.end_status, None);
        assert_eq!(panel.armed, None);
        assert_eq!(
            panel.find_button,
            FindButton {
                enabled: false,
                label: IDLE_LABEL
            }
        );
        assert!(!panel.overlay_active);
        assert!(panel.itinerary.is_none());
        assert!(c.surface().is_layer_attached(MapLayer::Route));
    }

    #[test]
    fn arming_shows_picking_indication() {
        let mut c = controller();
        c.dispatch(MapEvent::PickArmed(PointRole::Start));
        assert_eq!(c.surface().picking, Some(PointRole::Start));
        assert_eq!(c.panel().armed, Some(PointRole::Start));

        c.dispatch(MapEvent::MapClicked(start()));
        assert_eq!(c.surface().picking, None);
        assert_eq!(c.panel().armed, None);
        assert_eq!(c.panel().start_status, Some(START_SELECTED));
    }

    #[test]
    fn click_while_idle_changes_nothing() {
        let mut c = controller();
        let before = c.panel();
        assert!(c.dispatch(MapEvent::MapClicked(start())).is_none());
        assert_eq!(c.panel(), before);
        assert!(c.surface().shapes.is_empty());
    }

    #[test]
    fn find_enabled_only_after_both_points() {
        let mut c = controller();
        pick(&mut c, PointRole::Start, start());
        assert!(!c.panel().find_button.enabled);
        assert!(c.dispatch(MapEvent::RouteRequested).is_none());

        pick(&mut c, PointRole::End, end());
        assert!(c.panel().find_button.enabled);
        assert_eq!(c.panel().end_status, Some(END_SELECTED));
    }

    #[test]
    fn repick_replaces_marker() {
        let mut c = picked_controller();
        let moved = GeoPoint::new(21.04, 105.86).unwrap();
        pick(&mut c, PointRole::Start, moved);

        assert_eq!(c.surface().markers(PointRole::Start), vec![moved]);
        assert_eq!(c.surface().markers(PointRole::End), vec![end()]);
        assert_eq!(c.selection().get(PointRole::Start), Some(moved));
    }

    #[test]
    fn request_ticket_carries_points_and_time() {
        let mut c = picked_controller();
        let ticket = c.dispatch(MapEvent::RouteRequested).unwrap();

        let body = serde_json::to_value(ticket.request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "start": { "lat": 21.03, "lon": 105.85 },
                "end": { "lat": 21.05, "lon": 105.90 },
                "time": "08:30"
            })
        );
    }

    #[test]
    fn busy_control_blocks_second_request() {
        let mut c = picked_controller();
        assert!(c.dispatch(MapEvent::RouteRequested).is_some());
        assert!(c.dispatch(MapEvent::RouteRequested).is_none());
        assert_eq!(
            c.panel().find_button,
            FindButton {
                enabled: false,
                label: BUSY_LABEL
            }
        );
    }

    #[test]
    fn successful_route_is_rendered() {
        let mut c = picked_controller();
        let ticket = c.dispatch(MapEvent::RouteRequested).unwrap();
        c.dispatch(MapEvent::RouteSettled {
            ticket,
            result: Ok(found()),
        });

        let panel = c.panel();
        let itinerary = panel.itinerary.unwrap();
        let kinds: Vec<&str> = itinerary.entries.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, ["walk", "bus", "transfer"]);
        assert_eq!(itinerary.total_duration_minutes, 35);
        assert!(panel.find_button.enabled);
        assert_eq!(c.surface().polylines().len(), 3);
        assert_eq!(c.surface().fitted.len(), 1);
    }

    #[test]
    fn server_error_is_shown_verbatim_and_control_restored() {
        let mut c = picked_controller();
        let ticket = c.dispatch(MapEvent::RouteRequested).unwrap();
        c.dispatch(MapEvent::RouteSettled {
            ticket,
            result: Ok(RouteOutcome::Rejected {
                message: "No route found".to_string(),
            }),
        });

        let panel = c.panel();
        assert_eq!(panel.notice.as_ref().map(Notice::text), Some("No route found"));
        assert!(panel.find_button.enabled);
        assert_eq!(panel.find_button.label, IDLE_LABEL);
        assert!(c.selection().both_set());
        assert!(panel.itinerary.is_none());
    }

    #[test]
    fn transport_failure_is_generic() {
        let mut c = picked_controller();
        let ticket = c.dispatch(MapEvent::RouteRequested).unwrap();
        c.dispatch(MapEvent::RouteSettled {
            ticket,
            result: Err(ApplicationError::ExternalService("connection refused".to_string())),
        });

        let panel = c.panel();
        assert_eq!(panel.notice, Some(Notice::TransportFailure));
        assert!(panel.find_button.enabled);
    }

    #[test]
    fn new_request_clears_previous_route_even_if_it_fails() {
        let mut c = picked_controller();
        let ticket = c.dispatch(MapEvent::RouteRequested).unwrap();
        c.dispatch(MapEvent::RouteSettled {
            ticket,
            result: Ok(found()),
        });
        assert_eq!(c.surface().polylines().len(), 3);

        let ticket = c.dispatch(MapEvent::RouteRequested).unwrap();
        assert!(c.surface().polylines().is_empty());
        assert!(c.panel().itinerary.is_none());

        c.dispatch(MapEvent::RouteSettled {
            ticket,
            result: Err(ApplicationError::ExternalService("down".to_string())),
        });
        assert!(c.surface().polylines().is_empty());
        // pins survive route clearing
        assert_eq!(c.surface().markers(PointRole::Start), vec![start()]);
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut c = picked_controller();
        let ticket = c.dispatch(MapEvent::RouteRequested).unwrap();

        // user re-picks the end while the request is in flight
        pick(&mut c, PointRole::End, GeoPoint::new(21.06, 105.91).unwrap());

        c.dispatch(MapEvent::RouteSettled {
            ticket,
            result: Ok(found()),
        });

        let panel = c.panel();
        assert_eq!(panel.notice, Some(Notice::StaleResult));
        assert!(panel.itinerary.is_none());
        assert!(c.surface().polylines().is_empty());
        assert!(panel.find_button.enabled);
    }

    #[test]
    fn repick_of_same_point_is_not_stale() {
        let mut c = picked_controller();
        let ticket = c.dispatch(MapEvent::RouteRequested).unwrap();
        pick(&mut c, PointRole::Start, start());

        c.dispatch(MapEvent::RouteSettled {
            ticket,
            result: Ok(found()),
        });
        assert!(c.panel().itinerary.is_some());
    }

    #[test]
    fn settle_for_unknown_ticket_is_ignored() {
        let mut c = picked_controller();
        let ticket = c.dispatch(MapEvent::RouteRequested).unwrap();
        let bogus = RouteTicket {
            generation: ticket.generation + 5,
            ..ticket
        };
        c.dispatch(MapEvent::RouteSettled {
            ticket: bogus,
            result: Ok(found()),
        });
        assert!(c.control().is_busy());
        assert!(c.surface().polylines().is_empty());
    }

    #[test]
    fn invalid_time_edit_keeps_value() {
        let mut c = controller();
        assert!(c.set_time_text("25:99").is_err());
        assert_eq!(c.time(), TimeOfDay::new(8, 30).unwrap());

        assert_eq!(c.set_time_text("17:45").unwrap(), TimeOfDay::new(17, 45).unwrap());
        assert_eq!(c.panel().time.to_string(), "17:45");
    }

    #[test]
    fn overlay_toggle_reflects_in_panel() {
        let mut c = controller();
        c.dispatch(MapEvent::StopsLoaded(Ok(vec![StopMarker::new(
            GeoPoint::hanoi(),
            "Hồ Gươm",
        )])));
        c.dispatch(MapEvent::OverlayToggled);
        assert!(c.panel().overlay_active);
        assert_eq!(c.surface().dots(), 1);
        c.dispatch(MapEvent::OverlayToggled);
        assert!(!c.panel().overlay_active);
    }

    #[tokio::test]
    async fn find_route_round_trip_through_port() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_find_route()
            .withf(|req| req.time.to_string() == "08:30")
            .times(1)
            .returning(|_| Ok(found()));

        let mut c = picked_controller();
        let ticket = c.find_route(&routing).await;
        assert!(ticket.is_some());
        assert_eq!(c.panel().itinerary.unwrap().entries.len(), 3);
    }

    #[tokio::test]
    async fn find_route_without_points_does_not_call_port() {
        let mut routing = MockRoutingPort::new();
        routing.expect_find_route().never();

        let mut c = controller();
        assert!(c.find_route(&routing).await.is_none());
    }

    #[tokio::test]
    async fn failed_stop_fetch_is_not_fatal() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_list_stops()
            .returning(|| Err(ApplicationError::ExternalService("refused".to_string())));

        let mut c = picked_controller();
        c.load_stops(&routing).await;
        assert!(c.overlay().stops().is_empty());
        assert!(c.panel().find_button.enabled);
    }
}

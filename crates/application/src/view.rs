//! Panel view model
//!
//! Plain data describing everything outside the map itself: the status
//! line per point, the find-route button, the time field, the overlay
//! toggle, the itinerary panel, and the latest advisory.

use domain::{PointRole, SegmentKind, TimeOfDay};

/// Generic advisory shown when the routing service cannot be reached
pub const TRANSPORT_FAILURE_TEXT: &str = "Routing service unavailable or not running";

/// Shown when an answer arrives for points that have since been re-picked
pub const STALE_RESULT_TEXT: &str =
    "The selected points changed while the route was being computed; find the route again";

/// State of the find-route button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindButton {
    pub enabled: bool,
    pub label: &'static str,
}

/// One row of the itinerary list, in segment order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryEntry {
    /// Drives the styling of the row
    pub kind: SegmentKind,
    pub desc: String,
    pub sub: String,
}

/// Contents of the revealed itinerary panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryView {
    pub total_duration_minutes: u32,
    pub arrival_time: Option<String>,
    pub entries: Vec<ItineraryEntry>,
}

impl ItineraryView {
    /// Duration headline, e.g. `35 min` or `35 min, arrive 09:05`
    #[must_use]
    pub fn headline(&self) -> String {
        self.arrival_time.as_ref().map_or_else(
            || format!("{} min", self.total_duration_minutes),
            |arrival| format!("{} min, arrive {arrival}", self.total_duration_minutes),
        )
    }
}

/// Latest advisory for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The service declined to route; its message, verbatim
    ServerMessage(String),
    /// The request could not complete
    TransportFailure,
    /// The answer was discarded because the points changed meanwhile
    StaleResult,
}

impl Notice {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::ServerMessage(message) => message,
            Self::TransportFailure => TRANSPORT_FAILURE_TEXT,
            Self::StaleResult => STALE_RESULT_TEXT,
        }
    }
}

/// Snapshot of the panel controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub start_status: Option<&'static str>,
    pub end_status: Option<&'static str>,
    /// Role whose input row is highlighted while a pick is armed
    pub armed: Option<PointRole>,
    pub find_button: FindButton,
    pub time: TimeOfDay,
    /// Whether the overlay toggle shows as active
    pub overlay_active: bool,
    /// `None` while the itinerary panel is hidden
    pub itinerary: Option<ItineraryView>,
    pub notice: Option<Notice>,
}

impl PanelState {
    /// Status line for a role
    #[must_use]
    pub const fn status(&self, role: PointRole) -> Option<&'static str> {
        match role {
            PointRole::Start => self.start_status,
            PointRole::End => self.end_status,
        }
    }
}

//! Route renderer
//!
//! Turns an itinerary into styled polylines on the route layer and a
//! parallel list of itinerary entries.

use domain::{RouteItinerary, SegmentKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::{DotStyle, MapLayer, MapSurfacePort, StrokeStyle};
use crate::view::{ItineraryEntry, ItineraryView};

/// Drawing styles, supplied from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStyle {
    /// Bus and any unrecognised segment kind
    #[serde(default = "default_ride_stroke")]
    pub ride: StrokeStyle,
    #[serde(default = "default_walk_stroke")]
    pub walk: StrokeStyle,
    #[serde(default = "default_transfer_stroke")]
    pub transfer: StrokeStyle,
    /// Stop dots of the network overlay
    #[serde(default)]
    pub stop_dot: DotStyle,
}

fn default_ride_stroke() -> StrokeStyle {
    StrokeStyle::solid("#2980b9")
}

fn default_walk_stroke() -> StrokeStyle {
    StrokeStyle::dashed("#27ae60", "5, 10")
}

fn default_transfer_stroke() -> StrokeStyle {
    StrokeStyle::dashed("#f39c12", "3, 6")
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            ride: default_ride_stroke(),
            walk: default_walk_stroke(),
            transfer: default_transfer_stroke(),
            stop_dot: DotStyle::default(),
        }
    }
}

impl RouteStyle {
    /// Stroke for a segment, chosen from its kind alone
    #[must_use]
    pub fn stroke_for(&self, kind: &SegmentKind) -> &StrokeStyle {
        match kind {
            SegmentKind::Walk => &self.walk,
            SegmentKind::Transfer => &self.transfer,
            SegmentKind::Bus | SegmentKind::Other(_) => &self.ride,
        }
    }

    /// Validate the style table
    pub fn validate(&self) -> Result<(), String> {
        for (name, stroke) in [
            ("ride", &self.ride),
            ("walk", &self.walk),
            ("transfer", &self.transfer),
        ] {
            if stroke.color.is_empty() {
                return Err(format!("style.{name}.color must not be empty"));
            }
            if stroke.weight <= 0.0 {
                return Err(format!("style.{name}.weight must be greater than 0"));
            }
            if !(0.0..=1.0).contains(&stroke.opacity) {
                return Err(format!("style.{name}.opacity must be between 0 and 1"));
            }
        }
        if self.walk.dash_array.is_some() && self.walk.dash_array == self.transfer.dash_array {
            return Err("style.walk and style.transfer must use different dash patterns".to_string());
        }
        Ok(())
    }
}

/// Draws itineraries on the route layer
#[derive(Debug, Clone, Default)]
pub struct RouteRenderer {
    style: RouteStyle,
}

impl RouteRenderer {
    #[must_use]
    pub const fn new(style: RouteStyle) -> Self {
        Self { style }
    }

    /// Remove every drawn route shape
    pub fn clear(&self, surface: &mut dyn MapSurfacePort) {
        surface.clear_layer(MapLayer::Route);
    }

    /// Replace the drawn route with this itinerary
    ///
    /// Each bus segment fits the viewport to its own bounds, so the last
    /// bus segment decides the final view. Calling this twice with the same
    /// itinerary leaves the same shapes on the map.
    pub fn render(
        &self,
        surface: &mut dyn MapSurfacePort,
        itinerary: &RouteItinerary,
    ) -> ItineraryView {
        self.clear(surface);

        let mut entries = Vec::with_capacity(itinerary.segments.len());
        for segment in &itinerary.segments {
            let stroke = self.style.stroke_for(&segment.kind);
            surface.add_polyline(MapLayer::Route, &segment.coords, stroke);

            let bus_bounds = segment.kind.is_bus().then(|| segment.bounds()).flatten();
            if let Some(bounds) = bus_bounds {
                surface.fit_bounds(bounds);
            }

            entries.push(ItineraryEntry {
                kind: segment.kind.clone(),
                desc: segment.desc.clone(),
                sub: segment.sub.clone(),
            });
        }

        debug!(segments = entries.len(), "Route rendered");

        ItineraryView {
            total_duration_minutes: itinerary.total_duration_minutes,
            arrival_time: itinerary.arrival_time.clone(),
            entries,
        }
    }
}

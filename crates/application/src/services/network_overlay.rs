//! Network overlay
//!
//! A toggleable layer with one dot per known stop. The stop list is
//! fetched once at startup; a failed fetch leaves the layer empty and the
//! rest of the client unaffected.

use domain::StopMarker;
use tracing::{info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{DotStyle, MapLayer, MapSurfacePort, RoutingPort};

/// Progress of the one-off stop fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayLoad {
    /// Fetch not completed yet
    #[default]
    Pending,
    /// Stops were drawn into the layer
    Loaded,
    /// Fetch failed; the layer stays empty
    Failed,
}

/// Stop overlay state
#[derive(Debug, Clone, Default)]
pub struct NetworkOverlay {
    stops: Vec<StopMarker>,
    load: OverlayLoad,
    style: DotStyle,
}

impl NetworkOverlay {
    #[must_use]
    pub fn new(style: DotStyle) -> Self {
        Self {
            stops: Vec::new(),
            load: OverlayLoad::Pending,
            style,
        }
    }

    /// Apply the result of the stop fetch
    ///
    /// Only the first completed fetch is applied; the stop set lives for
    /// the whole session.
    pub fn load(
        &mut self,
        surface: &mut dyn MapSurfacePort,
        result: Result<Vec<StopMarker>, ApplicationError>,
    ) {
        if self.load != OverlayLoad::Pending {
            warn!(state = ?self.load, "Stop list already applied, ignoring");
            return;
        }

        match result {
            Ok(stops) => {
                for stop in &stops {
                    surface.add_stop_dot(MapLayer::Network, stop, &self.style);
                }
                info!(count = stops.len(), "Network overlay loaded");
                self.stops = stops;
                self.load = OverlayLoad::Loaded;
            },
            Err(e) => {
                warn!(error = %e, "Failed to load stop list, network overlay stays empty");
                self.load = OverlayLoad::Failed;
            },
        }
    }

    /// Attach the layer if detached, detach it if attached
    ///
    /// Returns whether the layer is attached afterwards.
    pub fn toggle(&self, surface: &mut dyn MapSurfacePort) -> bool {
        let attach = !surface.is_layer_attached(MapLayer::Network);
        surface.set_layer_attached(MapLayer::Network, attach);
        attach
    }

    #[must_use]
    pub fn stops(&self) -> &[StopMarker] {
        &self.stops
    }

    #[must_use]
    pub const fn load_state(&self) -> OverlayLoad {
        self.load
    }
}

/// Fetch the stop list for the overlay
#[instrument(skip(routing))]
pub async fn fetch_stops(
    routing: &dyn RoutingPort,
) -> Result<Vec<StopMarker>, ApplicationError> {
    info!("Fetching stop list");
    routing.list_stops().await
}

#[cfg(test)]
mod tests {
    use domain::GeoPoint;

    use super::*;
    use crate::ports::MockRoutingPort;
    use crate::testing::RecordingSurface;

    fn stops() -> Vec<StopMarker> {
        vec![
            StopMarker::new(GeoPoint::new_unchecked(21.03, 105.85), "Bến xe Giáp Bát"),
            StopMarker::new(GeoPoint::new_unchecked(21.04, 105.84), "Hồ Gươm"),
        ]
    }

    #[test]
    fn loaded_stops_are_drawn_into_detached_layer() {
        let mut surface = RecordingSurface::default();
        let mut overlay = NetworkOverlay::default();

        overlay.load(&mut surface, Ok(stops()));

        assert_eq!(overlay.load_state(), OverlayLoad::Loaded);
        assert_eq!(overlay.stops().len(), 2);
        assert_eq!(surface.dots(), 2);
        assert!(!surface.is_layer_attached(MapLayer::Network));
    }

    #[test]
    fn toggle_flips_attachment() {
        let mut surface = RecordingSurface::default();
        let mut overlay = NetworkOverlay::default();
        overlay.load(&mut surface, Ok(stops()));

        assert!(overlay.toggle(&mut surface));
        assert!(surface.is_layer_attached(MapLayer::Network));
        assert!(!overlay.toggle(&mut surface));
        assert!(!surface.is_layer_attached(MapLayer::Network));
    }

    #[test]
    fn failed_fetch_leaves_empty_layer() {
        let mut surface = RecordingSurface::default();
        let mut overlay = NetworkOverlay::default();

        overlay.load(
            &mut surface,
            Err(ApplicationError::ExternalService("connection refused".to_string())),
        );

        assert_eq!(overlay.load_state(), OverlayLoad::Failed);
        assert!(overlay.stops().is_empty());
        assert_eq!(surface.dots(), 0);
        assert!(overlay.toggle(&mut surface));
    }

    #[test]
    fn empty_list_toggles_to_empty_attached_layer() {
        let mut surface = RecordingSurface::default();
        let mut overlay = NetworkOverlay::default();
        overlay.load(&mut surface, Ok(Vec::new()));

        assert_eq!(overlay.load_state(), OverlayLoad::Loaded);
        assert!(overlay.toggle(&mut surface));
        assert_eq!(surface.dots(), 0);
    }

    #[test]
    fn second_load_is_ignored() {
        let mut surface = RecordingSurface::default();
        let mut overlay = NetworkOverlay::default();
        overlay.load(&mut surface, Ok(stops()));
        overlay.load(&mut surface, Ok(stops()));
        assert_eq!(surface.dots(), 2);
    }

    #[tokio::test]
    async fn fetch_stops_delegates_to_port() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_list_stops()
            .times(1)
            .returning(|| Ok(stops()));

        let fetched = fetch_stops(&routing).await.unwrap();
        assert_eq!(fetched.len(), 2);
    }
}

//! Rectangular geographic bounds

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Axis-aligned bounding box given by its south-west and north-east corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    south_west: GeoPoint,
    north_east: GeoPoint,
}

impl GeoBounds {
    /// Smallest bounds enclosing every point, or `None` when there are no points
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a GeoPoint>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_lat, mut min_lon) = (first.lat(), first.lon());
        let (mut max_lat, mut max_lon) = (min_lat, min_lon);

        for point in iter {
            min_lat = min_lat.min(point.lat());
            min_lon = min_lon.min(point.lon());
            max_lat = max_lat.max(point.lat());
            max_lon = max_lon.max(point.lon());
        }

        Some(Self {
            south_west: GeoPoint::new_unchecked(min_lat, min_lon),
            north_east: GeoPoint::new_unchecked(max_lat, max_lon),
        })
    }

    #[must_use]
    pub const fn south_west(&self) -> GeoPoint {
        self.south_west
    }

    #[must_use]
    pub const fn north_east(&self) -> GeoPoint {
        self.north_east
    }

    /// Midpoint of the box
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new_unchecked(
            (self.south_west.lat() + self.north_east.lat()) / 2.0,
            (self.south_west.lon() + self.north_east.lon()) / 2.0,
        )
    }

    /// Whether the point lies inside or on the edge of the box
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.south_west.lat()..=self.north_east.lat()).contains(&point.lat())
            && (self.south_west.lon()..=self.north_east.lon()).contains(&point.lon())
    }
}

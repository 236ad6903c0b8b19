use ahash::AHashSet;
use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::GeoPoint;

/// A closed polygon ring used as a spatial filter.
///
/// Holds at least three points; the ring is cyclic, so the last point need
/// not repeat the first. Drag rectangles are stored as five points with the
/// anchor repeated at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegion")]
pub struct Region {
    points: Vec<GeoPoint>,
}

#[derive(Deserialize)]
struct RawRegion {
    points: Vec<GeoPoint>,
}

impl TryFrom<RawRegion> for Region {
    type Error = EngineError;

    fn try_from(raw: RawRegion) -> Result<Self, Self::Error> {
        Region::new(raw.points)
    }
}

impl Region {
    /// Build a region from an arbitrary simple polygon ring.
    pub fn new(points: Vec<GeoPoint>) -> Result<Self, EngineError> {
        if points.len() < 3 {
            return Err(EngineError::DegenerateRegion { distinct: distinct_count(&points) });
        }
        Ok(Self { points })
    }

    /// Axis-aligned rectangle spanned by a drag from `anchor` to `corner`:
    /// `(a.lat, a.lng) (a.lat, c.lng) (c.lat, c.lng) (c.lat, a.lng) (a.lat, a.lng)`.
    ///
    /// May be degenerate (zero width or height); check [`Region::is_degenerate`]
    /// before treating it as a finished region.
    pub fn rectangle(anchor: GeoPoint, corner: GeoPoint) -> Self {
        let points = vec![
            anchor,
            GeoPoint::new_unchecked(anchor.lat(), corner.lng()),
            corner,
            GeoPoint::new_unchecked(corner.lat(), anchor.lng()),
            anchor,
        ];
        Self { points }
    }

    #[inline] pub fn points(&self) -> &[GeoPoint] { &self.points }

    #[inline] pub fn len(&self) -> usize { self.points.len() }

    /// Always false; a region holds at least three points.
    #[inline] pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Number of pairwise distinct vertices.
    pub fn distinct_count(&self) -> usize { distinct_count(&self.points) }

    /// True when fewer than three distinct vertices remain (e.g. a click
    /// without movement, or a drag along a single axis).
    pub fn is_degenerate(&self) -> bool { self.distinct_count() < 3 }

    /// Fail with [`EngineError::DegenerateRegion`] if the region is degenerate.
    pub fn ensure_non_degenerate(&self) -> Result<(), EngineError> {
        let distinct = self.distinct_count();
        if distinct < 3 {
            return Err(EngineError::DegenerateRegion { distinct });
        }
        Ok(())
    }

    /// Axis-aligned bounding box in `geo` axes (x = lng, y = lat).
    pub fn bounds(&self) -> Rect<f64> {
        let first: Coord<f64> = self.points[0].into();
        let (min, max) = self.points[1..].iter()
            .map(|&p| Coord::from(p))
            .fold((first, first), |(min, max), c| (
                Coord { x: min.x.min(c.x), y: min.y.min(c.y) },
                Coord { x: max.x.max(c.x), y: max.y.max(c.y) },
            ));
        Rect::new(min, max)
    }

    /// Center of the bounding box. Exact for rectangles only; not the
    /// area-weighted centroid of a general polygon.
    pub fn centroid(&self) -> GeoPoint {
        let center = self.bounds().center();
        GeoPoint::new_unchecked(center.y, center.x)
    }
}

fn distinct_count(points: &[GeoPoint]) -> usize {
    // + 0.0 folds -0.0 into 0.0 so they hash the same.
    points.iter()
        .map(|p| ((p.lat() + 0.0).to_bits(), (p.lng() + 0.0).to_bits()))
        .collect::<AHashSet<_>>()
        .len()
}

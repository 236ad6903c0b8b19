use geo::Rect;
use rstar::{RTreeObject, AABB};

use crate::types::GeoPoint;

/// A record location in an R-tree, associated with a record by index.
#[derive(Debug, Clone)]
pub(super) struct IndexedPoint {
    idx: usize, // Index of corresponding record in the indexed slice
    point: GeoPoint,
}

impl IndexedPoint {
    pub(super) fn new(idx: usize, point: GeoPoint) -> Self {
        Self { idx, point }
    }

    /// Get the index of the corresponding record.
    pub(super) fn idx(&self) -> usize { self.idx }

    /// Get the indexed location.
    pub(super) fn point(&self) -> GeoPoint { self.point }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.point.lng(), self.point.lat()])
    }
}

/// Convert a bounding rectangle (x = lng, y = lat) into an R-tree envelope.
pub(super) fn envelope(rect: &Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners(rect.min().into(), rect.max().into())
}

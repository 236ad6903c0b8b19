use std::fmt;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A WGS84 coordinate, always within `[-90, 90]` x `[-180, 180]`.
///
/// Constructed through [`GeoPoint::new`], which rejects out-of-range and NaN
/// values; deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = EngineError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lng)
    }
}

impl GeoPoint {
    /// Create a point, validating the latitude/longitude ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self, EngineError> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Ok(Self { lat, lng })
        } else {
            Err(EngineError::CoordinateOutOfRange { lat, lng })
        }
    }

    /// Caller guarantees the range invariant (e.g. midpoints of valid points).
    pub(crate) fn new_unchecked(lat: f64, lng: f64) -> Self {
        debug_assert!(Self::new(lat, lng).is_ok(), "GeoPoint out of range: {lat}, {lng}");
        Self { lat, lng }
    }

    #[inline] pub fn lat(&self) -> f64 { self.lat }

    #[inline] pub fn lng(&self) -> f64 { self.lng }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Map into `geo` coordinates: x is longitude, y is latitude.
impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        Coord { x: p.lng, y: p.lat }
    }
}

//! Error types for the geospatial filter engine.

use thiserror::Error;

/// Errors raised by the containment, drawing and registry layers.
///
/// None of these are fatal to the host: the [`MapView`](crate::MapView)
/// facade absorbs them so that a malformed gesture simply fails to produce a
/// region.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A region has fewer than three (distinct) points.
    #[error("degenerate region: {distinct} distinct point(s), at least 3 required")]
    DegenerateRegion { distinct: usize },

    /// A drawing transition was requested from a state that does not allow it.
    #[error("invalid drawing transition: cannot {action} while {state}")]
    InvalidStateTransition { state: &'static str, action: &'static str },

    /// A coordinate lies outside `[-90, 90]` x `[-180, 180]` (or is NaN).
    #[error("coordinate out of range: lat={lat}, lng={lng}")]
    CoordinateOutOfRange { lat: f64, lng: f64 },

    /// Engine configuration could not be parsed or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    /// Programming errors (as opposed to malformed user input).
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Self::InvalidStateTransition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = EngineError::DegenerateRegion { distinct: 2 };
        assert_eq!(err.to_string(), "degenerate region: 2 distinct point(s), at least 3 required");

        let err = EngineError::InvalidStateTransition { state: "idle", action: "move pointer" };
        assert_eq!(err.to_string(), "invalid drawing transition: cannot move pointer while idle");
        assert!(err.is_programming_error());

        let err = EngineError::CoordinateOutOfRange { lat: 91.0, lng: 0.0 };
        assert!(!err.is_programming_error());
    }
}

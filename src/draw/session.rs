use std::fmt;

use tracing::debug;

use crate::error::EngineError;
use crate::types::{GeoPoint, Region};

/// Phase of the drag-to-draw gesture.
///
/// `Completed` is passed through inside [`DrawingSession::on_pointer_up`] on
/// the way back to `Idle` and is never observable between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Armed,
    Dragging,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Armed => "armed",
            Phase::Dragging => "dragging",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// The rectangle has at least three distinct corners; ownership of the
    /// region moves to the caller (normally the region registry).
    Completed(Region),
    /// Click without movement or single-axis drag; nothing was produced.
    Discarded,
}

/// State machine turning one pointer drag into a candidate rectangle.
///
/// `Idle -> Armed -> Dragging -> Idle`. Drawing mode is single-shot: a
/// completed gesture drops straight back to `Idle`, and the map adapter
/// should re-enable panning whenever [`DrawingSession::is_active`] turns
/// false.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    phase: Phase,
    anchor: Option<GeoPoint>,
    candidate: Option<Region>,
}

impl Default for DrawingSession {
    fn default() -> Self { Self::new() }
}

impl DrawingSession {
    pub fn new() -> Self {
        Self { phase: Phase::Idle, anchor: None, candidate: None }
    }

    #[inline] pub fn phase(&self) -> Phase { self.phase }

    /// True in drawing mode (armed or dragging); map panning must be off.
    #[inline] pub fn is_active(&self) -> bool { self.phase != Phase::Idle }

    #[inline] pub fn anchor(&self) -> Option<GeoPoint> { self.anchor }

    /// The live rectangle, once the pointer has moved away from the anchor.
    #[inline] pub fn candidate(&self) -> Option<&Region> { self.candidate.as_ref() }

    /// `Idle -> Armed`.
    pub fn enter_drawing_mode(&mut self) -> Result<(), EngineError> {
        self.expect(Phase::Idle, "enter drawing mode")?;
        self.transition(Phase::Armed);
        Ok(())
    }

    /// `Armed -> Dragging`, anchoring the rectangle at `p`.
    pub fn on_pointer_down(&mut self, p: GeoPoint) -> Result<(), EngineError> {
        self.expect(Phase::Armed, "press pointer")?;
        self.anchor = Some(p);
        self.candidate = None;
        self.transition(Phase::Dragging);
        Ok(())
    }

    /// Recompute the candidate rectangle from the anchor to `p`.
    ///
    /// Returns the new candidate, or `None` when `p` equals the anchor and
    /// nothing changed.
    pub fn on_pointer_move(&mut self, p: GeoPoint) -> Result<Option<&Region>, EngineError> {
        self.expect(Phase::Dragging, "move pointer")?;
        let anchor = self.anchor.ok_or(EngineError::InvalidStateTransition {
            state: "dragging without anchor",
            action: "move pointer",
        })?;
        if p == anchor {
            return Ok(None);
        }
        self.candidate = Some(Region::rectangle(anchor, p));
        Ok(self.candidate.as_ref())
    }

    /// Finish the gesture and leave drawing mode.
    pub fn on_pointer_up(&mut self) -> Result<GestureOutcome, EngineError> {
        self.expect(Phase::Dragging, "release pointer")?;

        let candidate = self.candidate.take();
        self.anchor = None;

        let outcome = match candidate {
            Some(region) if !region.is_degenerate() => {
                debug!(from = %self.phase, "drawing: dragging -> completed");
                GestureOutcome::Completed(region)
            }
            _ => GestureOutcome::Discarded,
        };
        self.transition(Phase::Idle);
        Ok(outcome)
    }

    /// Abort from `Armed` or `Dragging`, dropping any candidate.
    pub fn cancel_drawing(&mut self) -> Result<(), EngineError> {
        if self.phase == Phase::Idle {
            return Err(self.invalid("cancel drawing"));
        }
        self.anchor = None;
        self.candidate = None;
        self.transition(Phase::Idle);
        Ok(())
    }

    fn expect(&self, phase: Phase, action: &'static str) -> Result<(), EngineError> {
        if self.phase == phase { Ok(()) } else { Err(self.invalid(action)) }
    }

    fn invalid(&self, action: &'static str) -> EngineError {
        EngineError::InvalidStateTransition { state: self.phase.as_str(), action }
    }

    fn transition(&mut self, to: Phase) {
        debug!(from = %self.phase, %to, "drawing transition");
        self.phase = to;
    }
}

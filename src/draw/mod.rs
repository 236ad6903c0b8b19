mod session;

pub use session::{DrawingSession, GestureOutcome, Phase};

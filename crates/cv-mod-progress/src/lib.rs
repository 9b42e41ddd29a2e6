//! Progress and ETA derivation for an active processing session.
//!
//! The tracker converts (current step, elapsed wall-clock time, optional
//! engine-supplied overrides) into one coherent `ProgressState` per tick.
//! Everything is derived: the tracker never accumulates percentages, it
//! recomputes them from the step catalog, so a late or repeated step
//! event cannot corrupt the display.

mod tracker;

pub use tracker::{ProgressState, ProgressTracker};

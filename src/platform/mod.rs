//! Platform abstraction layer
//!
//! The collaborators the simulation is driven by:
//! - Time: a monotonic millisecond clock and per-frame delta
//! - Input: held controls plus a fire edge trigger

pub mod clock;
pub mod input;

pub use clock::{Clock, FrameTimer, ManualClock, SystemClock};
pub use input::{Control, InputState};

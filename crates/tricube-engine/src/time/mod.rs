//! Frame timing.
//!
//! One `FrameClock` ticks per rendered frame; `FrameStats` turns the ticks
//! into a periodic frames-per-second figure for the debug log.

mod frame_clock;
mod stats;

pub use frame_clock::{FrameClock, FrameTime};
pub use stats::FrameStats;

//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (`clock`)
//! - Input events (`input`)
//!
//! Storage lives in `crate::persistence`.

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock, SteadyClock};
pub use input::{Key, KeyEvent, map_key};

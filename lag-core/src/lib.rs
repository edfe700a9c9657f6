//! This is the core library for the input lag meter.
//! It measures the time between a key press and the next visible frame,
//! and drives the text shown for it.

pub mod clock;
pub mod display;
pub mod error;
pub mod key;
pub mod meter;
pub mod poller;
pub mod scheduler;

pub use clock::*;
pub use display::*;
pub use error::*;
pub use key::*;
pub use meter::*;
pub use poller::*;
pub use scheduler::*;

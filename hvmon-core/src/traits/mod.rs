//! Hardware Abstractions for hvmon
//!
//! The monitor core never touches a peripheral directly. Each external
//! collaborator is a small trait a board crate implements once:
//!
//! - [`frontend`] - analog-to-digital converter channel
//! - [`time`] - monotonic millisecond clock and blocking delay
//! - [`serial`] - non-blocking command byte input
//!
//! Serial output is any [`core::fmt::Write`] implementor.
//!
//! Static dispatch throughout: [`Monitor`](crate::Monitor) is generic over
//! all four parts, so a firmware image only contains the drivers it uses and
//! tests can swap in mocks without feature flags.

pub mod frontend;
pub mod serial;
pub mod time;

pub use frontend::AnalogFrontEnd;
pub use serial::CommandInput;
pub use time::{Delay, TimeSource};

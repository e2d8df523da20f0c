//! Serial Command Input
//!
//! Commands arrive one byte at a time and must be polled without blocking,
//! so the control loop can keep its tick cadence. This mirrors the
//! `embedded-hal` 0.2 `serial::Read` shape (`nb::Result`), so most HAL UARTs
//! implement it with a one-line forwarding impl.
//!
//! Output goes through [`core::fmt::Write`], which every HAL serial writer
//! already implements.

/// Non-blocking byte source
pub trait CommandInput {
    /// Transport failure (framing, overrun, ...)
    type Error: core::fmt::Debug;

    /// Read one byte if available
    ///
    /// Returns `Err(nb::Error::WouldBlock)` when no byte is pending.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;
}

impl<C: CommandInput + ?Sized> CommandInput for &mut C {
    type Error = C::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        (**self).read_byte()
    }
}

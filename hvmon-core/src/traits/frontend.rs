//! Analog Front-End Abstraction
//!
//! The only place raw hardware data enters the system. A board crate wraps
//! its converter driver (ADS1115 over I2C, an on-chip SAR ADC, ...) in this
//! trait; the acquisition pipeline does the rest.

/// Single-ended analog-to-digital converter channel
///
/// ## Example Implementation
///
/// ```rust
/// use hvmon_core::traits::AnalogFrontEnd;
///
/// struct Ads1115 {
///     // ... I2C bus handle and address
/// }
///
/// #[derive(Debug)]
/// struct BusError;
///
/// impl AnalogFrontEnd for Ads1115 {
///     type Error = BusError;
///
///     fn read_raw(&mut self) -> Result<i16, Self::Error> {
///         // Start single-shot conversion on AIN0, poll ready, read register
///         Ok(0) // placeholder
///     }
///
///     fn probe(&mut self) -> Result<(), Self::Error> {
///         // Read the config register and check the reset value
///         Ok(())
///     }
/// }
/// ```
pub trait AnalogFrontEnd {
    /// Driver-specific failure (bus NACK, timeout, ...)
    type Error: core::fmt::Debug;

    /// Read one signed raw conversion code
    fn read_raw(&mut self) -> Result<i16, Self::Error>;

    /// Check that the converter is present and answering
    ///
    /// Called once at startup. Drivers that cannot probe keep the default.
    fn probe(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<A: AnalogFrontEnd + ?Sized> AnalogFrontEnd for &mut A {
    type Error = A::Error;

    fn read_raw(&mut self) -> Result<i16, Self::Error> {
        (**self).read_raw()
    }

    fn probe(&mut self) -> Result<(), Self::Error> {
        (**self).probe()
    }
}

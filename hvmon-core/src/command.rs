//! Serial commands and operating modes
//!
//! One ASCII byte per command. Letters are case-insensitive; anything not in
//! the table (including the `\r\n` a terminal sends after a keypress) parses
//! to `None` and is ignored.
//!
//! | Byte      | Command         |
//! |-----------|-----------------|
//! | `N` / `n` | `Normal`        |
//! | `C` / `c` | `Calibrate`     |
//! | `I` / `i` | `Info`          |
//! | `1`       | `CaptureLow`    |
//! | `2`       | `CaptureHigh`   |
//! | `R` / `r` | `Reset`         |

/// What a periodic tick does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Tabular output: time, instant voltage, filtered voltage
    #[default]
    Normal,
    /// Live voltage readout, calibration captures enabled
    Calibrate,
}

impl OperatingMode {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Calibrate => "Calibrate",
        }
    }
}

/// Operator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Switch to normal mode and print the table header
    Normal,
    /// Switch to calibrate mode and print instructions
    Calibrate,
    /// Print diagnostics
    Info,
    /// Capture the low reference point (calibrate mode only)
    CaptureLow,
    /// Capture the high reference point (calibrate mode only)
    CaptureHigh,
    /// Reset coefficients to identity
    Reset,
}

impl Command {
    /// Decode one received byte
    pub fn parse(byte: u8) -> Option<Self> {
        match byte.to_ascii_uppercase() {
            b'N' => Some(Self::Normal),
            b'C' => Some(Self::Calibrate),
            b'I' => Some(Self::Info),
            b'1' => Some(Self::CaptureLow),
            b'2' => Some(Self::CaptureHigh),
            b'R' => Some(Self::Reset),
            _ => None,
        }
    }

    /// Only accepted while calibrating
    pub fn requires_calibrate_mode(&self) -> bool {
        matches!(self, Self::CaptureLow | Self::CaptureHigh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(Command::parse(b'n'), Some(Command::Normal));
        assert_eq!(Command::parse(b'N'), Some(Command::Normal));
        assert_eq!(Command::parse(b'c'), Some(Command::Calibrate));
        assert_eq!(Command::parse(b'I'), Some(Command::Info));
        assert_eq!(Command::parse(b'r'), Some(Command::Reset));
    }

    #[test]
    fn digits_select_capture_points() {
        assert_eq!(Command::parse(b'1'), Some(Command::CaptureLow));
        assert_eq!(Command::parse(b'2'), Some(Command::CaptureHigh));
        assert!(Command::CaptureLow.requires_calibrate_mode());
        assert!(!Command::Reset.requires_calibrate_mode());
    }

    #[test]
    fn everything_else_is_ignored() {
        for byte in [b'\r', b'\n', b' ', b'3', b'x', b'?', 0x00, 0xff] {
            assert_eq!(Command::parse(byte), None, "byte {:#04x}", byte);
        }
    }

    #[test]
    fn default_mode_is_normal() {
        assert_eq!(OperatingMode::default(), OperatingMode::Normal);
        assert_eq!(OperatingMode::Calibrate.as_str(), "Calibrate");
    }
}

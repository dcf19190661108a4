//! Validation errors for gamepad state and reports.

use crate::hat::HatFlags;

/// Error type for invalid gamepad input values.
///
/// Every variant carries the offending value so callers can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// Button number outside `1..=32`.
    InvalidButton(u8),
    /// Joystick value outside `-127..=127`.
    InvalidAxis(i16),
    /// Byte that is not one of the nine hat direction codes.
    InvalidHatDirection(u8),
    /// Switch combination that no hat direction maps to (e.g. up and down together).
    InvalidHatFlags(HatFlags),
    /// Report buffer of the wrong length.
    InvalidLength(usize),
}

impl core::fmt::Display for ReportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidButton(n) => {
                write!(f, "button number must be in range 1 to 32, got {n}")
            }
            Self::InvalidAxis(v) => {
                write!(f, "joystick value must be in range -127 to 127, got {v}")
            }
            Self::InvalidHatDirection(code) => {
                write!(f, "hat direction code {code:#04x} is not a valid direction")
            }
            Self::InvalidHatFlags(flags) => write!(
                f,
                "hat switches (up={}, right={}, down={}, left={}) do not form a direction",
                flags.up as u8, flags.right as u8, flags.down as u8, flags.left as u8
            ),
            Self::InvalidLength(len) => write!(f, "report must be 9 bytes, got {len}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReportError {}

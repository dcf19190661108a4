//! The 9-byte gamepad input report.

use crate::error::ReportError;
use crate::hat::HAT_MASK;
use crate::types::{Buttons, GamepadState, Joysticks};

/// Size of the report in bytes (excluding the report ID).
pub const REPORT_SIZE: usize = 9;

/// An encoded gamepad input report.
///
/// This matches the input report declared by [`REPORT_DESCRIPTOR`](crate::REPORT_DESCRIPTOR).
/// Reports compare by their bytes, so two states that encode identically are
/// the same report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadReport([u8; REPORT_SIZE]);

impl GamepadReport {
    /// Report for the neutral state.
    pub const NEUTRAL: Self = Self([0; REPORT_SIZE]);

    /// Encode a gamepad state.
    ///
    /// Only the low 5 bits of the hat byte are kept.
    #[must_use]
    pub fn encode(state: &GamepadState) -> Self {
        let buttons = state.buttons.raw().to_le_bytes();
        Self([
            buttons[0],
            buttons[1],
            buttons[2],
            buttons[3],
            state.joysticks.x as u8,
            state.joysticks.y as u8,
            state.joysticks.z as u8,
            state.joysticks.rz as u8,
            state.hat & HAT_MASK,
        ])
    }

    /// Decode a report back into a gamepad state.
    ///
    /// Axis bytes are taken as-is, so a `0x80` byte decodes to `-128` even
    /// though [`validate_axis`](crate::validate_axis) would never produce it.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidLength`] if `bytes` is not exactly 9 bytes.
    pub fn decode(bytes: &[u8]) -> Result<GamepadState, ReportError> {
        let report = Self::from_slice(bytes)?;
        Ok(GamepadState {
            buttons: report.buttons(),
            joysticks: report.joysticks(),
            hat: report.hat(),
        })
    }

    /// Wrap raw report bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidLength`] if `bytes` is not exactly 9 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ReportError> {
        let bytes: [u8; REPORT_SIZE] = bytes
            .try_into()
            .map_err(|_| ReportError::InvalidLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    /// The report bytes, ready for the transport.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; REPORT_SIZE] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        Buttons(u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]))
    }

    #[inline]
    #[must_use]
    pub fn joysticks(&self) -> Joysticks {
        Joysticks {
            x: self.0[4] as i8,
            y: self.0[5] as i8,
            z: self.0[6] as i8,
            rz: self.0[7] as i8,
        }
    }

    /// The hat byte (already masked to 5 bits).
    #[inline]
    #[must_use]
    pub fn hat(&self) -> u8 {
        self.0[8]
    }
}

impl From<&GamepadState> for GamepadReport {
    fn from(state: &GamepadState) -> Self {
        Self::encode(state)
    }
}

impl AsRef<[u8]> for GamepadReport {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

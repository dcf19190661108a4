//! Core gamepad types: Buttons, Joysticks, GamepadState.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::error::ReportError;

/// Number of buttons carried by the report.
pub const NUM_BUTTONS: u8 = 32;

/// Lowest joystick value. `-128` is excluded to keep the range symmetric.
pub const AXIS_MIN: i8 = -127;

/// Highest joystick value.
pub const AXIS_MAX: i8 = 127;

/// Button state represented as a 32-bit mask.
///
/// Buttons are numbered from 1, as controllers usually label them:
/// button `n` lives in bit `n - 1`.
///
/// # Example
///
/// ```
/// use hid_gamepad_proto::Buttons;
///
/// let buttons = Buttons::from_numbers(&[1, 3]).unwrap();
/// assert!(buttons.is_pressed(1));
/// assert!(!buttons.is_pressed(2));
/// assert_eq!(buttons.raw(), 0b101);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u32);

impl Buttons {
    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// All 32 buttons pressed.
    pub const ALL: Self = Self(u32::MAX);

    /// Mask for a single button number.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidButton`] if `number` is not in `1..=32`.
    #[inline]
    pub const fn from_number(number: u8) -> Result<Self, ReportError> {
        if number < 1 || number > NUM_BUTTONS {
            return Err(ReportError::InvalidButton(number));
        }
        Ok(Self(1 << (number - 1)))
    }

    /// Combined mask for a batch of button numbers.
    ///
    /// Either every number is valid and the union is returned, or the first
    /// invalid number is reported.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidButton`] for the first number outside `1..=32`.
    pub fn from_numbers(numbers: &[u8]) -> Result<Self, ReportError> {
        numbers
            .iter()
            .try_fold(Self::NONE, |acc, &n| Ok(acc | Self::from_number(n)?))
    }

    /// Check if all buttons in `other` are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Buttons) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if button `number` is pressed. Out-of-range numbers are never pressed.
    #[inline]
    #[must_use]
    pub const fn is_pressed(self, number: u8) -> bool {
        match Self::from_number(number) {
            Ok(button) => self.contains(button),
            Err(_) => false,
        }
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, buttons: Buttons, pressed: bool) {
        if pressed {
            self.0 |= buttons.0;
        } else {
            self.0 &= !buttons.0;
        }
    }

    /// Get the raw u32 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Check that a joystick value lies in `-127..=127` and narrow it to `i8`.
///
/// # Errors
///
/// Returns [`ReportError::InvalidAxis`] for anything outside the range, including `-128`.
#[inline]
pub const fn validate_axis(value: i16) -> Result<i8, ReportError> {
    if value < AXIS_MIN as i16 || value > AXIS_MAX as i16 {
        return Err(ReportError::InvalidAxis(value));
    }
    Ok(value as i8)
}

/// Two joysticks: `x`/`y` on the first, `z`/`rz` (z rotation) on the second.
///
/// The host may interpret the axes differently; these are the usage names
/// from the report descriptor.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Joysticks {
    pub x: i8,
    pub y: i8,
    pub z: i8,
    pub rz: i8,
}

impl Joysticks {
    pub const NEUTRAL: Self = Self {
        x: 0,
        y: 0,
        z: 0,
        rz: 0,
    };
}

/// Complete gamepad state snapshot.
///
/// Contains:
/// - 32 buttons (bitmask)
/// - 4 joystick axes (signed, `-127..=127`)
/// - the hat byte (low 4 bits: direction code, bit 4: reserved)
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadState {
    pub buttons: Buttons,
    pub joysticks: Joysticks,
    pub hat: u8,
}

impl GamepadState {
    /// Create a neutral state (no buttons pressed, sticks centered, hat 0).
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            joysticks: Joysticks::NEUTRAL,
            hat: 0,
        }
    }
}

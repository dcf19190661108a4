//! Hat switch (d-pad) encodings.
//!
//! The hat reports one of eight compass directions or "none". It can be set
//! either from a [`HatDirection`] code or from the levels of the four
//! physical switches ([`HatFlags`]), which are looked up in a fixed table of
//! the nine reachable combinations.

use crate::error::ReportError;

/// Bits of the hat byte that go on the wire.
pub const HAT_MASK: u8 = 0b1_1111;

/// Bits of the hat byte holding the direction code.
pub const HAT_CODE_MASK: u8 = 0b0_1111;

/// Reserved bit above the direction code. Kept as-is when a direction code is
/// applied, cleared by every other hat update.
pub const HAT_RESERVED_BIT: u8 = 0b1_0000;

/// Hat switch direction codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum HatDirection {
    Up = 0x00,
    UpRight = 0x01,
    Right = 0x02,
    DownRight = 0x03,
    Down = 0x04,
    DownLeft = 0x05,
    Left = 0x06,
    UpLeft = 0x07,
    /// Centered. Outside the descriptor's logical range, so hosts read it as the null state.
    None = 0x0F,
}

impl HatDirection {
    /// Every valid direction, in code order.
    pub const ALL: [HatDirection; 9] = [
        HatDirection::Up,
        HatDirection::UpRight,
        HatDirection::Right,
        HatDirection::DownRight,
        HatDirection::Down,
        HatDirection::DownLeft,
        HatDirection::Left,
        HatDirection::UpLeft,
        HatDirection::None,
    ];

    /// The wire code for this direction.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for HatDirection {
    type Error = ReportError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.code() == code)
            .ok_or(ReportError::InvalidHatDirection(code))
    }
}

impl From<HatDirection> for u8 {
    fn from(direction: HatDirection) -> Self {
        direction.code()
    }
}

/// A single physical hat switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HatSwitch {
    Up,
    Right,
    Down,
    Left,
}

/// Levels of the four hat switches.
///
/// # Example
///
/// ```
/// use hid_gamepad_proto::{HatDirection, HatFlags, HatSwitch};
///
/// let flags = HatFlags::NONE.with(HatSwitch::Up, true).with(HatSwitch::Right, true);
/// assert_eq!(flags.direction(), Ok(HatDirection::UpRight));
///
/// // Opposite switches do not form a direction.
/// assert!(HatFlags::new(true, false, true, false).direction().is_err());
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HatFlags {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

/// The nine switch combinations a physical d-pad can produce.
const DIRECTION_TABLE: [(HatFlags, HatDirection); 9] = [
    (HatFlags::new(false, false, false, false), HatDirection::None),
    (HatFlags::new(true, false, false, false), HatDirection::Up),
    (HatFlags::new(true, true, false, false), HatDirection::UpRight),
    (HatFlags::new(false, true, false, false), HatDirection::Right),
    (HatFlags::new(false, true, true, false), HatDirection::DownRight),
    (HatFlags::new(false, false, true, false), HatDirection::Down),
    (HatFlags::new(false, false, true, true), HatDirection::DownLeft),
    (HatFlags::new(false, false, false, true), HatDirection::Left),
    (HatFlags::new(true, false, false, true), HatDirection::UpLeft),
];

impl HatFlags {
    /// All switches released.
    pub const NONE: Self = Self::new(false, false, false, false);

    #[must_use]
    pub const fn new(up: bool, right: bool, down: bool, left: bool) -> Self {
        Self {
            up,
            right,
            down,
            left,
        }
    }

    /// Copy of these flags with one switch changed.
    #[must_use]
    pub fn with(mut self, switch: HatSwitch, pressed: bool) -> Self {
        match switch {
            HatSwitch::Up => self.up = pressed,
            HatSwitch::Right => self.right = pressed,
            HatSwitch::Down => self.down = pressed,
            HatSwitch::Left => self.left = pressed,
        }
        self
    }

    /// Look up the direction these switches describe.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidHatFlags`] for combinations outside the
    /// table: opposite pairs, or three or more switches at once.
    pub fn direction(self) -> Result<HatDirection, ReportError> {
        DIRECTION_TABLE
            .iter()
            .find(|(flags, _)| *flags == self)
            .map(|&(_, direction)| direction)
            .ok_or(ReportError::InvalidHatFlags(self))
    }
}

impl From<[bool; 4]> for HatFlags {
    /// Order is up, right, down, left.
    fn from([up, right, down, left]: [bool; 4]) -> Self {
        Self::new(up, right, down, left)
    }
}

impl TryFrom<[u8; 4]> for HatFlags {
    type Error = ReportError;

    /// Order is up, right, down, left. Each level must be 0 or 1.
    fn try_from(levels: [u8; 4]) -> Result<Self, Self::Error> {
        let mut flags = [false; 4];
        for (flag, &level) in flags.iter_mut().zip(levels.iter()) {
            *flag = match level {
                0 => false,
                1 => true,
                _ => {
                    return Err(ReportError::InvalidHatFlags(Self::new(
                        levels[0] != 0,
                        levels[1] != 0,
                        levels[2] != 0,
                        levels[3] != 0,
                    )))
                }
            };
        }
        Ok(Self::from(flags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_codes() {
        assert_eq!(HatDirection::Up.code(), 0x00);
        assert_eq!(HatDirection::UpRight.code(), 0x01);
        assert_eq!(HatDirection::DownLeft.code(), 0x05);
        assert_eq!(HatDirection::UpLeft.code(), 0x07);
        assert_eq!(HatDirection::None.code(), 0x0F);
    }

    #[test]
    fn test_try_from_code() {
        for direction in HatDirection::ALL {
            assert_eq!(HatDirection::try_from(direction.code()), Ok(direction));
        }
        assert_eq!(
            HatDirection::try_from(0x08),
            Err(ReportError::InvalidHatDirection(0x08))
        );
        assert_eq!(
            HatDirection::try_from(0x1F),
            Err(ReportError::InvalidHatDirection(0x1F))
        );
    }

    #[test]
    fn test_flags_table() {
        let cases: [([u8; 4], HatDirection); 9] = [
            ([1, 0, 0, 0], HatDirection::Up),
            ([1, 1, 0, 0], HatDirection::UpRight),
            ([0, 1, 0, 0], HatDirection::Right),
            ([0, 1, 1, 0], HatDirection::DownRight),
            ([0, 0, 1, 0], HatDirection::Down),
            ([0, 0, 1, 1], HatDirection::DownLeft),
            ([0, 0, 0, 1], HatDirection::Left),
            ([1, 0, 0, 1], HatDirection::UpLeft),
            ([0, 0, 0, 0], HatDirection::None),
        ];
        for (levels, expected) in cases {
            let flags = HatFlags::try_from(levels).unwrap();
            assert_eq!(flags.direction(), Ok(expected), "levels {levels:?}");
        }
    }

    #[test]
    fn test_unreachable_combinations_rejected() {
        let up_down = HatFlags::new(true, false, true, false);
        assert_eq!(up_down.direction(), Err(ReportError::InvalidHatFlags(up_down)));

        let left_right = HatFlags::new(false, true, false, true);
        assert!(left_right.direction().is_err());

        let three = HatFlags::new(true, true, true, false);
        assert!(three.direction().is_err());

        let all = HatFlags::from([true; 4]);
        assert!(all.direction().is_err());
    }

    #[test]
    fn test_levels_must_be_binary() {
        assert!(matches!(
            HatFlags::try_from([2u8, 0, 0, 0]),
            Err(ReportError::InvalidHatFlags(_))
        ));
        assert_eq!(
            HatFlags::try_from([0u8, 1, 0, 0]),
            Ok(HatFlags::new(false, true, false, false))
        );
    }

    #[test]
    fn test_with_switch() {
        let flags = HatFlags::NONE
            .with(HatSwitch::Down, true)
            .with(HatSwitch::Left, true);
        assert_eq!(flags.direction(), Ok(HatDirection::DownLeft));

        let flags = flags.with(HatSwitch::Down, false);
        assert_eq!(flags.direction(), Ok(HatDirection::Left));
    }
}

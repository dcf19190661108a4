//! Wire format for a generic HID gamepad with 32 buttons, two joysticks and a hat switch.
//!
//! This crate describes the 9-byte input report and the static report
//! descriptor that declares it to the host:
//!
//! - **Types**: Controller state
//!   - [`Buttons`] - 32-button bitmask (button `n` is bit `n - 1`)
//!   - [`Joysticks`] - X/Y and Z/Rz axis pairs, each in `-127..=127`
//!   - [`GamepadState`] - Complete controller snapshot
//!
//! - **Hat switch**: D-pad encodings
//!   - [`HatDirection`] - The nine direction codes
//!   - [`HatFlags`] - Up/right/down/left switch levels, mapped to a direction
//!
//! - **Report**: Serialization
//!   - [`GamepadReport`] - The encoded 9-byte report
//!
//! - **Descriptor**: [`REPORT_DESCRIPTOR`] and the report ID and lengths
//!
//! # Report Layout
//!
//! ```text
//! offset  width  field
//! 0       4      buttons      u32, little-endian, bit n = button n+1
//! 4       1      joystick x   i8
//! 5       1      joystick y   i8
//! 6       1      joystick z   i8
//! 7       1      joystick rz  i8
//! 8       1      hat          u8, low 5 bits
//! ```
//!
//! # Example
//!
//! ```
//! use hid_gamepad_proto::{Buttons, GamepadReport, GamepadState, HatDirection};
//!
//! let mut state = GamepadState::neutral();
//! state.buttons = Buttons::from_number(1).unwrap() | Buttons::from_number(9).unwrap();
//! state.joysticks.x = -127;
//! state.hat = HatDirection::DownLeft.code();
//!
//! let report = GamepadReport::encode(&state);
//! assert_eq!(report.as_bytes(), &[0x01, 0x01, 0x00, 0x00, 0x81, 0x00, 0x00, 0x00, 0x05]);
//! assert_eq!(GamepadReport::decode(report.as_bytes()).unwrap(), state);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod descriptor;
pub mod error;
pub mod hat;
pub mod report;
pub mod types;

pub use descriptor::{IN_REPORT_LENGTH, OUT_REPORT_LENGTH, REPORT_DESCRIPTOR, REPORT_ID};
pub use error::ReportError;
pub use hat::{HatDirection, HatFlags, HatSwitch, HAT_CODE_MASK, HAT_MASK, HAT_RESERVED_BIT};
pub use report::{GamepadReport, REPORT_SIZE};
pub use types::{
    validate_axis, Buttons, GamepadState, Joysticks, AXIS_MAX, AXIS_MIN, NUM_BUTTONS,
};

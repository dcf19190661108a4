//! Platform-agnostic gamepad state encoder.
//!
//! This crate tracks the logical state of a 32-button, two-joystick, hat-switch
//! gamepad and turns every change into a 9-byte HID input report. Reports are
//! only handed to the transport when their bytes differ from the last one sent.
//!
//! # Overview
//!
//! - [`encoder`]: The state owner ([`GamepadEncoder`], [`JoystickMove`])
//! - [`sink`]: Transport trait ([`ReportSink`])
//! - [`keypad`]: Key grid edge detection and key-to-gamepad mapping ([`KeyTracker`], [`KeyMapper`])
//!
//! Report types and the HID descriptor come from [`hid_gamepad_proto`] and are
//! re-exported here.
//!
//! # Example
//!
//! ```rust
//! use core::future::Future;
//! use hid_gamepad::{GamepadEncoder, GamepadReport, HatDirection, JoystickMove, ReportSink, SinkError};
//!
//! struct PrintSink;
//!
//! impl ReportSink for PrintSink {
//!     fn send_report(&mut self, report: &GamepadReport) -> impl Future<Output = Result<(), SinkError>> {
//!         println!("{:02x?}", report.as_bytes());
//!         core::future::ready(Ok(()))
//!     }
//! }
//!
//! async fn demo<D: embedded_hal_async::delay::DelayNs>(delay: &mut D) -> Result<(), hid_gamepad::EncoderError> {
//!     let mut gamepad = GamepadEncoder::new(PrintSink, delay).await?;
//!     gamepad.press_buttons(&[1, 2]).await?;
//!     gamepad.move_joysticks(JoystickMove::new().x(100).y(-50)).await?;
//!     gamepad.set_hat_direction(HatDirection::Right).await?;
//!     gamepad.reset_all().await
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log and format through defmt (for embedded logging)
//! - **`log`**: Log through the `log` facade
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This must go first so the logging macros are visible to the other modules.
#[macro_use]
mod fmt;

pub mod encoder;
pub mod keypad;
pub mod sink;

#[cfg(test)]
mod test_util;

pub use encoder::{EncoderConfig, EncoderError, GamepadEncoder, JoystickMove, INIT_RETRY_DELAY_MS};
pub use keypad::{key_action, KeyAction, KeyEvent, KeyMapper, KeyTracker, NUM_KEYS};
pub use sink::{ReportSink, SinkError};

// Re-export report types at crate root
pub use hid_gamepad_proto::{
    Buttons, GamepadReport, GamepadState, HatDirection, HatFlags, HatSwitch, Joysticks,
    ReportError, REPORT_DESCRIPTOR, REPORT_ID, REPORT_SIZE,
};

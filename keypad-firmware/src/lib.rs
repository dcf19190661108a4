//! 16-key USB HID gamepad for RP2040.
//!
//! This crate drives a [`GamepadEncoder`] from a 4x4 grid of keys and sends
//! its reports over USB HID.
//!
//! # Overview
//!
//! The firmware runs on an RP2040 board and:
//! 1. Polls 16 active-low keys every few milliseconds
//! 2. Maps each key to a gamepad button or a hat switch
//! 3. Sends a USB HID report whenever the gamepad state changes
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | Keys 0-15 | 21 down to 6 | Key `n` on GPIO `21 - n`, pulled up, pressed = low |
//! | LED      | 25   | On-board LED (error indicator) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with two tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Gamepad Task**: Scans the keypad and feeds the encoder, which owns the
//!   HID writer through [`UsbHidSink`]
//!
//! # Modules
//!
//! - [`keypad`]: Key scanning ([`Keypad`]); the key map is [`KeyMapper`]
//! - [`usb_output`]: USB HID transport ([`UsbHidSink`], [`configure_usb_hid`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

// Re-export core types for convenience
pub use hid_gamepad::{
    key_action, EncoderError, GamepadEncoder, GamepadReport, HatDirection, HatFlags, HatSwitch,
    KeyAction, KeyEvent, KeyMapper, ReportSink, SinkError, NUM_KEYS,
};

pub mod keypad;
pub mod usb_output;

pub use keypad::Keypad;
pub use usb_output::{configure_usb_hid, GamepadHidWriter, GamepadRequestHandler, UsbHidSink};

//! HID report descriptor for the gamepad.
//!
//! Consumed by the transport layer when it registers the HID interface. The
//! encoder never parses it; the field order and widths here must match
//! [`GamepadReport`](crate::GamepadReport).

/// Report ID the descriptor assigns to the input report.
pub const REPORT_ID: u8 = 4;

/// Input report length in bytes, excluding the report ID.
pub const IN_REPORT_LENGTH: usize = 9;

/// Output report length. The gamepad receives no reports.
pub const OUT_REPORT_LENGTH: usize = 0;

/// Generic Desktop usage page.
pub const USAGE_PAGE: u8 = 0x01;

/// Game Pad usage.
pub const USAGE: u8 = 0x05;

/// Gamepad report descriptor.
///
/// Declares:
/// - 32 buttons, 1 bit each
/// - X, Y, Z and Rz axes, signed 8-bit, logical range -127..127
/// - a hat switch in one byte, logical range 0..7 with a null state
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, USAGE_PAGE, // Usage Page (Generic Desktop)
    0x09, USAGE,      // Usage (Game Pad)
    0xA1, 0x01,       // Collection (Application)
    0x85, REPORT_ID,  //   Report ID (4)
    //
    // --- Buttons (32 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x20, //   Usage Maximum (Button 32)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x20, //   Report Count (32)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Joysticks ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x15, 0x81, //   Logical Minimum (-127)
    0x25, 0x7F, //   Logical Maximum (127)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Hat switch (one byte, 5 bits used) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x39, //   Usage (Hat Switch)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x01, //   Report Count (1)
    0x65, 0x14, //   Unit (English Rotation, Degrees)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    //
    0xC0, // End Collection
];

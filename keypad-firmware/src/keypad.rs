//! 4x4 key grid polled from GPIO inputs.
//!
//! The key map and edge detection live in [`hid_gamepad::keypad`]; this module
//! only samples the pins.

use embedded_hal::digital::InputPin;
use heapless::Vec;
use hid_gamepad::{KeyEvent, KeyTracker, NUM_KEYS};

/// Active-low key inputs.
pub struct Keypad<P> {
    pins: [P; NUM_KEYS],
    keys: KeyTracker,
}

impl<P: InputPin> Keypad<P> {
    /// Create a keypad from its 16 pins, ordered by key number.
    ///
    /// Every key starts released.
    pub fn new(pins: [P; NUM_KEYS]) -> Self {
        Self {
            pins,
            keys: KeyTracker::new(),
        }
    }

    /// Read every pin and return the keys that changed since the last scan.
    ///
    /// A pin that fails to read keeps its previous level.
    pub fn scan(&mut self) -> Vec<KeyEvent, NUM_KEYS> {
        let previous = self.keys.pressed();
        let mut levels = 0u16;
        for (key, pin) in self.pins.iter_mut().enumerate() {
            let mask = 1u16 << key;
            if pin.is_low().unwrap_or(previous & mask != 0) {
                levels |= mask;
            }
        }
        self.keys.update(levels)
    }
}

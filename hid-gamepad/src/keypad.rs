//! 4x4 key grid mapped onto the gamepad.
//!
//! Keys are numbered 0 to 15. Key `n` sits at column `x = n % 4`, row
//! `y = n / 4`. Four keys form a d-pad; every other key is a gamepad button.
//!
//! | Key position | Action |
//! |--------------|--------|
//! | (1, 2)       | Hat up |
//! | (0, 1)       | Hat left |
//! | (0, 2)       | Hat down |
//! | (0, 3)       | Hat right |
//! | any other    | Button `n + 1` |
//!
//! Nothing here touches hardware. The caller samples its inputs into a `u16`
//! (bit `n` set while key `n` is held), [`KeyTracker`] turns the samples into
//! [`KeyEvent`]s and [`KeyMapper`] applies them to a [`GamepadEncoder`].

use heapless::Vec;
use hid_gamepad_proto::{HatDirection, HatFlags, HatSwitch};

use crate::encoder::{EncoderError, GamepadEncoder};
use crate::sink::ReportSink;

/// Number of keys on the grid.
pub const NUM_KEYS: usize = 16;

/// Keys per row.
const COLUMNS: u8 = 4;

/// What a key does when pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// Drives one switch of the hat.
    Hat(HatSwitch),
    /// Holds a gamepad button (numbered from 1).
    Button(u8),
}

/// Map a key number to its action.
///
/// Returns `None` for keys outside `0..NUM_KEYS`.
#[must_use]
pub const fn key_action(key: u8) -> Option<KeyAction> {
    if key as usize >= NUM_KEYS {
        return None;
    }
    let action = match (key % COLUMNS, key / COLUMNS) {
        (1, 2) => KeyAction::Hat(HatSwitch::Up),
        (0, 1) => KeyAction::Hat(HatSwitch::Left),
        (0, 2) => KeyAction::Hat(HatSwitch::Down),
        (0, 3) => KeyAction::Hat(HatSwitch::Right),
        _ => KeyAction::Button(key + 1),
    };
    Some(action)
}

/// A key changing level between two samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub key: u8,
    pub pressed: bool,
}

/// Edge detection over sampled key levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyTracker {
    /// Bit `n` set while key `n` is held.
    pressed: u16,
}

impl KeyTracker {
    /// Create a tracker with every key released.
    pub const fn new() -> Self {
        Self { pressed: 0 }
    }

    /// Keys currently held, one bit per key.
    pub const fn pressed(&self) -> u16 {
        self.pressed
    }

    /// Record a new sample and return the keys that changed, lowest key first.
    pub fn update(&mut self, levels: u16) -> Vec<KeyEvent, NUM_KEYS> {
        let changed = self.pressed ^ levels;
        self.pressed = levels;

        let mut events = Vec::new();
        for key in 0..NUM_KEYS as u8 {
            let mask = 1u16 << key;
            if changed & mask != 0 {
                // At most one event per key, so this never overflows.
                let _ = events.push(KeyEvent {
                    key,
                    pressed: levels & mask != 0,
                });
            }
        }
        events
    }
}

/// Applies key events to a [`GamepadEncoder`], tracking the d-pad switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyMapper {
    hat: HatFlags,
}

impl KeyMapper {
    /// Create a mapper with every d-pad switch released.
    pub const fn new() -> Self {
        Self {
            hat: HatFlags::NONE,
        }
    }

    /// Current d-pad switch levels.
    pub const fn hat_flags(&self) -> HatFlags {
        self.hat
    }

    /// Update one d-pad switch and return the direction the switches form.
    ///
    /// A combination with no direction (up and down together, for example) is
    /// logged and yields [`HatDirection::None`].
    pub fn update_hat(&mut self, switch: HatSwitch, pressed: bool) -> HatDirection {
        self.hat = self.hat.with(switch, pressed);
        match self.hat.direction() {
            Ok(direction) => direction,
            Err(_) => {
                warn!("Hat switches {:?} do not form a direction", self.hat);
                HatDirection::None
            }
        }
    }

    /// Apply one key event to the gamepad.
    ///
    /// Events for keys outside the grid are ignored.
    pub async fn handle<S: ReportSink>(
        &mut self,
        gamepad: &mut GamepadEncoder<S>,
        event: KeyEvent,
    ) -> Result<(), EncoderError> {
        match key_action(event.key) {
            Some(KeyAction::Button(n)) if event.pressed => gamepad.press_buttons(&[n]).await,
            Some(KeyAction::Button(n)) => gamepad.release_buttons(&[n]).await,
            Some(KeyAction::Hat(switch)) => {
                let direction = self.update_hat(switch, event.pressed);
                gamepad.set_hat_direction(direction).await
            }
            None => {
                debug!("Ignoring event for key {}", event.key);
                Ok(())
            }
        }
    }
}

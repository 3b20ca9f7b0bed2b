// Neokeys Input Layer - Key Events
// Key transition events and the wrapping millisecond clock they are stamped with

use std::fmt;

use crate::{Action, Keycode};

/// Reading of the controller's free-running millisecond timer.
///
/// The counter is 16 bits wide and wraps roughly every 65 seconds, so durations must always
/// be computed with [`Timestamp::elapsed_since`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timestamp(pub u16);

impl Timestamp {
    /// Milliseconds from `earlier` to `self`, correct across a single counter wrap
    pub fn elapsed_since(self, earlier: Timestamp) -> u16 {
        self.0.wrapping_sub(earlier.0)
    }
}

impl From<u16> for Timestamp {
    fn from(ms: u16) -> Self {
        Timestamp(ms)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// A single key transition, as delivered by the event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub keycode: Keycode,
    pub action: Action,
    pub time: Timestamp,
}

impl KeyEvent {
    /// Build an event stamped with a raw timer reading in milliseconds
    pub fn new(keycode: impl Into<Keycode>, action: Action, ms: u16) -> Self {
        Self {
            keycode: keycode.into(),
            action,
            time: Timestamp(ms),
        }
    }

    pub fn press(keycode: impl Into<Keycode>, ms: u16) -> Self {
        Self::new(keycode, Action::Press, ms)
    }

    pub fn release(keycode: impl Into<Keycode>, ms: u16) -> Self {
        Self::new(keycode, Action::Release, ms)
    }

    pub fn is_pressed(&self) -> bool {
        self.action.is_pressed()
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {}", self.action, self.keycode, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CustomKey, Key};

    #[test]
    fn test_elapsed_without_wrap() {
        assert_eq!(Timestamp(250).elapsed_since(Timestamp(100)), 150);
        assert_eq!(Timestamp(7).elapsed_since(Timestamp(7)), 0);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        // Counter wrapped between the two readings
        assert_eq!(Timestamp(50).elapsed_since(Timestamp(65500)), 86);
        assert_eq!(Timestamp(0).elapsed_since(Timestamp(u16::MAX)), 1);
    }

    #[test]
    fn test_event_constructors() {
        let down = KeyEvent::press(Key::A, 10);
        assert!(down.is_pressed());
        assert_eq!(down.keycode, Keycode::Basic(Key::A));
        assert_eq!(down.time, Timestamp(10));

        let up = KeyEvent::release(CustomKey::Neo2RMod3, 20);
        assert!(!up.is_pressed());
        assert_eq!(up.keycode, Keycode::Custom(CustomKey::Neo2RMod3));
    }

    #[test]
    fn test_event_display() {
        let event = KeyEvent::press(Key::Y, 42);
        assert_eq!(event.to_string(), "press Y @ 42ms");
    }
}

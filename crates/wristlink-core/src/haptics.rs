//! Haptic actuator collaborator.

/// One-shot vibration, used as the disconnect alert.
pub trait Haptics {
    fn pulse(&mut self);
}

//! Hardware-independent companion-synchronization core for wristlink
//!
//! This crate contains all platform-agnostic logic for the wristlink wrist
//! display client: the outbound command protocol, the inbound update
//! dispatcher, the per-topic refresh scheduler, and the view-state machine
//! that arbitrates what the watch face shows.
//!
//! The transport, rendering surface, timer source, and haptic actuator are
//! collaborator traits implemented by firmware on device and by mocks in the
//! simulator and tests. It is `#![no_std]` so it compiles on both embedded
//! targets and desktop hosts.

#![no_std]

pub mod app;
pub mod channel;
pub mod clock;
pub mod config;
pub mod display;
pub mod haptics;
pub mod inbound;
pub mod outbound;
pub mod protocol;
pub mod state;
pub mod timers;

#[cfg(test)]
pub(crate) mod test_support;

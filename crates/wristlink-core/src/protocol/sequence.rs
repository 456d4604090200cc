//! Outbound message sequence numbering.

/// Reserved counter value meaning "resynchronize"; never stamped on a normal
/// command message.
pub const SEQUENCE_SENTINEL: u32 = 0xFFFF_FFFF;

/// Monotonically increasing message sequence counter with wraparound.
///
/// The counter skips [`SEQUENCE_SENTINEL`] on increment so a normal send can
/// never be mistaken for a reset. Owned by the outbound command dispatcher,
/// which is the single caller of [`next`](SequenceCounter::next).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceCounter {
    value: u32,
}

impl SequenceCounter {
    /// Starts just below the sentinel so the counter exercises its wraparound
    /// on the very first send.
    pub const fn new() -> Self {
        Self {
            value: SEQUENCE_SENTINEL - 1,
        }
    }

    /// Returns the next sequence number. Infallible.
    pub fn next(&mut self) -> u32 {
        self.value = self.value.wrapping_add(1);
        if self.value == SEQUENCE_SENTINEL {
            self.value = 1;
        }
        self.value
    }

    /// Parks the counter on the sentinel. The caller must follow up with a
    /// standalone reset message so the host actually observes it.
    pub fn reset(&mut self) {
        self.value = SEQUENCE_SENTINEL;
    }

    /// Current counter value without advancing it.
    pub fn current(&self) -> u32 {
        self.value
    }
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

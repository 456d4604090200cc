//! Outbound command dispatch.
//!
//! Single choke point for all client-to-host traffic: every send acquires a
//! channel transaction first, then stamps a sequence number, writes exactly
//! one command tuple, and commits. A busy channel drops the command with no
//! side effects — the sequence counter is only advanced once a transaction
//! is held, so a dropped send never consumes a number. Delivery is
//! best-effort by design; there is no retry.

use log::{debug, warn};

use crate::channel::MessageChannel;
use crate::protocol::keys::wire;
use crate::protocol::{CommandKey, EncodeError, MessageWriter, SEQUENCE_SENTINEL, SequenceCounter};

/// Payload stamped on commands that carry none.
pub const NO_PAYLOAD: i8 = -1;

/// Owns the sequence counter; the sole caller of
/// [`SequenceCounter::next`].
#[derive(Debug, Default)]
pub struct CommandSender {
    sequence: SequenceCounter,
}

impl CommandSender {
    pub fn new() -> Self {
        Self {
            sequence: SequenceCounter::new(),
        }
    }

    /// Sends one command, with [`NO_PAYLOAD`] substituted when `payload` is
    /// `None`. Transient transport failure drops the command silently.
    pub fn send<C: MessageChannel>(
        &mut self,
        channel: &mut C,
        key: CommandKey,
        payload: Option<i8>,
    ) {
        if key == CommandKey::ResetSequence {
            self.send_sequence_reset(channel);
            return;
        }

        let Ok(mut msg) = self.begin(channel, key) else {
            return;
        };

        let seq = self.sequence.next();
        if let Err(e) = write_command(&mut msg, seq, key, payload.unwrap_or(NO_PAYLOAD)) {
            warn!("encoding {key:?} failed: {e}");
            return;
        }

        if let Err(e) = channel.commit(msg) {
            debug!("command {key:?} dropped on commit: {e}");
        }
    }

    /// Sends a standalone resynchronization message: a bare sequence tuple
    /// carrying the sentinel, no command entry. Parks the counter on the
    /// sentinel only once a transaction is held.
    pub fn send_sequence_reset<C: MessageChannel>(&mut self, channel: &mut C) {
        let Ok(mut msg) = self.begin(channel, CommandKey::ResetSequence) else {
            return;
        };

        self.sequence.reset();
        if let Err(e) = msg.write_int32(wire::SEQUENCE_NUMBER, SEQUENCE_SENTINEL as i32) {
            warn!("encoding sequence reset failed: {e}");
            return;
        }

        if let Err(e) = channel.commit(msg) {
            debug!("sequence reset dropped on commit: {e}");
        }
    }

    #[cfg(test)]
    pub(crate) fn sequence(&self) -> &SequenceCounter {
        &self.sequence
    }

    fn begin<C: MessageChannel>(
        &mut self,
        channel: &mut C,
        key: CommandKey,
    ) -> Result<MessageWriter, ()> {
        match channel.begin() {
            Ok(msg) => Ok(msg),
            Err(e) => {
                debug!("command {key:?} dropped: {e}");
                Err(())
            }
        }
    }
}

fn write_command(
    msg: &mut MessageWriter,
    seq: u32,
    key: CommandKey,
    payload: i8,
) -> Result<(), EncodeError> {
    msg.write_int32(wire::SEQUENCE_NUMBER, seq as i32)?;
    msg.write_int8(key.wire_key(), payload)
}

//! Wire protocol between the watch client and the paired host.
//!
//! A message is a small dictionary of keyed, typed tuples. Outbound command
//! messages carry a sequence number so the host can detect drops and
//! reordering; inbound update messages carry any subset of the recognized
//! update keys.

pub mod codec;
pub mod keys;
pub mod sequence;

pub use codec::{DecodeError, EncodeError, Message, MessageWriter, Value};
pub use keys::{CommandKey, UpdateKey};
pub use sequence::{SEQUENCE_SENTINEL, SequenceCounter};

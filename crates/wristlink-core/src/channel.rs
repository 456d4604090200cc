//! Keyed message channel collaborator.
//!
//! The transport carries whole dictionary containers between the watch and
//! the paired host. Outbound traffic is transactional: the transport hands
//! out at most one writer at a time and may refuse immediately when busy.
//! Delivery is best-effort; a refused transaction is simply dropped by the
//! caller with no retry.

use thiserror_no_std::Error;

use crate::protocol::MessageWriter;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The transport cannot allocate an outbound buffer right now. Expected
    /// and non-fatal; the caller must abort the send with no side effects.
    #[error("outbound transport busy")]
    Busy,
    /// The transport rejected a committed message.
    #[error("outbound message rejected by transport")]
    Rejected,
}

/// Bidirectional keyed-message transport.
///
/// Inbound containers arrive through the hosting event loop, which validates
/// container integrity and then hands the raw bytes to
/// [`CompanionApp::handle_message`](crate::app::CompanionApp::handle_message).
pub trait MessageChannel {
    /// Opens an outbound transaction. Never blocks; fails with
    /// [`ChannelError::Busy`] when no buffer is available.
    fn begin(&mut self) -> Result<MessageWriter, ChannelError>;

    /// Submits a finished transaction.
    fn commit(&mut self, msg: MessageWriter) -> Result<(), ChannelError>;
}

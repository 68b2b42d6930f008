//! Error types.

use thiserror::Error;

/// Errors returned by a command exchange with the module.
///
/// None of these are retried by the driver. Timeouts are usually worth a
/// retry, see [`Error::is_timeout`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error<E> {
    /// The transport itself failed.
    #[error("transport error: {0:?}")]
    Transport(E),

    /// Nothing was received within the first-byte timeout.
    #[error("no reply received")]
    FirstByteTimeout,

    /// The reply stopped before it was complete.
    #[error("incomplete reply: expected {expected} bytes, got {received}")]
    PacketTimeout {
        /// Bytes received before the timeout.
        received: usize,
        /// Length of a complete reply.
        expected: usize,
    },

    /// The reply does not start with the marker byte of the command.
    ///
    /// Usually means the link is out of sync or the peer is not an E32.
    #[error("unexpected reply marker: expected 0x{expected:02X}, got 0x{actual:02X}")]
    Framing {
        /// Marker byte of the command.
        expected: u8,
        /// First byte actually received.
        actual: u8,
    },

    /// The reply payload could not be decoded.
    #[error("failed to decode reply payload")]
    Deserialization,

    /// A command frame or reply does not fit in the exchange buffer.
    #[error("frame of {len} bytes exceeds the exchange buffer")]
    Oversized {
        /// Length of the frame.
        len: usize,
    },
}

impl<E> Error<E> {
    /// Whether the module did not answer in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::FirstByteTimeout | Error::PacketTimeout { .. })
    }
}

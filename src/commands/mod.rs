//! Command implementations
//!
//! Every command starts with a single opcode byte followed by its parameters:
//!
//! | Command | Frame | Reply |
//! |---|---|---|
//! | [`ReadVersion`] | `C3 C3 C3` | `C3` + 3 bytes |
//! | [`ReadConfiguration`] | `C1 C1 C1` | `C0` + 5 bytes |
//! | [`SetConfiguration`] | `C2` + 5 bytes | none |
//! | [`SaveConfiguration`] | `C0` + 5 bytes | none |
//!
//! Read commands repeat their opcode three times and implement [`Query`],
//! which names the marker byte their reply must start with. Write commands
//! are not acknowledged by the module.
//!
//! # Important Notes
//! - The module only accepts commands in sleep mode (M0 = M1 = 1)
//! - Mode pins are not handled by this crate
//! - Commands must be sent at 9600 8N1, whatever the configured UART settings

use core::convert::Infallible;

use crate::{Command, ToByteArray};

mod configuration;
mod version;

pub use configuration::*;
pub use version::*;

/// A command answered by a fixed size reply
///
/// The reply is the [`REPLY_MARKER`](Query::REPLY_MARKER) byte followed by the
/// serialized [`ResponseParameters`](Command::ResponseParameters).
pub trait Query: Command<IdType = u8> {
    /// Leading byte of a well-formed reply
    const REPLY_MARKER: u8;
}

/// Parameters of the read commands: their own opcode, twice more
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatedOpcode(pub u8);

impl ToByteArray for RepeatedOpcode {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.0; 2])
    }
}

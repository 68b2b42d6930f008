//! Configuration commands
//!
//! The parameter block is always transferred whole. Updating a single field
//! means reading the block, changing the field and writing it back.

use crate::{Command, Configuration, NoParameters, Query, RepeatedOpcode};

/// ReadConfiguration command (0xC1)
///
/// Returns the current parameter block.
///
/// # Reply
/// `C0` followed by the 5 byte parameter block. The marker is the opcode of
/// [`SaveConfiguration`], not of the read command.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadConfiguration;

impl Command for ReadConfiguration {
    type IdType = u8;
    type CommandParameters = RepeatedOpcode;
    type ResponseParameters = Configuration;

    fn id() -> Self::IdType {
        0xC1
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        RepeatedOpcode(Self::id())
    }
}

impl Query for ReadConfiguration {
    const REPLY_MARKER: u8 = 0xC0;
}

/// SetConfiguration command (0xC2)
///
/// Applies a parameter block without saving it. The module falls back to its
/// saved configuration on power loss.
#[derive(Debug, Clone, Copy)]
pub struct SetConfiguration {
    /// Configuration to apply
    pub config: Configuration,
}

impl Command for SetConfiguration {
    type IdType = u8;
    type CommandParameters = Configuration;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0xC2
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// SaveConfiguration command (0xC0)
///
/// Applies a parameter block and saves it to non-volatile memory.
#[derive(Debug, Clone, Copy)]
pub struct SaveConfiguration {
    /// Configuration to apply and save
    pub config: Configuration,
}

impl Command for SaveConfiguration {
    type IdType = u8;
    type CommandParameters = Configuration;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0xC0
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

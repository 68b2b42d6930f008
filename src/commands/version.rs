//! Version commands

use crate::{Command, Query, RepeatedOpcode, Version};

/// ReadVersion command (0xC3)
///
/// Returns the frequency band, firmware version and feature flags.
///
/// # Reply
/// `C3` followed by the band code, version and features
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadVersion;

impl Command for ReadVersion {
    type IdType = u8;
    type CommandParameters = RepeatedOpcode;
    type ResponseParameters = Version;

    fn id() -> Self::IdType {
        0xC3
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        RepeatedOpcode(Self::id())
    }
}

impl Query for ReadVersion {
    const REPLY_MARKER: u8 = 0xC3;
}

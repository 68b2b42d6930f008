//! Version information
//!
//! Returned by [`ReadVersion`](crate::commands::ReadVersion). The payload is
//! three bytes long: frequency band code, firmware version and feature flags.

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::FromByteArray;

/// Frequency band the module was built for
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrequencyBand {
    /// Band code not known to this driver
    #[default]
    Invalid = 0,
    /// 433 MHz, band code 32
    Band433MHz = 1,
    /// 470 MHz, band code 38
    Band470MHz = 2,
    /// 868 MHz, band code 45
    Band868MHz = 3,
    /// 915 MHz, band code 44
    Band915MHz = 4,
    /// 170 MHz, band code 46
    Band170MHz = 5,
}

impl FrequencyBand {
    /// Every band, in ordinal order
    pub const ALL: [Self; 6] = [
        Self::Invalid,
        Self::Band433MHz,
        Self::Band470MHz,
        Self::Band868MHz,
        Self::Band915MHz,
        Self::Band170MHz,
    ];

    /// Maps the band code of a version reply
    ///
    /// Newer firmware may report bands this driver does not know about. Those
    /// map to [`FrequencyBand::Invalid`] instead of failing the decode.
    pub fn from_code(code: u8) -> Self {
        match code {
            32 => Self::Band433MHz,
            38 => Self::Band470MHz,
            45 => Self::Band868MHz,
            44 => Self::Band915MHz,
            46 => Self::Band170MHz,
            _ => Self::Invalid,
        }
    }

    /// Band code as reported by the module, `None` for [`FrequencyBand::Invalid`]
    pub fn code(self) -> Option<u8> {
        match self {
            Self::Invalid => None,
            Self::Band433MHz => Some(32),
            Self::Band470MHz => Some(38),
            Self::Band868MHz => Some(45),
            Self::Band915MHz => Some(44),
            Self::Band170MHz => Some(46),
        }
    }

    /// Whether the band code was recognized
    pub fn is_valid(self) -> bool {
        self != Self::Invalid
    }
}

bitflags! {
    /// Module feature flags
    ///
    /// The meaning of individual bits is not documented by the vendor, so
    /// every bit is kept as reported.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FeatureFlags: u8 {
        const _ = !0;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FeatureFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "FeatureFlags({=u8:#x})", self.bits())
    }
}

/// Device identity
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Version {
    /// Frequency band of the module
    pub frequency: FrequencyBand,
    /// Band code as reported, kept when `frequency` is `Invalid`
    pub frequency_code: u8,
    /// Firmware version
    pub version: u8,
    /// Feature flags, uninterpreted
    pub features: FeatureFlags,
}

impl FromByteArray for Version {
    type Error = Infallible;
    type Array = [u8; 3];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            frequency: FrequencyBand::from_code(bytes[0]),
            frequency_code: bytes[0],
            version: bytes[1],
            features: FeatureFlags::from_bits_retain(bytes[2]),
        })
    }
}

//! Text representation of the configuration
//!
//! Each enum has a single name table indexed by its raw value. [`Display`]
//! and [`FromStr`] both go through that table, so whatever is printed can be
//! parsed back.
//!
//! [`Setting`] parses a `VARIABLE VALUE` pair as accepted by command line
//! front ends and applies it to a [`Configuration`]:
//!
//! | Variable | Values |
//! |---|---|
//! | `address` | 0 to 65535 |
//! | `uart-parity` | `8N1`, `8O1`, `8E1` |
//! | `uart-rate` | `1200` to `115200` |
//! | `air-rate` | `300` to `19200` |
//! | `channel` | 0 to 255, 1MHz increments above 410MHz |
//! | `transmission-mode` | `transparent`, `fixed` |
//! | `io-drive-mode` | `OPEN_DRAIN`, `PUSH_PULL` |
//! | `wireless-wake-up-time` | 0 to 7, increments of 250ms above 250ms |
//! | `error-correction` | `enabled`, `disabled` |
//! | `transmission-power` | `30dBm`, `27dBm`, `24dBm`, `21dBm` |

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use thiserror::Error;

use crate::{
    AirRate, Configuration, FrequencyBand, IoDriveMode, TransmissionPower, UartParity, UartRate,
    Version, MAX_WAKE_UP_TIME,
};

const UART_PARITY_NAMES: [&str; 3] = ["8N1", "8O1", "8E1"];
const UART_RATE_NAMES: [&str; 8] = [
    "1200", "2400", "4800", "9600", "19200", "38400", "57600", "115200",
];
const AIR_RATE_NAMES: [&str; 6] = ["300", "1200", "2400", "4800", "9600", "19200"];
const IO_DRIVE_MODE_NAMES: [&str; 2] = ["OPEN_DRAIN", "PUSH_PULL"];
const TRANSMISSION_POWER_NAMES: [&str; 4] = ["30dBm", "27dBm", "24dBm", "21dBm"];
const FREQUENCY_BAND_NAMES: [&str; 6] = [
    "invalid", "433MHZ", "470MHZ", "868MHZ", "915MHZ", "170MHZ",
];

const TRANSMISSION_MODE_NAMES: [&str; 2] = ["fixed", "transparent"];
const ERROR_CORRECTION_NAMES: [&str; 2] = ["disabled", "enabled"];

fn lookup<T: Copy>(values: &[T], names: &[&str], name: &str) -> Option<T> {
    names
        .iter()
        .position(|candidate| *candidate == name)
        .map(|index| values[index])
}

fn lookup_flag(names: &[&str; 2], name: &str) -> Option<bool> {
    lookup(&[false, true], names, name)
}

/// A configuration variable that can be set by name
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `address`
    Address,
    /// `uart-parity`
    UartParity,
    /// `uart-rate`
    UartRate,
    /// `air-rate`
    AirRate,
    /// `channel`
    Channel,
    /// `transmission-mode`
    TransmissionMode,
    /// `io-drive-mode`
    IoDriveMode,
    /// `wireless-wake-up-time`
    WirelessWakeUpTime,
    /// `error-correction`
    ErrorCorrection,
    /// `transmission-power`
    TransmissionPower,
}

impl Field {
    /// Every variable, in display order
    pub const ALL: [Self; 10] = [
        Self::Address,
        Self::UartParity,
        Self::UartRate,
        Self::AirRate,
        Self::Channel,
        Self::TransmissionMode,
        Self::IoDriveMode,
        Self::WirelessWakeUpTime,
        Self::ErrorCorrection,
        Self::TransmissionPower,
    ];

    const NAMES: [&'static str; 10] = [
        "address",
        "uart-parity",
        "uart-rate",
        "air-rate",
        "channel",
        "transmission-mode",
        "io-drive-mode",
        "wireless-wake-up-time",
        "error-correction",
        "transmission-power",
    ];

    /// Variable name, as accepted by [`Setting::parse`]
    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Human readable list of the accepted values
    pub fn expected(self) -> &'static str {
        match self {
            Self::Address => "an integer between 0 and 65535",
            Self::UartParity => "one of 8N1, 8O1 or 8E1",
            Self::UartRate => "one of 1200, 2400, 4800, 9600, 19200, 38400, 57600 or 115200",
            Self::AirRate => "one of 300, 1200, 2400, 4800, 9600 or 19200",
            Self::Channel => "an integer between 0 and 255",
            Self::TransmissionMode => "either fixed or transparent",
            Self::IoDriveMode => "either OPEN_DRAIN or PUSH_PULL",
            Self::WirelessWakeUpTime => "an integer between 0 and 7",
            Self::ErrorCorrection => "either enabled or disabled",
            Self::TransmissionPower => "one of 30dBm, 27dBm, 24dBm or 21dBm",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = InvalidConfigurationValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, &Self::NAMES, s).ok_or(InvalidConfigurationValue::UnknownField)
    }
}

/// A variable name or value given as text was not recognized
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidConfigurationValue {
    /// The variable name is not one of [`Field::ALL`]
    #[error("unknown configuration variable")]
    UnknownField,

    /// The value is not accepted by the variable
    #[error("invalid value for {field}, expected {expected}")]
    InvalidValue {
        /// Variable the value was given for
        field: Field,
        /// Accepted values
        expected: &'static str,
    },
}

impl InvalidConfigurationValue {
    fn invalid(field: Field) -> Self {
        Self::InvalidValue {
            field,
            expected: field.expected(),
        }
    }
}

macro_rules! named_enum {
    ($ty:ty, $names:ident, $field:expr) => {
        impl $ty {
            /// Name used for display and parsing
            pub fn name(self) -> &'static str {
                $names[self as usize]
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = InvalidConfigurationValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                lookup(&<$ty>::ALL, &$names, s).ok_or(InvalidConfigurationValue::invalid($field))
            }
        }
    };
}

named_enum!(UartParity, UART_PARITY_NAMES, Field::UartParity);
named_enum!(UartRate, UART_RATE_NAMES, Field::UartRate);
named_enum!(AirRate, AIR_RATE_NAMES, Field::AirRate);
named_enum!(IoDriveMode, IO_DRIVE_MODE_NAMES, Field::IoDriveMode);
named_enum!(TransmissionPower, TRANSMISSION_POWER_NAMES, Field::TransmissionPower);

impl FrequencyBand {
    /// Name used for display
    pub fn name(self) -> &'static str {
        FREQUENCY_BAND_NAMES[self as usize]
    }
}

impl Display for FrequencyBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single configuration change
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// Module address
    Address(u16),
    /// UART frame format
    UartParity(UartParity),
    /// UART baud rate
    UartRate(UartRate),
    /// Over-the-air data rate
    AirRate(AirRate),
    /// Channel, passed through unchecked
    Channel(u8),
    /// `true` for transparent, `false` for fixed transmission
    TransparentTransmission(bool),
    /// I/O pins drive mode
    IoDriveMode(IoDriveMode),
    /// Wake-up time code, at most [`MAX_WAKE_UP_TIME`] when parsed
    WirelessWakeUpTime(u8),
    /// Forward error correction
    ErrorCorrection(bool),
    /// Transmission power
    TransmissionPower(TransmissionPower),
}

impl Setting {
    /// Parses a variable name and its value
    ///
    /// # Errors
    /// * `InvalidConfigurationValue::UnknownField` - `name` is not a variable
    /// * `InvalidConfigurationValue::InvalidValue` - `value` is out of range
    pub fn parse(name: &str, value: &str) -> Result<Self, InvalidConfigurationValue> {
        let field: Field = name.parse()?;
        let invalid = || InvalidConfigurationValue::invalid(field);

        Ok(match field {
            Field::Address => Self::Address(value.parse().map_err(|_| invalid())?),
            Field::UartParity => Self::UartParity(value.parse()?),
            Field::UartRate => Self::UartRate(value.parse()?),
            Field::AirRate => Self::AirRate(value.parse()?),
            Field::Channel => Self::Channel(value.parse().map_err(|_| invalid())?),
            Field::TransmissionMode => Self::TransparentTransmission(
                lookup_flag(&TRANSMISSION_MODE_NAMES, value).ok_or_else(invalid)?,
            ),
            Field::IoDriveMode => Self::IoDriveMode(value.parse()?),
            Field::WirelessWakeUpTime => {
                let time: u8 = value.parse().map_err(|_| invalid())?;
                if time > MAX_WAKE_UP_TIME {
                    return Err(invalid());
                }
                Self::WirelessWakeUpTime(time)
            }
            Field::ErrorCorrection => Self::ErrorCorrection(
                lookup_flag(&ERROR_CORRECTION_NAMES, value).ok_or_else(invalid)?,
            ),
            Field::TransmissionPower => Self::TransmissionPower(value.parse()?),
        })
    }

    /// Variable this setting changes
    pub fn field(&self) -> Field {
        match self {
            Self::Address(_) => Field::Address,
            Self::UartParity(_) => Field::UartParity,
            Self::UartRate(_) => Field::UartRate,
            Self::AirRate(_) => Field::AirRate,
            Self::Channel(_) => Field::Channel,
            Self::TransparentTransmission(_) => Field::TransmissionMode,
            Self::IoDriveMode(_) => Field::IoDriveMode,
            Self::WirelessWakeUpTime(_) => Field::WirelessWakeUpTime,
            Self::ErrorCorrection(_) => Field::ErrorCorrection,
            Self::TransmissionPower(_) => Field::TransmissionPower,
        }
    }
}

impl Configuration {
    /// Returns a copy of this configuration with `setting` applied
    #[must_use]
    pub fn with(mut self, setting: Setting) -> Self {
        match setting {
            Setting::Address(address) => self.address = address,
            Setting::UartParity(parity) => self.uart_parity = parity,
            Setting::UartRate(rate) => self.uart_rate = rate,
            Setting::AirRate(rate) => self.air_rate = rate,
            Setting::Channel(channel) => self.channel = channel,
            Setting::TransparentTransmission(transparent) => {
                self.transparent_transmission = transparent
            }
            Setting::IoDriveMode(mode) => self.io_drive_mode = mode,
            Setting::WirelessWakeUpTime(time) => self.wireless_wake_up_time = time,
            Setting::ErrorCorrection(enabled) => self.error_correction_enabled = enabled,
            Setting::TransmissionPower(power) => self.transmission_power = power,
        }
        self
    }
}

impl Display for Configuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "UART")?;
        writeln!(f, "  Parity: {}", self.uart_parity)?;
        writeln!(f, "  Rate: {}", self.uart_rate)?;
        writeln!(f, "Air Rate: {}", self.air_rate)?;
        writeln!(f, "Channel: {} ({}MHz)", self.channel, self.frequency_mhz())?;
        writeln!(
            f,
            "Transmission Mode: {}",
            TRANSMISSION_MODE_NAMES[self.transparent_transmission as usize]
        )?;
        writeln!(f, "IO Drive Mode: {}", self.io_drive_mode)?;
        writeln!(
            f,
            "Wireless Wake-up Time: {}ms",
            self.wake_up_period().as_millis()
        )?;
        writeln!(
            f,
            "Error Correction: {}",
            ERROR_CORRECTION_NAMES[self.error_correction_enabled as usize]
        )?;
        writeln!(f, "Transmission Power: {}", self.transmission_power)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{} {} feature flags: {:x}",
            self.version,
            self.frequency,
            self.features.bits()
        )
    }
}

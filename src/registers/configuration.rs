//! Configuration register block
//!
//! The E32 keeps its persistent settings in a five byte block that is read with
//! [`ReadConfiguration`](crate::commands::ReadConfiguration) and written back with
//! [`SetConfiguration`](crate::commands::SetConfiguration) or
//! [`SaveConfiguration`](crate::commands::SaveConfiguration).
//!
//! # Block Layout
//! ```text
//! byte 0   ADDH     address, high byte
//! byte 1   ADDL     address, low byte
//! byte 2   SPED     [7:6] UART parity  [5:3] UART rate  [2:0] air rate
//! byte 3   CHAN     channel
//! byte 4   OPTION   [7] fixed mode  [6] I/O drive  [5:3] wake-up time
//!                   [2] FEC  [1:0] transmission power
//! ```
//!
//! Decoding never fails. The two raw codes without a meaning (parity `0b11`,
//! air rates `0b110` and `0b111`) are folded onto the nearest valid value.

use core::convert::Infallible;
use core::time::Duration;

use regiface::{FromByteArray, ToByteArray};

/// Carrier frequency of channel 0 on the 433MHz variant
pub const CHANNEL_BASE_MHZ: u16 = 410;

/// Frequency spacing between two adjacent channels
pub const CHANNEL_STEP_MHZ: u16 = 1;

/// Largest wake-up time code, i.e. a 2s wake-up period
pub const MAX_WAKE_UP_TIME: u8 = 0b111;

/// UART frame format
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UartParity {
    /// 8 data bits, no parity, 1 stop bit (default)
    #[default]
    Parity8N1 = 0,
    /// 8 data bits, odd parity, 1 stop bit
    Parity8O1 = 1,
    /// 8 data bits, even parity, 1 stop bit
    Parity8E1 = 2,
}

impl UartParity {
    /// Every variant, indexed by its raw code
    pub const ALL: [Self; 3] = [Self::Parity8N1, Self::Parity8O1, Self::Parity8E1];

    /// Raw code `0b11` is reserved and reads back as 8N1
    pub fn from_raw(raw: u8) -> Self {
        match raw & 0b11 {
            1 => Self::Parity8O1,
            2 => Self::Parity8E1,
            _ => Self::Parity8N1,
        }
    }
}

/// UART baud rate
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UartRate {
    /// 1200 bps
    Rate1200 = 0,
    /// 2400 bps
    Rate2400 = 1,
    /// 4800 bps
    Rate4800 = 2,
    /// Factory default
    #[default]
    Rate9600 = 3,
    /// 19200 bps
    Rate19200 = 4,
    /// 38400 bps
    Rate38400 = 5,
    /// 57600 bps
    Rate57600 = 6,
    /// 115200 bps
    Rate115200 = 7,
}

impl UartRate {
    /// Every variant, indexed by its raw code
    pub const ALL: [Self; 8] = [
        Self::Rate1200,
        Self::Rate2400,
        Self::Rate4800,
        Self::Rate9600,
        Self::Rate19200,
        Self::Rate38400,
        Self::Rate57600,
        Self::Rate115200,
    ];

    /// Decodes the 3-bit rate field, higher bits are ignored
    pub fn from_raw(raw: u8) -> Self {
        Self::ALL[(raw & 0b111) as usize]
    }

    /// Baud rate in bits per second
    pub fn baud(self) -> u32 {
        match self {
            Self::Rate1200 => 1200,
            Self::Rate2400 => 2400,
            Self::Rate4800 => 4800,
            Self::Rate9600 => 9600,
            Self::Rate19200 => 19200,
            Self::Rate38400 => 38400,
            Self::Rate57600 => 57600,
            Self::Rate115200 => 115200,
        }
    }
}

/// Over-the-air data rate
///
/// Both ends of a link must use the same air rate. Lower rates trade
/// throughput for range.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AirRate {
    /// 300 bps
    AirRate300 = 0,
    /// 1200 bps
    AirRate1200 = 1,
    /// Factory default
    #[default]
    AirRate2400 = 2,
    /// 4800 bps
    AirRate4800 = 3,
    /// 9600 bps
    AirRate9600 = 4,
    /// 19200 bps
    AirRate19200 = 5,
}

impl AirRate {
    /// Every variant, indexed by its raw code
    pub const ALL: [Self; 6] = [
        Self::AirRate300,
        Self::AirRate1200,
        Self::AirRate2400,
        Self::AirRate4800,
        Self::AirRate9600,
        Self::AirRate19200,
    ];

    /// Raw codes 6 and 7 have no rate of their own and read back as 19200
    pub fn from_raw(raw: u8) -> Self {
        let index = (raw & 0b111).min(Self::AirRate19200 as u8);
        Self::ALL[index as usize]
    }

    /// Air rate in bits per second
    pub fn bits_per_second(self) -> u32 {
        match self {
            Self::AirRate300 => 300,
            Self::AirRate1200 => 1200,
            Self::AirRate2400 => 2400,
            Self::AirRate4800 => 4800,
            Self::AirRate9600 => 9600,
            Self::AirRate19200 => 19200,
        }
    }
}

/// Drive mode of the TXD, RXD and AUX pins
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IoDriveMode {
    /// TXD, AUX and RXD are open collectors
    OpenDrain = 0,
    /// TXD and AUX are push-pull outputs, RXD is pulled up (default)
    #[default]
    PushPull = 1,
}

impl IoDriveMode {
    /// Every variant, indexed by its raw code
    pub const ALL: [Self; 2] = [Self::OpenDrain, Self::PushPull];

    /// Decodes the drive mode bit, higher bits are ignored
    pub fn from_raw(raw: u8) -> Self {
        if raw & 0b1 != 0 {
            Self::PushPull
        } else {
            Self::OpenDrain
        }
    }
}

/// Transmission power
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransmissionPower {
    /// Factory default
    #[default]
    Power30dBm = 0,
    /// 27 dBm
    Power27dBm = 1,
    /// 24 dBm
    Power24dBm = 2,
    /// 21 dBm
    Power21dBm = 3,
}

impl TransmissionPower {
    /// Every variant, indexed by its raw code
    pub const ALL: [Self; 4] = [
        Self::Power30dBm,
        Self::Power27dBm,
        Self::Power24dBm,
        Self::Power21dBm,
    ];

    /// Decodes the 2-bit power field, higher bits are ignored
    pub fn from_raw(raw: u8) -> Self {
        Self::ALL[(raw & 0b11) as usize]
    }

    /// Output power in dBm
    pub fn dbm(self) -> u8 {
        match self {
            Self::Power30dBm => 30,
            Self::Power27dBm => 27,
            Self::Power24dBm => 24,
            Self::Power21dBm => 21,
        }
    }
}

/// Module configuration
///
/// Read with [`ReadConfiguration`](crate::commands::ReadConfiguration), written
/// with [`SetConfiguration`](crate::commands::SetConfiguration) (volatile) or
/// [`SaveConfiguration`](crate::commands::SaveConfiguration) (persisted).
///
/// # Important Notes
/// - Both ends of a link need the same air rate, channel and error correction
/// - Only channels 0 to 31 are meaningful, other values are passed through as-is
/// - The wake-up time only has 3 bits on the wire, higher bits are dropped on encode
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Configuration {
    /// Module address, used as destination in fixed transmission mode
    pub address: u16,
    /// UART frame format
    pub uart_parity: UartParity,
    /// UART baud rate
    pub uart_rate: UartRate,
    /// Over-the-air data rate
    pub air_rate: AirRate,
    /// Channel, from 0x00 to 0x1F
    ///
    /// Frequency = 410MHz + channel * 1MHz
    pub channel: u8,
    /// Transparent or fixed transmission mode
    ///
    /// In transparent mode, the module sends all bytes received on the UART
    /// through the air. In fixed mode, the first three bytes are used as
    /// high/low address and channel of the destination.
    pub transparent_transmission: bool,
    /// I/O pins drive mode
    pub io_drive_mode: IoDriveMode,
    /// Wireless wake-up time as 250ms + wireless_wake_up_time * 250ms
    ///
    /// Max value is 7 (2s). Default is 0 (250ms).
    pub wireless_wake_up_time: u8,
    /// Forward error correction
    ///
    /// Both sides need the same setting. Disabling it raises the data rate
    /// on short, clean links at the cost of range and robustness.
    pub error_correction_enabled: bool,
    /// Transmission power
    pub transmission_power: TransmissionPower,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            address: 0,
            uart_parity: UartParity::default(),
            uart_rate: UartRate::default(),
            air_rate: AirRate::default(),
            channel: 0,
            transparent_transmission: true,
            io_drive_mode: IoDriveMode::default(),
            wireless_wake_up_time: 0,
            error_correction_enabled: true,
            transmission_power: TransmissionPower::default(),
        }
    }
}

impl Configuration {
    /// Carrier frequency of the configured channel, in MHz
    pub fn frequency_mhz(&self) -> u16 {
        CHANNEL_BASE_MHZ + self.channel as u16 * CHANNEL_STEP_MHZ
    }

    /// Period between two wake-up preambles
    pub fn wake_up_period(&self) -> Duration {
        Duration::from_millis(250 * (self.wireless_wake_up_time as u64 + 1))
    }
}

impl FromByteArray for Configuration {
    type Error = Infallible;
    type Array = [u8; 5];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            address: u16::from_be_bytes([bytes[0], bytes[1]]),
            uart_parity: UartParity::from_raw(bytes[2] >> 6),
            uart_rate: UartRate::from_raw(bytes[2] >> 3),
            air_rate: AirRate::from_raw(bytes[2]),
            channel: bytes[3],
            transparent_transmission: bytes[4] & 0x80 == 0,
            io_drive_mode: IoDriveMode::from_raw(bytes[4] >> 6),
            wireless_wake_up_time: (bytes[4] >> 3) & 0b111,
            error_correction_enabled: bytes[4] & 0x04 != 0,
            transmission_power: TransmissionPower::from_raw(bytes[4]),
        })
    }
}

impl ToByteArray for Configuration {
    type Error = Infallible;
    type Array = [u8; 5];

    /// Packs the record into the 5 byte parameter block
    ///
    /// Only the low 3 bits of `wireless_wake_up_time` are written, so a value
    /// above [`MAX_WAKE_UP_TIME`] cannot spill into the drive mode or
    /// transmission mode bits. `channel` is written verbatim.
    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let [addh, addl] = self.address.to_be_bytes();
        let sped =
            (self.uart_parity as u8) << 6 | (self.uart_rate as u8) << 3 | self.air_rate as u8;
        let option = (!self.transparent_transmission as u8) << 7
            | (self.io_drive_mode as u8) << 6
            | (self.wireless_wake_up_time & MAX_WAKE_UP_TIME) << 3
            | (self.error_correction_enabled as u8) << 2
            | self.transmission_power as u8;

        Ok([addh, addl, sped, self.channel, option])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Configuration {
        Configuration {
            address: 0x0102,
            uart_parity: UartParity::Parity8O1,
            uart_rate: UartRate::Rate19200,
            air_rate: AirRate::AirRate4800,
            channel: 20,
            transparent_transmission: false,
            io_drive_mode: IoDriveMode::PushPull,
            wireless_wake_up_time: 4,
            error_correction_enabled: true,
            transmission_power: TransmissionPower::Power24dBm,
        }
    }

    fn decode(bytes: [u8; 5]) -> Configuration {
        match Configuration::from_bytes(bytes) {
            Ok(config) => config,
            Err(never) => match never {},
        }
    }

    fn encode(config: Configuration) -> [u8; 5] {
        match config.to_bytes() {
            Ok(bytes) => bytes,
            Err(never) => match never {},
        }
    }

    #[test]
    fn test_encodes_a_configuration() {
        assert_eq!(
            encode(reference()),
            [0x01, 0x02, 0b0110_0011, 0b0001_0100, 0b1110_0110]
        );
    }

    #[test]
    fn test_decodes_a_configuration() {
        let config = decode([0x01, 0x02, 0b0110_0011, 0b0001_0100, 0b1110_0110]);
        assert_eq!(config, reference());
        assert_eq!(config.address, 0x0102);
        assert!(!config.transparent_transmission);
        assert_eq!(config.wireless_wake_up_time, 4);
    }

    #[test]
    fn test_reserved_parity_decodes_as_8n1() {
        let config = decode([0, 0, 0b1100_0000, 0, 0]);
        assert_eq!(config.uart_parity, UartParity::Parity8N1);
    }

    #[test]
    fn test_unassigned_air_rates_decode_as_19200() {
        assert_eq!(decode([0, 0, 0b0000_0110, 0, 0]).air_rate, AirRate::AirRate19200);
        assert_eq!(decode([0, 0, 0b0000_0111, 0, 0]).air_rate, AirRate::AirRate19200);
    }

    #[test]
    fn test_round_trips_every_enum_combination() {
        for uart_parity in UartParity::ALL {
            for uart_rate in UartRate::ALL {
                for air_rate in AirRate::ALL {
                    for io_drive_mode in IoDriveMode::ALL {
                        for transmission_power in TransmissionPower::ALL {
                            let config = Configuration {
                                uart_parity,
                                uart_rate,
                                air_rate,
                                io_drive_mode,
                                transmission_power,
                                ..reference()
                            };
                            assert_eq!(decode(encode(config)), config);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_round_trips_scalar_fields() {
        for wireless_wake_up_time in 0..=MAX_WAKE_UP_TIME {
            for (transparent_transmission, error_correction_enabled) in
                [(true, true), (true, false), (false, true), (false, false)]
            {
                let config = Configuration {
                    wireless_wake_up_time,
                    transparent_transmission,
                    error_correction_enabled,
                    ..reference()
                };
                assert_eq!(decode(encode(config)), config);
            }
        }

        for address in [0x0000, 0x00FF, 0xFF00, 0xFFFF, 0x1234] {
            let config = Configuration { address, ..reference() };
            assert_eq!(decode(encode(config)), config);
        }

        for channel in [0, 31, 32, 255] {
            let config = Configuration { channel, ..reference() };
            assert_eq!(decode(encode(config)), config);
        }
    }

    #[test]
    fn test_wake_up_time_cannot_leak_into_other_bits() {
        let config = Configuration {
            wireless_wake_up_time: 0xFF,
            ..Configuration::default()
        };
        let bytes = encode(config);
        assert_eq!(bytes[4] & 0b1100_0111, encode(Configuration::default())[4] & 0b1100_0111);
        assert_eq!(decode(bytes).wireless_wake_up_time, MAX_WAKE_UP_TIME);
    }

    #[test]
    fn test_default_matches_factory_settings() {
        assert_eq!(encode(Configuration::default()), [0x00, 0x00, 0x1A, 0x00, 0x44]);
    }

    #[test]
    fn test_derived_quantities() {
        let config = reference();
        assert_eq!(config.frequency_mhz(), 430);
        assert_eq!(config.wake_up_period(), Duration::from_millis(1250));
        assert_eq!(config.uart_rate.baud(), 19200);
        assert_eq!(config.air_rate.bits_per_second(), 4800);
        assert_eq!(config.transmission_power.dbm(), 24);
    }
}

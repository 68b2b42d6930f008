//! Integration tests driving a [`Device`] through a scripted transport.
//!
//! The transport below plays the module side of the link: every read pops the
//! next canned reply, every write is recorded for inspection.

use std::collections::VecDeque;
use std::time::Duration;

use ebyte_e32::{
    AirRate, Configuration, Device, Error, FrequencyBand, IoDriveMode, Setting, Timeouts,
    TransmissionPower, Transport, UartParity, UartRate,
};

/// What the scripted module does on the next read.
enum Step {
    Reply(Vec<u8>),
    Fail(&'static str),
}

#[derive(Default)]
struct ScriptedModule {
    script: VecDeque<Step>,
    written: Vec<Vec<u8>>,
    reads: Vec<(usize, Timeouts)>,
}

impl ScriptedModule {
    fn replying(replies: &[&[u8]]) -> Self {
        Self {
            script: replies.iter().map(|r| Step::Reply(r.to_vec())).collect(),
            ..Self::default()
        }
    }
}

impl Transport for ScriptedModule {
    type Error = &'static str;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.written.push(bytes.to_vec());
        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8], timeouts: &Timeouts) -> Result<usize, Self::Error> {
        self.reads.push((buffer.len(), *timeouts));
        match self.script.pop_front() {
            Some(Step::Reply(reply)) => {
                let len = reply.len().min(buffer.len());
                buffer[..len].copy_from_slice(&reply[..len]);
                Ok(len)
            }
            Some(Step::Fail(reason)) => Err(reason),
            None => Ok(0),
        }
    }
}

const REFERENCE_REPLY: [u8; 6] = [0xC0, 0x01, 0x02, 0b0110_0011, 0b0001_0100, 0b1110_0110];

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

// ============================================================================
// Reads
// ============================================================================

#[test]
fn test_reads_configuration() {
    let mut module = ScriptedModule::replying(&[&REFERENCE_REPLY]);
    let mut device = Device::new(&mut module);

    assert_eq!(device.read_configuration(), Ok(reference()));

    assert_eq!(module.written, vec![vec![0xC1, 0xC1, 0xC1]]);
    assert_eq!(module.reads, vec![(6, Timeouts::default())]);
}

#[test]
fn test_reads_version_with_unknown_band() {
    let mut module = ScriptedModule::replying(&[&[0xC3, 99, 0x0D, 0x00]]);
    let mut device = Device::new(&mut module);

    let version = device.read_version().expect("unknown band is not an error");
    assert_eq!(version.frequency, FrequencyBand::Invalid);
    assert_eq!(version.frequency_code, 99);
    assert_eq!(version.version, 0x0D);
    assert_eq!(module.reads[0].0, 4);
}

#[test]
fn test_timeouts_are_classified_by_received_length() {
    let mut module = ScriptedModule::replying(&[&[], &[0xC3], &[0xC3, 32, 1]]);
    let mut device = Device::new(&mut module);

    assert_eq!(device.read_version(), Err(Error::FirstByteTimeout));
    assert_eq!(
        device.read_version(),
        Err(Error::PacketTimeout {
            received: 1,
            expected: 4
        })
    );
    assert_eq!(
        device.read_version(),
        Err(Error::PacketTimeout {
            received: 3,
            expected: 4
        })
    );
    assert!(device.read_version().unwrap_err().is_timeout());

    assert_eq!(module.written.len(), 4);
}

#[test]
fn test_configuration_marker_mismatch_is_not_accepted() {
    // A version reply arriving where a configuration reply is expected
    let mut module = ScriptedModule::replying(&[&[0xC3, 0x01, 0x02, 0x03, 0x04, 0x05]]);
    let mut device = Device::new(&mut module);

    assert_eq!(
        device.read_configuration(),
        Err(Error::Framing {
            expected: 0xC0,
            actual: 0xC3
        })
    );
}

#[test]
fn test_transport_failure_is_surfaced() {
    let mut module = ScriptedModule::default();
    module.script.push_back(Step::Fail("port closed"));
    let mut device = Device::new(&mut module);

    assert_eq!(device.read_configuration(), Err(Error::Transport("port closed")));
}

#[test]
fn test_configured_timeouts_reach_the_transport() {
    let timeouts = Timeouts {
        overall: Duration::from_millis(300),
        first_byte: Duration::from_millis(100),
        inter_byte: Duration::from_millis(10),
    };
    let mut module = ScriptedModule::replying(&[&REFERENCE_REPLY, &REFERENCE_REPLY]);
    let mut device = Device::new(&mut module);

    device.read_configuration().unwrap();
    device.set_timeouts(timeouts);
    assert_eq!(device.timeouts(), &timeouts);
    device.read_configuration().unwrap();

    assert_eq!(module.reads[0].1, Timeouts::default());
    assert_eq!(module.reads[1].1, timeouts);
}

// ============================================================================
// Writes
// ============================================================================

#[test]
fn test_writes_volatile_and_persisted_configuration() {
    let mut module = ScriptedModule::default();
    let mut device = Device::new(&mut module);

    device.write_configuration(&reference(), false).unwrap();
    device.write_configuration(&reference(), true).unwrap();

    assert_eq!(
        module.written,
        vec![
            vec![0xC2, 0x01, 0x02, 0b0110_0011, 0b0001_0100, 0b1110_0110],
            vec![0xC0, 0x01, 0x02, 0b0110_0011, 0b0001_0100, 0b1110_0110],
        ]
    );
    assert!(module.reads.is_empty());
}

#[test]
fn test_update_changes_a_single_field() {
    let mut module = ScriptedModule::replying(&[&REFERENCE_REPLY]);
    let mut device = Device::new(&mut module);

    let setting = Setting::parse("transmission-power", "30dBm").unwrap();
    let written = device.update_configuration(setting, false).unwrap();

    assert_eq!(
        written,
        Configuration {
            transmission_power: TransmissionPower::Power30dBm,
            ..reference()
        }
    );
    assert_eq!(
        module.written,
        vec![
            vec![0xC1, 0xC1, 0xC1],
            vec![0xC2, 0x01, 0x02, 0b0110_0011, 0b0001_0100, 0b1110_0100],
        ]
    );
}

#[test]
fn test_save_writes_back_current_configuration() {
    let mut module = ScriptedModule::replying(&[&REFERENCE_REPLY]);
    let mut device = Device::new(&mut module);

    assert_eq!(device.save_configuration(), Ok(reference()));
    assert_eq!(module.written[1][0], 0xC0);
    assert_eq!(&module.written[1][1..], &REFERENCE_REPLY[1..]);
}

#[test]
fn test_failed_read_does_not_write() {
    let mut module = ScriptedModule::replying(&[&[0xC0, 0x01]]);
    let mut device = Device::new(&mut module);

    let result = device.update_configuration(Setting::Channel(5), true);
    assert!(matches!(result, Err(Error::PacketTimeout { .. })));
    assert_eq!(module.written, vec![vec![0xC1, 0xC1, 0xC1]]);
}

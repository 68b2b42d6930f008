//! E32 Device Interface
//!
//! This module provides a high-level interface for interacting with E32 modules
//! over a byte [`Transport`].
//!
//! The interface is built around the `Device<T>` struct which wraps a transport and
//! provides methods for:
//! - Executing commands, with or without a reply
//! - Reading the module version
//! - Reading and writing the module configuration
//!
//! Every exchange blocks until the transport returns. Exchanges take `&mut self`,
//! so a device never has two commands in flight; share it between threads behind
//! a lock if needed.
//!
//! # Example
//! ```no_run
//! use ebyte_e32::{Device, Setting, Transport};
//!
//! fn retune<T: Transport>(transport: T) -> Result<(), ebyte_e32::Error<T::Error>> {
//!     let mut device = Device::new(transport);
//!
//!     let config = device.read_configuration()?;
//!     device.write_configuration(&config.with(Setting::Channel(23)), false)?;
//!
//!     Ok(())
//! }
//! ```

use core::convert::Infallible;

use log::{debug, trace, warn};
use regiface::{ByteArray, Command, FromByteArray, NoParameters, ToByteArray};

use crate::{
    commands::{Query, ReadConfiguration, ReadVersion, SaveConfiguration, SetConfiguration},
    Configuration, Error, Setting, Timeouts, Transport, Version,
};

/// Capacity of the buffers holding a command frame or a reply
pub const MAX_FRAME_LEN: usize = 16;

/// Main device interface for the E32.
///
/// This struct wraps a transport and the timeouts applied to every reply.
pub struct Device<T> {
    transport: T,
    timeouts: Timeouts,
}

impl<T> Device<T> {
    /// Creates a new Device instance wrapping the provided transport.
    ///
    /// Replies are awaited with [`Timeouts::default`], one second per tier.
    pub fn new(transport: T) -> Self {
        Self::with_timeouts(transport, Timeouts::default())
    }

    /// Creates a new Device instance with custom reply timeouts.
    pub fn with_timeouts(transport: T, timeouts: Timeouts) -> Self {
        Self {
            transport,
            timeouts,
        }
    }

    /// Timeouts applied to every reply.
    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Changes the timeouts applied to subsequent replies.
    pub fn set_timeouts(&mut self, timeouts: Timeouts) {
        self.timeouts = timeouts;
    }

    /// Releases the underlying transport.
    ///
    /// This method consumes the Device instance and returns the wrapped transport.
    pub fn release(self) -> T {
        self.transport
    }
}

impl<T> Device<T>
where
    T: Transport,
{
    /// Executes a command the module does not reply to.
    ///
    /// Only guarantees the frame was handed to the transport.
    ///
    /// # Errors
    /// * `Error::Transport` - the transport failed to send the frame
    /// * `Error::Oversized` - the frame does not fit in [`MAX_FRAME_LEN`]; nothing
    ///   is sent in that case
    pub fn execute_command<C>(&mut self, command: C) -> Result<(), Error<T::Error>>
    where
        C: Command<IdType = u8, ResponseParameters = NoParameters>,
        C::CommandParameters: ToByteArray<Error = Infallible>,
    {
        self.send::<C>(command)
    }

    /// Executes a command and waits for its reply.
    ///
    /// # Returns
    /// The decoded reply payload, without its marker byte
    ///
    /// # Errors
    /// * `Error::Transport` - the transport failed
    /// * `Error::FirstByteTimeout` - the module did not answer at all
    /// * `Error::PacketTimeout` - the reply was cut short
    /// * `Error::Framing` - the reply does not start with `Q::REPLY_MARKER`
    /// * `Error::Deserialization` - the payload could not be decoded
    /// * `Error::Oversized` - the command or its reply does not fit in
    ///   [`MAX_FRAME_LEN`]; nothing is sent in that case
    pub fn query<Q>(&mut self, query: Q) -> Result<Q::ResponseParameters, Error<T::Error>>
    where
        Q: Query,
        Q::CommandParameters: ToByteArray<Error = Infallible>,
    {
        let mut payload = <Q::ResponseParameters as FromByteArray>::Array::new();
        let expected = {
            let bytes: &[u8] = payload.as_ref();
            bytes.len() + 1
        };

        // The reply must fit before the command goes out, or it would be left
        // unread on the link.
        let mut buffer = [0u8; MAX_FRAME_LEN];
        let reply = buffer
            .get_mut(..expected)
            .ok_or(Error::Oversized { len: expected })?;

        self.send::<Q>(query)?;

        let received = self
            .transport
            .read(reply, &self.timeouts)
            .map_err(Error::Transport)?;
        trace!("reply to 0x{:02X}: {:02X?}", Q::id(), &reply[..received.min(expected)]);

        if received == 0 {
            debug!("no reply to command 0x{:02X}", Q::id());
            return Err(Error::FirstByteTimeout);
        }
        if received < expected {
            debug!(
                "partial reply to command 0x{:02X}: {} of {} bytes",
                Q::id(),
                received,
                expected
            );
            return Err(Error::PacketTimeout { received, expected });
        }
        if reply[0] != Q::REPLY_MARKER {
            debug!(
                "reply to command 0x{:02X} starts with 0x{:02X} instead of 0x{:02X}",
                Q::id(),
                reply[0],
                Q::REPLY_MARKER
            );
            return Err(Error::Framing {
                expected: Q::REPLY_MARKER,
                actual: reply[0],
            });
        }

        let bytes: &mut [u8] = payload.as_mut();
        bytes.copy_from_slice(&reply[1..]);
        Q::ResponseParameters::from_bytes(payload).map_err(|_| Error::Deserialization)
    }

    /// Reads the module version.
    ///
    /// An unknown frequency band is reported as `FrequencyBand::Invalid`, not as
    /// an error.
    pub fn read_version(&mut self) -> Result<Version, Error<T::Error>> {
        let version = self.query(ReadVersion)?;
        if !version.frequency.is_valid() {
            warn!("invalid frequency code {} in version reply", version.frequency_code);
        }
        Ok(version)
    }

    /// Reads the current module configuration.
    pub fn read_configuration(&mut self) -> Result<Configuration, Error<T::Error>> {
        self.query(ReadConfiguration)
    }

    /// Writes a new configuration to the module.
    ///
    /// # Arguments
    /// * `config` - The configuration to apply
    /// * `persist` - Also save it to non-volatile memory
    pub fn write_configuration(
        &mut self,
        config: &Configuration,
        persist: bool,
    ) -> Result<(), Error<T::Error>> {
        let config = *config;
        if persist {
            self.execute_command(SaveConfiguration { config })
        } else {
            self.execute_command(SetConfiguration { config })
        }
    }

    /// Changes a single configuration variable.
    ///
    /// Reads the current configuration, applies `setting` and writes the result
    /// back.
    ///
    /// # Returns
    /// The configuration that was written
    pub fn update_configuration(
        &mut self,
        setting: Setting,
        persist: bool,
    ) -> Result<Configuration, Error<T::Error>> {
        let config = self.read_configuration()?.with(setting);
        self.write_configuration(&config, persist)?;
        Ok(config)
    }

    /// Saves the current configuration to non-volatile memory.
    ///
    /// # Returns
    /// The configuration that was saved
    pub fn save_configuration(&mut self) -> Result<Configuration, Error<T::Error>> {
        let config = self.read_configuration()?;
        self.write_configuration(&config, true)?;
        Ok(config)
    }

    fn send<C>(&mut self, command: C) -> Result<(), Error<T::Error>>
    where
        C: Command<IdType = u8>,
        C::CommandParameters: ToByteArray<Error = Infallible>,
    {
        let parameters = match command.invoking_parameters().to_bytes() {
            Ok(parameters) => parameters,
            Err(never) => match never {},
        };
        let parameters: &[u8] = parameters.as_ref();
        let len = parameters.len() + 1;

        let mut buffer = [0u8; MAX_FRAME_LEN];
        let frame = buffer.get_mut(..len).ok_or(Error::Oversized { len })?;
        frame[0] = C::id();
        frame[1..].copy_from_slice(parameters);

        trace!("sending {:02X?}", frame);
        self.transport.write(frame).map_err(Error::Transport)
    }
}

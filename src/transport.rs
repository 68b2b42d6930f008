//! Byte transport used to talk to the module
//!
//! This crate does not open serial ports itself. Any byte stream that can
//! honour the three timeout tiers below (a serial port, a USB bridge, a TCP
//! tunnel) can drive a [`Device`](crate::Device) by implementing [`Transport`].

use core::time::Duration;

/// Default value of every timeout tier
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Timeout tiers of a single read
///
/// All three limits are enforced by the transport; the driver only passes
/// them through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeouts {
    /// Upper bound on the duration of the whole read
    pub overall: Duration,
    /// Give up if nothing arrived within this delay
    pub first_byte: Duration,
    /// Give up if no new byte arrived this long after the previous one
    pub inter_byte: Duration,
}

impl Timeouts {
    /// Same limit for every tier
    pub const fn uniform(timeout: Duration) -> Self {
        Self {
            overall: timeout,
            first_byte: timeout,
            inter_byte: timeout,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Timeouts {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Timeouts {{ overall: {=u64}ms, first_byte: {=u64}ms, inter_byte: {=u64}ms }}",
            self.overall.as_millis() as u64,
            self.first_byte.as_millis() as u64,
            self.inter_byte.as_millis() as u64,
        )
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(DEFAULT_TIMEOUT)
    }
}

/// Half-duplex byte stream to the module
pub trait Transport {
    /// Transport failure, e.g. a disconnected port
    type Error;

    /// Hands `bytes` over to the link in a single write
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Reads up to `buffer.len()` bytes within the given timeouts
    ///
    /// Returns the number of bytes actually read. Running out of time is not
    /// an error: the transport returns whatever it got so far, possibly 0.
    fn read(&mut self, buffer: &mut [u8], timeouts: &Timeouts) -> Result<usize, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(bytes)
    }

    fn read(&mut self, buffer: &mut [u8], timeouts: &Timeouts) -> Result<usize, Self::Error> {
        (**self).read(buffer, timeouts)
    }
}

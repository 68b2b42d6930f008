#![cfg_attr(not(test), no_std)]
//! EByte E32 Driver
//!
//! This crate provides a type-safe interface for configuring the EByte E32 family of
//! serial LoRa modules. The E32 is a half-duplex UART radio: in normal mode it
//! relays UART bytes over the air, in sleep mode it accepts a handful of
//! configuration commands.
//!
//! # Features
//! - Bit-exact codec of the 5 byte parameter block
//! - Version, read, set and save commands
//! - Reply framing validation with distinct first-byte and packet timeouts
//! - Text names for every setting, for command line front ends
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: Main device interface for command execution
//!   - Builds command frames and validates replies
//!   - Drives any byte [`Transport`]
//!
//! - [`registers`]: The configuration and version blocks and their codecs
//!
//! - [`commands`]: One type per command opcode
//!
//! - [`settings`]: Textual names of settings and by-name updates
//!
//! - [`transport`]: The byte stream contract and its timeout tiers
//!
//! # Usage
//! The driver uses the `regiface` crate for byte array conversion and command
//! definitions. The main entry point is the [`Device`] struct which wraps a
//! transport and provides methods for interacting with the module.
//!
//! # Important Notes
//! - Mode pins (M0/M1) are not handled: put the module in sleep mode first
//! - Commands are exchanged at 9600 8N1 whatever the configured UART settings
//! - Writes are not acknowledged by the module
//!
//! # Example
//! ```no_run
//! use ebyte_e32::{Device, Error, Transport, Version};
//!
//! fn identify<T: Transport>(transport: T) -> Result<Version, Error<T::Error>> {
//!     let mut device = Device::new(transport);
//!     device.read_version()
//! }
//! ```

use regiface::*;

pub mod commands;
pub mod device;
mod error;
pub mod registers;
pub mod settings;
pub mod transport;

pub use commands::*;
pub use device::Device;
pub use error::Error;
pub use registers::*;
pub use settings::{Field, InvalidConfigurationValue, Setting};
pub use transport::{Timeouts, Transport};

//! Register definitions for the E32 modules
//!
//! The E32 exposes no addressable register map over its UART. Instead, the
//! whole parameter block is read or written at once and the version block is
//! read-only.

mod configuration;
mod version;

pub use configuration::*;
pub use version::*;

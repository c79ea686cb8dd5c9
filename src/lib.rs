//! CRC-16/CCITT (reflected polynomial 0x8408, init 0xFFFF) over hex-typed IIC commands.
//!
//! [`codec`] holds the pure decoder and checksum, [`batch`] runs them per slot, and
//! [`panel`] keeps the form state that the terminal UI and CLI render.

pub mod batch;
pub mod codec;
pub mod config;
pub mod panel;

pub use batch::{evaluate_batch, BatchOptions, SlotResult};
pub use codec::{crc16_ccitt, decode, Crc16, DecodeError, FormatError};

pub mod crc;
pub mod hex;

pub use crc::{crc16_ccitt, Crc16};
pub use hex::{decode, DecodeError, FormatError};

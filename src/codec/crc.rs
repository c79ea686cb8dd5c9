use std::fmt;

/// Reflected form of the CCITT polynomial 0x1021.
pub const POLY_REFLECTED: u16 = 0x8408;

/// Register value before any byte is folded in.
pub const INIT: u16 = 0xFFFF;

/// CRC-16/CCITT over `data`: polynomial 0x8408, init 0xFFFF, LSB first, no final XOR.
///
/// This is the checksum MIPI CSI-2 uses for long packet footers. An empty buffer
/// yields the untouched initial register.
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    let crc = data.iter().fold(u32::from(INIT), |mut crc, &byte| {
        crc ^= u32::from(byte);
        for _ in 0..u8::BITS {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ u32::from(POLY_REFLECTED);
            } else {
                crc >>= 1;
            }
        }
        crc
    });
    (crc & 0xFFFF) as u16
}

/// A computed checksum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crc16(pub u16);

impl Crc16 {
    pub fn of(data: &[u8]) -> Self {
        Self(crc16_ccitt(data))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Bytes in transmission order: LSB first, then MSB.
    pub fn wire_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for Crc16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

//! Bit-level access to byte buffers, MSB-first.
//!
//! The format packs fields at arbitrary bit widths (12-bit dimensions,
//! 1/2/8-bit pixels, 2-bit palette channels), so both the reader and the
//! writer work in bits and only fall back to whole bytes as a convenience.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BitReadError {
    #[error("Insufficient bits: requested {requested}, only {available} remaining")]
    Insufficient { requested: u32, available: usize },
}

/// Sequential MSB-first bit reader over a byte slice.
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Absolute bit position from the start of `data`.
    bit: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit: 0 }
    }

    /// Bits left before the end of the buffer.
    pub fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.bit
    }

    /// Reads the next `count` bits (at most 32) as an unsigned integer.
    /// The first bit read becomes the most significant bit of the result.
    pub fn read_bits(&mut self, count: u32) -> Result<u32, BitReadError> {
        debug_assert!(count <= 32);
        if (count as usize) > self.remaining_bits() {
            return Err(BitReadError::Insufficient {
                requested: count,
                available: self.remaining_bits(),
            });
        }

        let mut value = 0u32;
        for _ in 0..count {
            let byte = self.data[self.bit / 8];
            let shift = 7 - (self.bit % 8);
            value = (value << 1) | ((byte >> shift) & 1) as u32;
            self.bit += 1;
        }
        Ok(value)
    }

    /// Reads the next 8 bits as a byte.
    pub fn read_byte(&mut self) -> Result<u8, BitReadError> {
        self.read_bits(8).map(|v| v as u8)
    }

    /// Skips forward to the next byte boundary. No-op when already aligned.
    pub fn align_to_byte(&mut self) {
        self.bit = (self.bit + 7) / 8 * 8;
    }
}

/// Sequential MSB-first bit writer appending to an owned byte buffer.
pub struct BitWriter {
    buf: Vec<u8>,
    /// Absolute bit position; `buf` always holds `ceil(bit / 8)` bytes.
    bit: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            bit: 0,
        }
    }

    /// Appends the low `count` bits of `value`, most significant first.
    /// Higher bits of `value` are ignored.
    pub fn write_bits(&mut self, value: u32, count: u32) {
        debug_assert!(count <= 32);
        let mut remaining = count;
        while remaining > 0 {
            remaining -= 1;
            if self.bit % 8 == 0 {
                self.buf.push(0);
            }
            if (value >> remaining) & 1 != 0 {
                let last = self.buf.len() - 1;
                self.buf[last] |= 1 << (7 - (self.bit % 8));
            }
            self.bit += 1;
        }
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.write_bits(byte as u32, 8);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Advances to the next byte boundary, zero-filling the tail of the
    /// current byte. No-op when already aligned.
    pub fn pad_to_byte(&mut self) {
        self.bit = (self.bit + 7) / 8 * 8;
    }

    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    /// Consumes the writer; a partially filled final byte is zero-padded.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits_msb_first() {
        let data = [0b1011_0001, 0b1100_0000];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(5).unwrap(), 0b1_0001);
        assert_eq!(reader.read_bits(2).unwrap(), 0b11);
        assert_eq!(reader.remaining_bits(), 6);
    }

    #[test]
    fn test_read_across_byte_boundary() {
        let data = [0x01, 0x20, 0x24];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(12).unwrap(), 0x012);
        assert_eq!(reader.read_bits(12).unwrap(), 0x024);
    }

    #[test]
    fn test_read_bits_insufficient() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);

        let result = reader.read_bits(16);
        assert!(matches!(
            result,
            Err(BitReadError::Insufficient {
                requested: 16,
                available: 8
            })
        ));
    }

    #[test]
    fn test_align_to_byte() {
        let data = [0b1000_0000, 0xAB];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(1).unwrap(), 1);
        reader.align_to_byte();
        assert_eq!(reader.read_byte().unwrap(), 0xAB);
    }

    #[test]
    fn test_write_bits_pads_final_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3);
        writer.write_bits(0b11, 2);

        assert_eq!(writer.into_bytes(), vec![0b1011_1000]);
    }

    #[test]
    fn test_write_bits_ignores_high_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFF, 2);

        assert_eq!(writer.into_bytes(), vec![0b1100_0000]);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let mut writer = BitWriter::new();
        writer.write_bits(0x012, 12);
        writer.write_bits(0x024, 12);
        writer.write_byte(0xC3);
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(12).unwrap(), 0x012);
        assert_eq!(reader.read_bits(12).unwrap(), 0x024);
        assert_eq!(reader.read_byte().unwrap(), 0xC3);
    }

    #[test]
    fn test_pad_to_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b11, 2);
        writer.pad_to_byte();
        writer.write_byte(0x5A);

        assert_eq!(writer.into_bytes(), vec![0b1100_0000, 0x5A]);
    }
}

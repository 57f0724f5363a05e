//! The mode byte and its bit fields.
//!
//! Layout, MSB to LSB: bits 7-6 pixel mode, bit 5 palette included,
//! bits 4-3 reserved, bits 2-1 color channels, bit 0 color accuracy.
//! Bit patterns are part of the wire format; every field encodes through an
//! explicit mask and shift rather than an enum discriminant cast.

use thiserror::Error;

use crate::color::{self, Color};

#[derive(Error, Debug)]
pub enum ModeError {
    #[error("Unrecognized pixel mode bits in mode byte {0:#010b}")]
    UnknownPixelMode(u8),
    #[error("Unrecognized color channel bits in mode byte {0:#010b}")]
    UnknownColorChannels(u8),
}

/// Bits-per-pixel selector. Also fixes the palette size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    OneBit,
    TwoBit,
    EightBit,
}

impl PixelMode {
    pub const MASK: u8 = 0b1100_0000;
    const SHIFT: u32 = 6;

    pub fn from_mode_byte(mode: u8) -> Result<Self, ModeError> {
        match (mode & Self::MASK) >> Self::SHIFT {
            0b00 => Ok(Self::OneBit),
            0b01 => Ok(Self::TwoBit),
            0b10 => Ok(Self::EightBit),
            _ => Err(ModeError::UnknownPixelMode(mode)),
        }
    }

    /// This mode's contribution to the mode byte.
    pub fn bits(self) -> u8 {
        let field: u8 = match self {
            Self::OneBit => 0b00,
            Self::TwoBit => 0b01,
            Self::EightBit => 0b10,
        };
        field << Self::SHIFT
    }

    /// Number of colors in a palette for this mode.
    pub fn color_count(self) -> usize {
        match self {
            Self::OneBit => 2,
            Self::TwoBit => 4,
            Self::EightBit => 256,
        }
    }

    pub fn from_color_count(count: usize) -> Option<Self> {
        match count {
            2 => Some(Self::OneBit),
            4 => Some(Self::TwoBit),
            256 => Some(Self::EightBit),
            _ => None,
        }
    }

    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::OneBit => 1,
            Self::TwoBit => 2,
            Self::EightBit => 8,
        }
    }
}

/// Whether palette bytes follow the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteIncluded {
    No,
    Yes,
}

impl PaletteIncluded {
    pub const MASK: u8 = 0b0010_0000;

    pub fn from_mode_byte(mode: u8) -> Self {
        if mode & Self::MASK != 0 {
            Self::Yes
        } else {
            Self::No
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => Self::MASK,
        }
    }
}

/// Channels stored per palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannels {
    Grayscale,
    Rgb,
    Rgba,
}

impl ColorChannels {
    pub const MASK: u8 = 0b0000_0110;
    const SHIFT: u32 = 1;

    pub fn from_mode_byte(mode: u8) -> Result<Self, ModeError> {
        match (mode & Self::MASK) >> Self::SHIFT {
            0b00 => Ok(Self::Grayscale),
            0b01 => Ok(Self::Rgb),
            0b10 => Ok(Self::Rgba),
            _ => Err(ModeError::UnknownColorChannels(mode)),
        }
    }

    pub fn bits(self) -> u8 {
        let field: u8 = match self {
            Self::Grayscale => 0b00,
            Self::Rgb => 0b01,
            Self::Rgba => 0b10,
        };
        field << Self::SHIFT
    }

    pub fn channel_count(self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Builds a color from exactly `channel_count` channel values.
    /// Wrong arity is a caller bug.
    pub fn color(self, values: &[u8]) -> Color {
        assert_eq!(
            values.len(),
            self.channel_count(),
            "channel value count must match layout"
        );
        match self {
            Self::Grayscale => color::grayscale(values[0]),
            Self::Rgb => color::rgb(values[0], values[1], values[2]),
            Self::Rgba => color::rgba(values[0], values[1], values[2], values[3]),
        }
    }
}

/// Bits stored per channel in an embedded palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorAccuracy {
    TwoBit,
    EightBit,
}

impl ColorAccuracy {
    pub const MASK: u8 = 0b0000_0001;

    pub fn from_mode_byte(mode: u8) -> Self {
        if mode & Self::MASK != 0 {
            Self::EightBit
        } else {
            Self::TwoBit
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::TwoBit => 0,
            Self::EightBit => Self::MASK,
        }
    }

    pub fn bits_per_channel(self) -> u32 {
        match self {
            Self::TwoBit => 2,
            Self::EightBit => 8,
        }
    }
}

/// Decoded view of the mode byte.
///
/// Reserved bits 4-3 are kept as read so a decoded header re-encodes
/// byte-identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    pub pixel_mode: PixelMode,
    pub palette_included: PaletteIncluded,
    pub color_channels: ColorChannels,
    pub color_accuracy: ColorAccuracy,
    reserved: u8,
}

impl Mode {
    pub const RESERVED_MASK: u8 = 0b0001_1000;

    pub fn new(
        pixel_mode: PixelMode,
        palette_included: PaletteIncluded,
        color_channels: ColorChannels,
        color_accuracy: ColorAccuracy,
    ) -> Self {
        Self {
            pixel_mode,
            palette_included,
            color_channels,
            color_accuracy,
            reserved: 0,
        }
    }

    pub fn from_byte(byte: u8) -> Result<Self, ModeError> {
        Ok(Self {
            pixel_mode: PixelMode::from_mode_byte(byte)?,
            palette_included: PaletteIncluded::from_mode_byte(byte),
            color_channels: ColorChannels::from_mode_byte(byte)?,
            color_accuracy: ColorAccuracy::from_mode_byte(byte),
            reserved: byte & Self::RESERVED_MASK,
        })
    }

    pub fn byte(&self) -> u8 {
        self.pixel_mode.bits()
            | self.palette_included.bits()
            | self.reserved
            | self.color_channels.bits()
            | self.color_accuracy.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_byte_fields() {
        let mode = Mode::from_byte(0b1010_0101).unwrap();

        assert_eq!(mode.pixel_mode, PixelMode::EightBit);
        assert_eq!(mode.palette_included, PaletteIncluded::Yes);
        assert_eq!(mode.color_channels, ColorChannels::Rgba);
        assert_eq!(mode.color_accuracy, ColorAccuracy::EightBit);
        assert_eq!(mode.byte(), 0b1010_0101);
    }

    #[test]
    fn test_zero_mode_byte() {
        let mode = Mode::new(
            PixelMode::OneBit,
            PaletteIncluded::No,
            ColorChannels::Grayscale,
            ColorAccuracy::TwoBit,
        );
        assert_eq!(mode.byte(), 0b0000_0000);
    }

    #[test]
    fn test_reserved_bits_round_trip() {
        let mode = Mode::from_byte(0b0001_1000).unwrap();
        assert_eq!(mode.byte(), 0b0001_1000);
    }

    #[test]
    fn test_unknown_pixel_mode() {
        assert!(matches!(
            Mode::from_byte(0b1100_0000),
            Err(ModeError::UnknownPixelMode(0b1100_0000))
        ));
    }

    #[test]
    fn test_unknown_color_channels() {
        assert!(matches!(
            Mode::from_byte(0b0000_0110),
            Err(ModeError::UnknownColorChannels(0b0000_0110))
        ));
    }

    #[test]
    fn test_color_counts() {
        assert_eq!(PixelMode::OneBit.color_count(), 2);
        assert_eq!(PixelMode::TwoBit.color_count(), 4);
        assert_eq!(PixelMode::EightBit.color_count(), 256);
        assert_eq!(PixelMode::from_color_count(4), Some(PixelMode::TwoBit));
        assert_eq!(PixelMode::from_color_count(5), None);
    }

    #[test]
    fn test_channel_counts() {
        assert_eq!(ColorChannels::Grayscale.channel_count(), 1);
        assert_eq!(ColorChannels::Rgb.channel_count(), 3);
        assert_eq!(ColorChannels::Rgba.channel_count(), 4);
    }
}

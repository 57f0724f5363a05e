use log::{debug, error, info};
use thiserror::Error;

use super::format::{Image, SIGNATURE};
use crate::bitio::BitReader;
use crate::color::expand_two_bit;
use crate::flags::{ColorAccuracy, Mode, ModeError, PaletteIncluded, PixelMode};
use crate::palette::{default_palette, Palette};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Missing mode byte")]
    MissingModeByte,
    #[error("Invalid mode byte")]
    InvalidModeByte(#[from] ModeError),
    #[error("Failed to parse image dimensions")]
    DimensionParsingFailed,
    #[error("Unexpected end of data while reading palette color #{0}")]
    UnexpectedEofPaletteColor(usize),
    #[error("Not enough bits to parse for pixels")]
    NotEnoughPixelBits,
}

/// Decodes a fully buffered byte sequence into an [`Image`].
///
/// Decoding is a single forward pass: signature, mode byte, dimensions,
/// optional palette, pixel plane. Each step validates before the next runs
/// and any failure is terminal; no partial image is ever returned.
pub fn decode(bytes: &[u8]) -> Result<Image, DecodeError> {
    let mut reader = BitReader::new(bytes);

    let mut signature = [0u8; Image::SIGNATURE_SIZE];
    for byte in &mut signature {
        *byte = reader
            .read_byte()
            .map_err(|_| DecodeError::InvalidSignature)?;
    }
    if signature != SIGNATURE {
        error!("Invalid signature: {:?}", signature);
        return Err(DecodeError::InvalidSignature);
    }
    debug!("Signature validated successfully");

    let mode_byte = reader
        .read_byte()
        .map_err(|_| DecodeError::MissingModeByte)?;
    let mode = Mode::from_byte(mode_byte)?;
    debug!("Mode byte {:#010b} decoded: {:?}", mode_byte, mode);

    let width = reader
        .read_bits(12)
        .map_err(|_| DecodeError::DimensionParsingFailed)? as u16;
    let height = reader
        .read_bits(12)
        .map_err(|_| DecodeError::DimensionParsingFailed)? as u16;
    debug!("Image dimensions read: width={} height={}", width, height);

    let palette = match mode.palette_included {
        PaletteIncluded::Yes => decode_palette(&mut reader, mode)?,
        PaletteIncluded::No => default_palette(mode.pixel_mode).clone(),
    };

    let pixels = decode_pixels(&mut reader, mode.pixel_mode, width, height)?;
    info!("Decoded {}x{} image", width, height);

    Ok(Image::new(mode, width, height, palette, pixels))
}

fn decode_palette(reader: &mut BitReader, mode: Mode) -> Result<Palette, DecodeError> {
    let color_count = mode.pixel_mode.color_count();
    let channel_count = mode.color_channels.channel_count();
    let bits_per_channel = mode.color_accuracy.bits_per_channel();

    let mut colors = Vec::with_capacity(color_count);
    for i in 0..color_count {
        let mut values = [0u8; 4];
        for value in values.iter_mut().take(channel_count) {
            let raw = reader
                .read_bits(bits_per_channel)
                .map_err(|_| DecodeError::UnexpectedEofPaletteColor(i))?
                as u8;
            *value = match mode.color_accuracy {
                ColorAccuracy::TwoBit => expand_two_bit(raw),
                ColorAccuracy::EightBit => raw,
            };
        }
        colors.push(mode.color_channels.color(&values[..channel_count]));
    }
    debug!("Read {} palette colors", color_count);

    // The pixel plane starts on a byte boundary.
    reader.align_to_byte();

    Ok(Palette::new(mode.pixel_mode, colors))
}

fn decode_pixels(
    reader: &mut BitReader,
    pixel_mode: PixelMode,
    width: u16,
    height: u16,
) -> Result<Vec<u8>, DecodeError> {
    let bits_per_pixel = pixel_mode.bits_per_pixel();
    let count = width as usize * height as usize;

    let mut pixels = Vec::with_capacity(count);
    for _ in 0..count {
        let index = reader
            .read_bits(bits_per_pixel)
            .map_err(|_| DecodeError::NotEnoughPixelBits)?;
        pixels.push(index as u8);
    }
    Ok(pixels)
}

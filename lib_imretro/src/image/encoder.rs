use log::{debug, error, info};
use thiserror::Error;

use super::format::{Image, SIGNATURE};
use crate::bitio::BitWriter;
use crate::flags::{ColorAccuracy, PaletteIncluded};

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Output buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
    #[error("Image dimensions {width}x{height} exceed the 12-bit limit of 4095")]
    DimensionsTooLarge { width: u16, height: u16 },
}

/// Encodes an [`Image`] into a freshly allocated buffer of exactly
/// [`Image::encoded_byte_count`] bytes.
pub fn encode(image: &Image) -> Result<Vec<u8>, EncodeError> {
    if image.width > Image::MAX_DIMENSION || image.height > Image::MAX_DIMENSION {
        error!(
            "Dimensions {}x{} do not fit in 12 bits",
            image.width, image.height
        );
        return Err(EncodeError::DimensionsTooLarge {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.encoded_byte_count();
    let mut writer = BitWriter::with_capacity(expected);

    writer.write_bytes(&SIGNATURE);
    writer.write_byte(image.mode_byte());
    writer.write_bits(image.width as u32, 12);
    writer.write_bits(image.height as u32, 12);
    debug!(
        "Header written: mode={:#010b} width={} height={}",
        image.mode_byte(),
        image.width,
        image.height
    );

    if image.mode.palette_included == PaletteIncluded::Yes {
        encode_palette(&mut writer, image);
    }

    let bits_per_pixel = image.mode.pixel_mode.bits_per_pixel();
    for &index in &image.pixels {
        writer.write_bits(index as u32, bits_per_pixel);
    }
    debug!(
        "Pixel plane written: {} pixels at {} bits each",
        image.pixels.len(),
        bits_per_pixel
    );

    let bytes = writer.into_bytes();
    debug_assert_eq!(bytes.len(), expected);
    info!("Encoded {}x{} image in {} bytes", image.width, image.height, bytes.len());
    Ok(bytes)
}

/// Encodes into a caller-supplied buffer, which must hold at least
/// [`Image::encoded_byte_count`] bytes. Returns the number of bytes written.
pub fn encode_into(image: &Image, buffer: &mut [u8]) -> Result<usize, EncodeError> {
    let needed = image.encoded_byte_count();
    if buffer.len() < needed {
        error!(
            "Output buffer too small: need {} bytes, got {}",
            needed,
            buffer.len()
        );
        return Err(EncodeError::BufferTooSmall {
            needed,
            actual: buffer.len(),
        });
    }

    let bytes = encode(image)?;
    buffer[..needed].copy_from_slice(&bytes);
    Ok(needed)
}

fn encode_palette(writer: &mut BitWriter, image: &Image) {
    let channel_count = image.mode.color_channels.channel_count();
    let accuracy = image.mode.color_accuracy;

    for &color in image.palette.colors() {
        let channels = [color.r, color.g, color.b, color.a];
        for &value in channels.iter().take(channel_count) {
            match accuracy {
                // Lossy: only the top two bits survive.
                ColorAccuracy::TwoBit => writer.write_bits((value >> 6) as u32, 2),
                ColorAccuracy::EightBit => writer.write_bits(value as u32, 8),
            }
        }
    }
    // Keep the pixel plane byte-aligned.
    writer.pad_to_byte();
    debug!(
        "Palette written: {} colors, {} channels each",
        image.palette.color_count(),
        channel_count
    );
}

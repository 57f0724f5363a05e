use crate::color::{Color, TRANSPARENT};
use crate::flags::{Mode, PaletteIncluded};
use crate::palette::Palette;

/// Every encoded image starts with this ASCII signature.
pub const SIGNATURE: [u8; 7] = *b"IMRETRO";

/// A decoded or encodable bitmap: mode flags, dimensions, a palette sized to
/// the pixel mode, and a row-major plane of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub mode: Mode,
    pub width: u16,
    pub height: u16,
    pub palette: Palette,
    /// Palette indices, `width * height` entries, x varies fastest.
    pub pixels: Vec<u8>,
}

impl Image {
    pub const SIGNATURE_SIZE: usize = SIGNATURE.len();
    pub const MODE_SIZE: usize = 1;
    /// Two 12-bit dimensions packed into three bytes.
    pub const DIMENSIONS_SIZE: usize = 3;
    pub const HEADER_SIZE: usize = Self::SIGNATURE_SIZE + Self::MODE_SIZE + Self::DIMENSIONS_SIZE;
    /// Dimensions are stored as 12-bit fields.
    pub const MAX_DIMENSION: u16 = 0x0FFF;

    /// `pixels` must hold exactly `width * height` entries.
    pub fn new(mode: Mode, width: u16, height: u16, palette: Palette, pixels: Vec<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel count must match dimensions"
        );
        Self {
            mode,
            width,
            height,
            palette,
            pixels,
        }
    }

    pub fn mode_byte(&self) -> u8 {
        self.mode.byte()
    }

    /// The palette color of the pixel at `(x, y)`. Out-of-range coordinates
    /// resolve to the transparent sentinel.
    pub fn color_at(&self, x: usize, y: usize) -> Color {
        if x >= self.width as usize {
            return TRANSPARENT;
        }
        match self.pixels.get(y * self.width as usize + x) {
            Some(&index) => self.palette.color(index as usize),
            None => TRANSPARENT,
        }
    }

    /// Exact size of this image once encoded. The palette block and the
    /// pixel plane are each padded to a byte boundary.
    pub fn encoded_byte_count(&self) -> usize {
        let palette_bits = match self.mode.palette_included {
            PaletteIncluded::Yes => {
                self.mode.pixel_mode.color_count()
                    * self.mode.color_channels.channel_count()
                    * self.mode.color_accuracy.bits_per_channel() as usize
            }
            PaletteIncluded::No => 0,
        };
        let pixel_bits = self.mode.pixel_mode.bits_per_pixel() as usize * self.pixels.len();

        Self::HEADER_SIZE + palette_bits.div_ceil(8) + pixel_bits.div_ceil(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{ColorAccuracy, ColorChannels, PixelMode};
    use crate::palette::default_palette;

    fn plain_mode(pixel_mode: PixelMode) -> Mode {
        Mode::new(
            pixel_mode,
            PaletteIncluded::No,
            ColorChannels::Grayscale,
            ColorAccuracy::TwoBit,
        )
    }

    #[test]
    fn test_color_at_out_of_range() {
        let image = Image::new(
            plain_mode(PixelMode::OneBit),
            2,
            2,
            default_palette(PixelMode::OneBit).clone(),
            vec![0, 1, 1, 0],
        );

        assert_eq!(image.color_at(2, 0), TRANSPARENT);
        assert_eq!(image.color_at(0, 2), TRANSPARENT);
    }

    #[test]
    #[should_panic(expected = "pixel count must match dimensions")]
    fn test_pixel_count_mismatch_panics() {
        Image::new(
            plain_mode(PixelMode::OneBit),
            2,
            2,
            default_palette(PixelMode::OneBit).clone(),
            vec![0, 1],
        );
    }
}

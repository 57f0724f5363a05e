//! Fixed-size ordered color tables and the per-depth quantization rules.

use std::borrow::Cow;

use crate::color::{self, expand_two_bit, Color, TRANSPARENT};
use crate::flags::PixelMode;

/// An ordered color table sized to a pixel mode (2, 4 or 256 colors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pixel_mode: PixelMode,
    colors: Cow<'static, [Color]>,
}

impl Palette {
    /// `colors` must hold exactly `pixel_mode.color_count()` entries.
    pub fn new(pixel_mode: PixelMode, colors: Vec<Color>) -> Self {
        assert_eq!(
            colors.len(),
            pixel_mode.color_count(),
            "palette size must match pixel mode"
        );
        Self {
            pixel_mode,
            colors: Cow::Owned(colors),
        }
    }

    pub fn pixel_mode(&self) -> PixelMode {
        self.pixel_mode
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    /// The color at `index`, or a fully transparent sentinel when the index
    /// is out of range. Malformed indices degrade instead of failing.
    pub fn color(&self, index: usize) -> Color {
        self.colors.get(index).copied().unwrap_or(TRANSPARENT)
    }

    /// Maps an arbitrary color to a palette index.
    ///
    /// The rule depends only on the pixel mode and the channel values, never
    /// on the palette contents, so default palettes and decoder round-trips
    /// stay consistent.
    pub fn quantize(&self, color: Color) -> u8 {
        let Color { r, g, b, a } = color;
        match self.pixel_mode {
            PixelMode::OneBit => {
                if (r | g | b) < 0x80 || a < 0x80 {
                    0
                } else {
                    1
                }
            }
            PixelMode::TwoBit => {
                if a < 0x80 {
                    0
                } else {
                    (r | g | b) >> 6
                }
            }
            // Top two bits of each channel, r lowest, a highest.
            PixelMode::EightBit => (r >> 6) | ((g & 0xC0) >> 4) | ((b & 0xC0) >> 2) | (a & 0xC0),
        }
    }

    /// Quantizes `color` and returns the palette color it lands on.
    pub fn convert(&self, color: Color) -> Color {
        self.color(self.quantize(color) as usize)
    }

    /// The palette color nearest to `color` by Euclidean distance over all
    /// four channels.
    pub fn nearest(&self, color: Color) -> Color {
        self.colors
            .iter()
            .copied()
            .min_by_key(|candidate| distance_squared(*candidate, color))
            .unwrap_or(TRANSPARENT)
    }
}

fn distance_squared(a: Color, b: Color) -> u32 {
    let channel = |x: u8, y: u8| {
        let d = x as i32 - y as i32;
        (d * d) as u32
    };
    channel(a.r, b.r) + channel(a.g, b.g) + channel(a.b, b.b) + channel(a.a, b.a)
}

static ONE_BIT_COLORS: [Color; 2] = [color::grayscale(0x00), color::grayscale(0xFF)];

static TWO_BIT_COLORS: [Color; 4] = [
    color::grayscale(0x00),
    color::grayscale(0x55),
    color::grayscale(0xAA),
    color::grayscale(0xFF),
];

// The index is four 2-bit fields (r, g, b, a from low to high), each expanded
// to 8 bits by replication. Inverse of the eight-bit quantize rule.
static EIGHT_BIT_COLORS: [Color; 256] = {
    let mut colors = [TRANSPARENT; 256];
    let mut i = 0;
    while i < 256 {
        let index = i as u8;
        colors[i] = color::rgba(
            expand_two_bit(index & 0b11),
            expand_two_bit((index >> 2) & 0b11),
            expand_two_bit((index >> 4) & 0b11),
            expand_two_bit(index >> 6),
        );
        i += 1;
    }
    colors
};

/// Default black/white palette for one-bit images.
pub static DEFAULT_1BIT: Palette = Palette {
    pixel_mode: PixelMode::OneBit,
    colors: Cow::Borrowed(&ONE_BIT_COLORS),
};

/// Default four-level grayscale palette for two-bit images.
pub static DEFAULT_2BIT: Palette = Palette {
    pixel_mode: PixelMode::TwoBit,
    colors: Cow::Borrowed(&TWO_BIT_COLORS),
};

/// Default 256-color palette for eight-bit images.
pub static DEFAULT_8BIT: Palette = Palette {
    pixel_mode: PixelMode::EightBit,
    colors: Cow::Borrowed(&EIGHT_BIT_COLORS),
};

/// The palette assumed when a decoded image has no embedded palette.
pub fn default_palette(pixel_mode: PixelMode) -> &'static Palette {
    match pixel_mode {
        PixelMode::OneBit => &DEFAULT_1BIT,
        PixelMode::TwoBit => &DEFAULT_2BIT,
        PixelMode::EightBit => &DEFAULT_8BIT,
    }
}

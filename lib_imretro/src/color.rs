//! Glue around the `rgb` crate's RGBA color value.

pub type Color = rgb::RGBA8;

/// Sentinel returned for out-of-range palette lookups.
pub const TRANSPARENT: Color = Color {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

pub const fn grayscale(value: u8) -> Color {
    Color {
        r: value,
        g: value,
        b: value,
        a: 0xFF,
    }
}

pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color { r, g, b, a: 0xFF }
}

pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color { r, g, b, a }
}

/// Expands a 2-bit channel value to the full 8-bit range by bit replication,
/// mapping {0, 1, 2, 3} to {0x00, 0x55, 0xAA, 0xFF}.
pub const fn expand_two_bit(value: u8) -> u8 {
    let value = value | (value << 2);
    value | (value << 4)
}

/// `#rrggbb` representation, lowercase. Alpha is not included.
pub fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Opacity in `[0, 1]`.
pub fn opacity(color: Color) -> f64 {
    color.a as f64 / 0xFF as f64
}

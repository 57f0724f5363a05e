pub mod bitio;
pub mod color;
pub mod flags;
pub mod image;
pub mod palette;

use log::*;
use std::fs::File;
use std::io::Write;

pub use crate::color::Color;
pub use crate::flags::{ColorAccuracy, ColorChannels, Mode, PaletteIncluded, PixelMode};
pub use crate::image::decoder::DecodeError;
pub use crate::image::encoder::EncodeError;
pub use crate::image::format::Image;
pub use crate::image::{decode, encode, encode_into};
pub use crate::palette::{default_palette, Palette};

pub fn init_logging() {
    let target = Box::new(File::create("log.txt").expect("Can't create file"));

    env_logger::Builder::new()
        .target(env_logger::Target::Pipe(target))
        .filter(Some("lib_imretro"), LevelFilter::Debug)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

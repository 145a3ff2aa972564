//! Plain-text PPM ("P3") image output.

use crate::renderer::{linear_to_gamma, ImageBuffer};
use crate::Color;
use glint_math::Interval;
use std::io::{self, Write};
use thiserror::Error;

/// Errors writing an image.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("image dimensions {width}x{height} do not match pixel count {pixels}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        pixels: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Gamma-correct and quantize a linear color to 8-bit RGB.
///
/// Components are square-root encoded, clamped to [0, 0.999], then
/// scaled by 256 and truncated.
pub fn encode_color(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Write an image as plain-text PPM.
///
/// Emits the header `P3\n<width> <height>\n255\n` followed by one
/// `R G B` line per pixel in row-major order from the top left.
pub fn write_ppm<W: Write>(out: &mut W, image: &ImageBuffer) -> Result<(), OutputError> {
    let expected = (image.width * image.height) as usize;
    if image.pixels.len() != expected {
        return Err(OutputError::DimensionMismatch {
            width: image.width,
            height: image.height,
            pixels: image.pixels.len(),
        });
    }

    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for color in &image.pixels {
        let [r, g, b] = encode_color(*color);
        writeln!(out, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

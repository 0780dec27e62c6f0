//! Reflection-line stripe texture.
//!
//! A white image crossed by a regular grid of black lines. Sphere-mapped
//! onto a shiny surface, the lines reveal discontinuities in the surface
//! normals.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::{MeshError, Result};

/// Default edge length of the texture in pixels.
pub const DEFAULT_TEXTURE_SIZE: u32 = 256;

const LINE_PERIOD: u32 = 10;
const LINE_WIDTH: u32 = 4;

fn on_line(c: u32) -> bool {
    ((c + LINE_WIDTH / 2) / LINE_WIDTH) % LINE_PERIOD == 0
}

/// Build the `size` x `size` stripe texture.
///
/// A pixel is black when `((x + 2) / 4) % 10 == 0` or `((y + 2) / 4) % 10 == 0`
/// and white otherwise.
pub fn reflection_texture(size: u32) -> Result<RgbImage> {
    if size == 0 {
        return Err(MeshError::invalid_param("size", size, "must be positive"));
    }

    Ok(RgbImage::from_fn(size, size, |x, y| {
        if on_line(x) || on_line(y) {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    }))
}

/// Build the stripe texture and write it as a PNG.
pub fn save_reflection_texture<P: AsRef<Path>>(path: P, size: u32) -> Result<()> {
    let path = path.as_ref();
    let texture = reflection_texture(size)?;
    texture
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| MeshError::SaveError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    log::info!("wrote {}x{} reflection texture to {}", size, size, path.display());
    Ok(())
}

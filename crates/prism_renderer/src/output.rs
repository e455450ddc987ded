//! Writing rendered images to disk.

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use log::info;

use crate::{OutputError, OutputResult, RenderedImage};

/// Convert to 8-bit RGB. Values are linear and already in [0, 1].
pub fn to_rgb_image(image: &RenderedImage) -> OutputResult<RgbImage> {
    let len = image.width as usize * image.height as usize;
    if image.red.len() != len || image.green.len() != len || image.blue.len() != len {
        return Err(OutputError::BufferSize {
            width: image.width,
            height: image.height,
        });
    }

    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;
    Ok(ImageBuffer::from_fn(image.width, image.height, |x, y| {
        let color = image.get(y, x);
        Rgb([to_u8(color.x), to_u8(color.y), to_u8(color.z)])
    }))
}

/// Save the image; the format follows the file extension.
pub fn save_image<P: AsRef<Path>>(image: &RenderedImage, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    to_rgb_image(image)?.save(path)?;
    info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

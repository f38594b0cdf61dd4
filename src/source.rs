// source.rs - Image decoding and resizing into a flat pixel buffer
//
// The `image` crate owns file formats; everything downstream sees only a
// row-major RGB buffer.

use image::{DynamicImage, GenericImageView, imageops::FilterType};
use std::path::Path;

use crate::config::Error;

/// A decoded image as a flat, row-major list of RGB triples.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PixelBuffer {
    /// Build a buffer from raw row-major pixels. Panics if the pixel count
    /// doesn't match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Self {
        assert_eq!((width * height) as usize, pixels.len());
        Self { width, height, pixels }
    }

    /// Decode an image file and convert it, resizing to `target_width`
    /// (aspect preserved) unless `no_resize` is set.
    pub fn load(path: &Path, target_width: u32, no_resize: bool) -> Result<Self, Error> {
        let img = image::open(path)?;
        Self::from_image(&img, target_width, no_resize)
    }

    /// Convert an already-decoded image.
    ///
    /// The resize target (`target_width` by `target_width * aspect`,
    /// truncated) is validated before any resampling: either dimension <= 1
    /// is an error. The target is checked even under `no_resize`, which only
    /// skips the resampling itself.
    pub fn from_image(img: &DynamicImage, target_width: u32, no_resize: bool) -> Result<Self, Error> {
        let aspect = img.height() as f64 / img.width() as f64;
        let target_height = (target_width as f64 * aspect) as u32;
        if target_width <= 1 || target_height <= 1 {
            return Err(Error::InvalidDimension {
                width: target_width,
                height: target_height,
            });
        }

        let rgb = if no_resize {
            img.to_rgb8()
        } else {
            img.resize_exact(target_width, target_height, FilterType::Lanczos3)
                .into_rgb8()
        };

        let (width, height) = (rgb.width(), rgb.height());
        let pixels = rgb.pixels().map(|p| [p[0], p[1], p[2]]).collect();
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels in row-major order (left-to-right, top-to-bottom).
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }
}

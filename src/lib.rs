// img2scenegraph - Convert a raster image into a SceneGraph XML document
//
// Pipeline:
//   1. Decode image, optionally resize to a target width (aspect preserved)
//   2. Map each pixel to a transform block positioning one primitive
//   3. Wrap the blocks in the fixed lights/camera/view scaffolding
//   4. Serialize the tree as indented tagged text
//
// The binary feeds stdout; everything here works on in-memory values so the
// geometry can be tested structurally.

pub mod config;
pub mod geometry;
pub mod scene;
pub mod serialize;
pub mod source;

pub use config::{Config, Error};
pub use scene::SceneDocument;

use image::DynamicImage;
use rand::Rng;

/// Run the full conversion on a decoded image.
///
/// Validates the configuration and the intended output dimensions before any
/// per-pixel work, so the result is either a complete document or an error
/// with nothing produced.
pub fn build_document<R: Rng>(
    img: &DynamicImage,
    cfg: &Config,
    rng: &mut R,
) -> Result<SceneDocument, Error> {
    cfg.validate()?;
    let buf = source::PixelBuffer::from_image(img, cfg.width, cfg.no_resize)?;
    let pixel_nodes = geometry::map_pixels(&buf, cfg, rng);
    Ok(scene::assemble(pixel_nodes, cfg.anglex, cfg.angley))
}

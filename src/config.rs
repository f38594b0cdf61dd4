// config.rs - Run configuration and error type
//
// The CLI layer parses arguments and hands the library a validated Config;
// no argument state lives in globals.

use log::warn;

/// Shape names the downstream scene parser is known to accept. Anything else
/// is passed through with a warning, since the primitive vocabulary belongs
/// to the renderer.
pub const KNOWN_SHAPES: &[&str] = &["cube", "cylinder", "cone", "sphere"];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("image size {width}x{height} is too small; both sides must be > 1")]
    InvalidDimension { width: u32, height: u32 },

    #[error("extrude constant must be > 0 (got {0})")]
    InvalidExtrudeConst(f64),

    #[error("failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),
}

/// Options controlling the pixel-to-geometry conversion.
#[derive(Debug, Clone)]
pub struct Config {
    /// Primitive placed at each pixel.
    pub shape: String,
    /// Target width for the aspect-preserving resize. Always validated, even
    /// when `no_resize` skips the resampling itself.
    pub width: u32,
    /// Keep the image's native dimensions instead of resizing.
    pub no_resize: bool,
    /// Scale each primitive's depth by the pixel's brightness.
    pub extrude: bool,
    /// Flip the extrusion so dark pixels become tall.
    pub invert: bool,
    /// Multiplier on the extrusion depth; must be positive.
    pub extrude_const: f64,
    /// Perturb each pixel's facing with a random rotation.
    pub noise: bool,
    /// Global view rotation about the X axis, degrees.
    pub anglex: f64,
    /// Global view rotation about the Y axis, degrees.
    pub angley: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shape: "cube".into(),
            width: 100,
            no_resize: false,
            extrude: false,
            invert: false,
            extrude_const: 1.0,
            noise: false,
            anglex: 0.0,
            angley: 0.0,
        }
    }
}

impl Config {
    /// Check the parameter bounds that don't depend on the image.
    ///
    /// Runs once, before any per-pixel work, so a bad configuration never
    /// produces a partial document.
    pub fn validate(&self) -> Result<(), Error> {
        if self.extrude_const <= 0.0 {
            return Err(Error::InvalidExtrudeConst(self.extrude_const));
        }
        if !KNOWN_SHAPES.contains(&self.shape.as_str()) {
            warn!("shape name {:?} not standard; passing it through", self.shape);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn zero_extrude_const_rejected() {
        let cfg = Config {
            extrude_const: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(Error::InvalidExtrudeConst(c)) if c == 0.0
        ));
    }

    #[test]
    fn negative_extrude_const_rejected() {
        let cfg = Config {
            extrude_const: -2.5,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nonstandard_shape_is_not_fatal() {
        let cfg = Config {
            shape: "torus".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_ok());
    }
}

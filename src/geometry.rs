// geometry.rs - Per-pixel geometry mapping
//
// Turns each pixel into a transform block positioning one primitive in the
// XY plane, with brightness-driven depth when extrusion is on.

use rand::Rng;
use rand_distr::Normal;

use crate::config::Config;
use crate::scene::{PrimitiveNode, SceneNode, TransformNode, TransformOp};
use crate::source::PixelBuffer;

// Noise perturbs the facing axis around (1, 1, 0) and the angle around 0.
const NOISE_AXIS_MEAN: f64 = 1.0;
const NOISE_AXIS_STDDEV: f64 = 0.1;
const NOISE_ANGLE_STDDEV_DEG: f64 = 15.0;

/// Footprint scale fitting the whole image in a unit-scale region.
pub fn footprint_scale(width: u32, height: u32) -> f64 {
    1.0 / width.max(height) as f64
}

/// Depth (Z) scale for one pixel.
///
/// Without extrusion every pixel gets the uniform footprint scale. With it,
/// depth grows linearly with brightness (mean of the normalized channels) up
/// to `extrude_const * scale`; inverting takes the complement, so the two
/// mappings for a pixel always sum to that maximum.
pub fn depth_scale(rgb: [u8; 3], scale: f64, cfg: &Config) -> f64 {
    if !cfg.extrude {
        return scale;
    }
    let mean = (rgb[0] as f64 + rgb[1] as f64 + rgb[2] as f64) / (3.0 * 255.0);
    let br = mean * cfg.extrude_const * scale;
    if cfg.invert {
        cfg.extrude_const * scale - br
    } else {
        br
    }
}

/// Map every pixel to a transform block wrapping one primitive.
///
/// Output order is row-major, matching the input buffer, so consumers can
/// correlate geometry with source pixels. The op order inside each block is
/// semantically required: translate, footprint scale, depth scale, then the
/// facing rotations, each applying in the frame of the previous.
pub fn map_pixels<R: Rng>(buf: &PixelBuffer, cfg: &Config, rng: &mut R) -> Vec<SceneNode> {
    let (w, h) = (buf.width(), buf.height());
    let scale = footprint_scale(w, h);

    let axis_dist = Normal::new(NOISE_AXIS_MEAN, NOISE_AXIS_STDDEV).expect("valid stddev");
    let angle_dist = Normal::new(0.0, NOISE_ANGLE_STDDEV_DEG).expect("valid stddev");

    buf.pixels()
        .iter()
        .enumerate()
        .map(|(i, &rgb)| {
            let col = (i as u32 % w) as f64;
            let row = (i as u32 / w) as f64;

            // Pixel centers, image centered on the origin in the XY plane.
            let px = (col + 0.5 - w as f64 / 2.0) * scale;
            let py = (h as f64 / 2.0 - row - 0.5) * scale;

            let br = depth_scale(rgb, scale, cfg);

            let mut ops = vec![
                TransformOp::Translate([px, py, 0.0]),
                TransformOp::Scale([scale, scale, 1.0]),
                TransformOp::Scale([1.0, 1.0, br]),
                // Turn the solid so its top faces the camera (matters for
                // cylinders, cones, ...).
                TransformOp::Rotate { axis: [1.0, 0.0, 0.0], angle_deg: 90.0 },
            ];
            if cfg.noise {
                ops.push(TransformOp::Rotate {
                    axis: [rng.sample(axis_dist), rng.sample(axis_dist), 0.0],
                    angle_deg: rng.sample(angle_dist),
                });
            }

            SceneNode::Transform(TransformNode {
                ops,
                child: Box::new(SceneNode::Primitive(PrimitiveNode {
                    shape: cfg.shape.clone(),
                    diffuse: [
                        rgb[0] as f64 / 255.0,
                        rgb[1] as f64 / 255.0,
                        rgb[2] as f64 / 255.0,
                    ],
                })),
            })
        })
        .collect()
}

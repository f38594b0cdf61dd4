// img2scenegraph CLI - image file in, SceneGraph XML on stdout
//
// Diagnostics go to stderr via the logger; stdout carries only the document.

use anyhow::Context;
use clap::Parser;
use image::GenericImageView;
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use img2scenegraph::{Config, build_document, serialize};

/// Convert an image into a SceneGraph XML file, one primitive per pixel.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the image file to be processed.
    filename: PathBuf,

    /// Width to resize the image to, in pixels.
    #[arg(short, long, default_value_t = 100)]
    width: u32,

    /// Shape used for each pixel; any name the scene parser accepts.
    #[arg(short, long, default_value = "cube")]
    shape: String,

    /// Skip resizing and use the image file's own size.
    #[arg(short = 'r', long)]
    no_resize: bool,

    /// Add noise to the direction each pixel is facing.
    #[arg(short, long)]
    noise: bool,

    /// Extrude pixels based on their brightness.
    #[arg(short, long)]
    extrude: bool,

    /// Invert the extrusion, so light colors are less extruded.
    #[arg(short, long)]
    invert: bool,

    /// Constant by which to scale the extrusions; must be > 0.
    #[arg(short = 'c', long, default_value_t = 1.0)]
    extrude_const: f64,

    /// Rotation to make about the X axis, in degrees.
    #[arg(long, default_value_t = 0.0)]
    anglex: f64,

    /// Rotation to make about the Y axis, in degrees.
    #[arg(long, default_value_t = 0.0)]
    angley: f64,

    /// Seed for the noise generator; omit for a fresh seed each run.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> (PathBuf, Config, Option<u64>) {
        let cfg = Config {
            shape: self.shape,
            width: self.width,
            no_resize: self.no_resize,
            extrude: self.extrude,
            invert: self.invert,
            extrude_const: self.extrude_const,
            noise: self.noise,
            anglex: self.anglex,
            angley: self.angley,
        };
        (self.filename, cfg, self.seed)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let (filename, cfg, seed) = Args::parse().into_config();

    let img = image::open(&filename)
        .with_context(|| format!("failed to load image {}", filename.display()))?;
    info!("loaded {} ({}x{})", filename.display(), img.width(), img.height());

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let doc = build_document(&img, &cfg, &mut rng)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    serialize::write_scene(&mut out, &doc)?;
    out.flush()?;
    Ok(())
}

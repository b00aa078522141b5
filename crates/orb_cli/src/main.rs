//! `orb` - render a sphere scene file to an image.

mod output;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use orb_core::{load_camera_settings, load_scene_into, CameraSettings, Scene};
use orb_renderer::{Camera, World};

#[derive(Parser, Debug)]
#[command(name = "orb", version, about = "Offline stochastic sphere ray tracer")]
struct Cli {
    /// Scene file: one sphere per line (x y z radius material params...)
    #[arg(long, default_value = "sphere_data.txt")]
    path: PathBuf,

    /// Output image; `.ppm` is written as plain text, other extensions via `image`
    #[arg(short, long, default_value = "output.ppm")]
    output: PathBuf,

    /// JSON file with camera settings; missing keys keep their defaults
    #[arg(long)]
    camera: Option<PathBuf>,

    /// Override the image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Override samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Seed for the per-pixel random streams
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Do not add the large gray ground sphere
    #[arg(long)]
    no_ground: bool,
}

impl Cli {
    fn camera_settings(&self) -> Result<CameraSettings> {
        let mut settings = match &self.camera {
            Some(path) => load_camera_settings(path)
                .with_context(|| format!("Failed to load camera settings from {:?}", path))?,
            None => CameraSettings::default(),
        };

        if let Some(width) = self.width {
            settings.image_width = width;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }

        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let start = Instant::now();

    let mut scene = if cli.no_ground {
        Scene::new()
    } else {
        Scene::with_ground()
    };
    load_scene_into(&cli.path, &mut scene)
        .with_context(|| format!("Failed to load scene {:?}", cli.path))?;

    let world = World::new(scene).context("Scene failed validation")?;
    let camera = Camera::new(cli.camera_settings()?).context("Invalid camera settings")?;
    log::info!("Scene prepared in {:?}", start.elapsed());

    let image = match cli.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build render thread pool")?
            .install(|| camera.render(&world, cli.seed)),
        None => camera.render(&world, cli.seed),
    };

    output::save_image(&image, &cli.output)?;
    log::info!(
        "Saved {}x{} image to {:?} (total {:?})",
        image.width,
        image.height,
        cli.output,
        start.elapsed()
    );

    Ok(())
}

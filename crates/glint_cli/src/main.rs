//! glint - a progressive offline path tracer for sphere scenes.

mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use glint_render::{render, write_ppm, Hittable, SphereList4};
use log::info;
use scene::SceneKind;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "A Monte Carlo path tracer for sphere scenes")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Image aspect ratio (width / height)
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect_ratio: f32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 100)]
    samples_per_pixel: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value_t = 50)]
    max_depth: u32,

    /// Base seed for the per-row random streams and scene generation
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of render threads (defaults to available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Scene to render
    #[arg(long, value_enum, default_value = "simple")]
    scene: SceneKind,

    /// Use the SIMD-packed sphere list
    #[arg(long)]
    packed: bool,

    /// Output file ("-" writes the PPM to stdout)
    #[arg(long, short = 'o', default_value = "-")]
    output: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure render thread pool")?;
    }

    let (world, camera) = scene::build(args.scene, args.seed);
    let mut camera = camera
        .with_image(args.width, args.aspect_ratio)
        .with_quality(args.samples_per_pixel, args.max_depth);

    let packed;
    let world: &dyn Hittable = if args.packed {
        packed = SphereList4::from_list(&world);
        info!("packed {} spheres into SIMD groups", packed.len());
        &packed
    } else {
        &world
    };

    let start = Instant::now();
    let image = render(&mut camera, world, args.seed);
    info!(
        "rendered {}x{} in {:.2?}",
        image.width,
        image.height,
        start.elapsed()
    );

    if args.output == "-" {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_ppm(&mut out, &image)?;
        out.flush()?;
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("failed to create {}", args.output))?;
        let mut out = BufWriter::new(file);
        write_ppm(&mut out, &image)?;
        out.flush()?;
        info!("wrote {}", args.output);
    }

    Ok(())
}

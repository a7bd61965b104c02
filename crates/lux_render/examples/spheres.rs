//! Renders the classic three-material sphere scene and logs a summary.
//!
//! Run with: RUST_LOG=info cargo run --example spheres -- [config.json]

use std::env;
use std::fs;

use anyhow::{Context, Result};
use lux_render::{
    render, AssetList, Camera, Color, Dielectric, Intersection, Lambertian, Metal, RenderConfig,
    Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const WIDTH: u32 = 200;
const HEIGHT: u32 = 100;

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path))?;
            RenderConfig::from_json(&json).with_context(|| format!("Invalid config {}", path))?
        }
        None => RenderConfig {
            samples_per_pixel: 16,
            max_depth: 10,
            use_sky_gradient: true,
            min_throughput: 0.001,
            ..Default::default()
        },
    };

    let world = build_scene();
    let camera = Camera::default();
    let mut rng = StdRng::seed_from_u64(42);

    let image = render(&camera, &world, WIDTH, HEIGHT, &config, &mut rng);

    let mean = image
        .pixels
        .iter()
        .fold(Color::ZERO, |acc, c| acc + *c)
        / image.pixels.len() as f32;
    log::info!("Mean linear color: {}", mean);
    log::info!("RGBA buffer: {} bytes", image.to_rgba8().len());

    Ok(())
}

fn build_scene() -> Intersection {
    let mut world = AssetList::new();

    // Ground
    world.add(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Lambertian::new(Color::new(0.8, 0.8, 0.0)),
    ));

    world.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Lambertian::new(Color::new(0.1, 0.2, 0.5)),
    ));
    world.add(Sphere::new(
        Vec3::new(1.0, 0.0, -1.0),
        0.5,
        Metal::new(Color::new(0.8, 0.6, 0.2), 0.3),
    ));

    // Hollow glass: the inner shell has a negative radius
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, Dielectric::new(1.5)));
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), -0.45, Dielectric::new(1.5)));

    log::debug!("Built scene with {} objects", world.len());
    world.into()
}

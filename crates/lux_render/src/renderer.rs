//! Reference driver for the core.
//!
//! Implements Monte Carlo path tracing with:
//! - An explicit bounce loop bounded by depth and path throughput
//! - Gamma correction
//! - Anti-aliasing via multi-sampling

use std::time::Instant;

use crate::{Camera, Intersection, RenderConfig};
use lux_math::{gen_f32, Color, Interval, Ray};
use rand::RngCore;

/// Compute the color seen by a ray.
///
/// Follows the path bounce by bounce, multiplying attenuations into the
/// throughput until the ray escapes, is absorbed or runs out of depth.
pub fn ray_color(
    ray: &Ray,
    world: &Intersection,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let ray_t = Interval::new(config.t_min, f32::INFINITY);
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for depth in 0..config.max_depth {
        let Some(rec) = world.intersect(&ray, ray_t) else {
            return throughput * background(&ray, config);
        };

        let Some(scatter) = rec.material.scatter(&ray, &rec, rng) else {
            log::trace!("Path absorbed at depth {}", depth);
            return Color::ZERO;
        };

        throughput *= scatter.attenuation;
        if throughput.max_element() < config.min_throughput {
            log::trace!("Path throughput cut off at depth {}", depth);
            return Color::ZERO;
        }

        ray = scatter.specular_ray;
    }

    log::trace!("Path exceeded max depth {}", config.max_depth);
    Color::ZERO
}

/// Color seen by a ray that escapes the scene.
pub fn background(ray: &Ray, config: &RenderConfig) -> Color {
    if config.use_sky_gradient {
        sky_gradient(ray)
    } else {
        config.background
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().unit_vector();
    let a = 0.5 * (unit_direction.y() + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f32| (255.0 * Interval::UNIT.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.r()), to_byte(color.g()), to_byte(color.b()), 255]
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` counts from the bottom-left corner of a `width` x `height` image.
#[allow(clippy::too_many_arguments)]
pub fn render_pixel(
    camera: &Camera,
    world: &Intersection,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let u = (x as f32 + gen_f32(rng)) / width as f32;
        let v = (y as f32 + gen_f32(rng)) / height as f32;
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, config, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Linear color buffer for render output. Row 0 is the top of the image.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Row-major offset, computed in `usize` so large images don't wrap.
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Linear RGB floats, three per pixel, row-major.
    pub fn as_f32_slice(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Gamma corrected RGBA bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgba(*c)).collect()
    }
}

/// Render the entire scene to an image buffer.
///
/// Single threaded; callers wanting parallelism split the image themselves
/// and give each worker its own generator.
pub fn render(
    camera: &Camera,
    world: &Intersection,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(width, height);
    for row in 0..height {
        // Camera v grows upward, buffer rows grow downward
        let y = height - 1 - row;
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, width, height, config, rng);
            image.set(x, row, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

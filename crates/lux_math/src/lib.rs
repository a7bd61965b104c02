//! Lux math substrate: vectors, rays, intervals and random sampling.

// Re-export glam for callers that want the raw SIMD types
pub use glam;

mod interval;
mod ray;
mod sampling;
mod vec3;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{gen_f32, random_in_unit_sphere};
pub use vec3::{Color, Vec3};

//! Lux - recursive ray tracing core.
//!
//! Geometry ([`Intersection`]: spheres and aggregate lists) and surfaces
//! ([`Material`]: Lambertian, metal, dielectric) meet through two per-bounce
//! calls: [`Intersection::intersect`] and [`Material::scatter`]. The
//! [`renderer`] module is a small single threaded driver built on top of them.

mod asset_list;
mod camera;
mod config;
mod intersection;
mod material;
pub mod renderer;
mod sphere;

pub use asset_list::AssetList;
pub use camera::Camera;
pub use config::{ConfigError, ConfigResult, RenderConfig};
pub use intersection::{Intersection, IntersectionRecord};
pub use material::{
    reflect, refract, schlick, Dielectric, Lambertian, Material, Metal, Pdf, ScatterRecord,
};
pub use renderer::{color_to_rgba, ray_color, render, render_pixel, ImageBuffer};
pub use sphere::Sphere;

/// Re-export the math types the protocols are written in
pub use lux_math::{Color, Interval, Ray, Vec3};

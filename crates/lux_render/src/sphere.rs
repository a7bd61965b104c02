//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{IntersectionRecord, Material};
use lux_math::{Interval, Ray, Vec3};

/// A sphere primitive.
///
/// A negative radius is allowed and flips the normal inward, which is how
/// hollow glass shells are modelled.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere. Accepts an owned material or a shared handle.
    pub fn new(center: Vec3, radius: f32, material: impl Into<Arc<Material>>) -> Self {
        Self {
            center,
            radius,
            material: material.into(),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Solve `|O + tD - C|^2 = r^2` and return the nearest root in `ray_t`.
    ///
    /// Uses the half-b form: `b = (O - C) . D`, roots `(-b +- sqrt(b^2 - ac)) / a`.
    pub fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<IntersectionRecord<'a>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().dot(ray.direction());
        let b = oc.dot(ray.direction());
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Near root first, then far root
        [(-b - sqrtd) / a, (-b + sqrtd) / a]
            .into_iter()
            .find(|&t| ray_t.surrounds(t))
            .map(|t| {
                let position = ray.point_at_parameter(t);
                IntersectionRecord {
                    t,
                    position,
                    normal: (position - self.center) / self.radius,
                    material: self.material.as_ref(),
                }
            })
    }
}

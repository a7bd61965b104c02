//! Intersection protocol and the record it produces.

use crate::{AssetList, Material, Sphere};
use lux_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Built fresh by every successful `intersect` call; the material is borrowed
/// from the primitive that was hit.
#[derive(Debug, Clone, Copy)]
pub struct IntersectionRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Outward surface normal at the intersection
    pub normal: Vec3,
    /// Material of the primitive that was hit
    pub material: &'a Material,
}

/// Anything a ray can be intersected against.
#[derive(Debug, Clone)]
pub enum Intersection {
    Sphere(Sphere),
    List(AssetList),
}

impl Intersection {
    /// Test if a ray hits this object with `t` strictly inside `ray_t`.
    ///
    /// Returns the nearest qualifying hit, or `None` on a miss.
    pub fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<IntersectionRecord<'a>> {
        match self {
            Intersection::Sphere(sphere) => sphere.intersect(ray, ray_t),
            Intersection::List(list) => list.intersect(ray, ray_t),
        }
    }
}

impl From<Sphere> for Intersection {
    fn from(sphere: Sphere) -> Self {
        Intersection::Sphere(sphere)
    }
}

impl From<AssetList> for Intersection {
    fn from(list: AssetList) -> Self {
        Intersection::List(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;

    #[test]
    fn test_dispatch_matches_primitive() {
        let sphere = Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Lambertian::new(Vec3::splat(0.5)),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let ray_t = Interval::new(0.001, f32::INFINITY);

        let direct = sphere.intersect(&ray, ray_t).map(|rec| rec.t);
        let object = Intersection::from(sphere.clone());
        let dispatched = object.intersect(&ray, ray_t).map(|rec| rec.t);

        assert_eq!(direct, dispatched);
        assert!(dispatched.is_some());
    }

    #[test]
    fn test_nested_lists() {
        let mut inner = AssetList::new();
        inner.add(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            Lambertian::new(Vec3::ONE),
        ));

        let mut outer = AssetList::new();
        outer.add(inner);
        let world = Intersection::from(outer);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = world
            .intersect(&ray, Interval::POSITIVE)
            .expect("ray should hit the nested sphere");
        assert!((rec.t - 2.0).abs() < 1e-5);
    }
}

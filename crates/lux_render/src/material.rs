//! Material protocol for surface scattering.

use std::fmt;
use std::sync::Arc;

use crate::IntersectionRecord;
use lux_math::{gen_f32, random_in_unit_sphere, Color, Ray, Vec3};
use rand::RngCore;

/// Probability density over outgoing directions.
///
/// Reserved for importance sampling; none of the shipped materials produce
/// one yet, so [`ScatterRecord::pdf`] is always `None`. Callers implement it
/// for their own densities and hand them out through that slot.
pub trait Pdf: Send + Sync + fmt::Debug {
    /// Density of sampling `direction`.
    fn value(&self, direction: Vec3) -> f32;

    /// Draw a direction distributed according to this density.
    fn generate(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// Result of a successful scatter.
#[derive(Debug, Clone)]
pub struct ScatterRecord {
    /// Color factor applied to whatever the outgoing ray sees
    pub attenuation: Color,
    /// True for mirror and glass bounces
    pub is_specular: bool,
    /// The outgoing ray
    pub specular_ray: Ray,
    pub pdf: Option<Arc<dyn Pdf>>,
}

/// Surface materials. Primitives hold these behind a shared handle and never
/// look at the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian(Lambertian::new(albedo))
    }

    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal(Metal::new(albedo, fuzz))
    }

    pub fn dielectric(ref_idx: f32) -> Self {
        Material::Dielectric(Dielectric::new(ref_idx))
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &IntersectionRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }

    pub fn albedo(&self) -> Color {
        match self {
            Material::Lambertian(m) => m.albedo,
            Material::Metal(m) => m.albedo,
            Material::Dielectric(m) => m.albedo,
        }
    }
}

macro_rules! impl_material_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Material {
                fn from(m: $variant) -> Self {
                    Material::$variant(m)
                }
            }

            impl From<$variant> for Arc<Material> {
                fn from(m: $variant) -> Self {
                    Arc::new(Material::$variant(m))
                }
            }
        )*
    };
}

impl_material_from!(Lambertian, Metal, Dielectric);

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &IntersectionRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        let target = rec.normal + random_in_unit_sphere(rng);

        Some(ScatterRecord {
            attenuation: self.albedo,
            is_specular: false,
            specular_ray: Ray::new(rec.position, target),
            pdf: None,
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, capped at 1.0. Values below zero are kept as given
    ///   and mirror the perturbation.
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &IntersectionRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        let reflected = reflect(ray_in.direction().unit_vector(), rec.normal);
        let scattered = Ray::new(
            rec.position,
            reflected + self.fuzz * random_in_unit_sphere(rng),
        );

        // Rays pushed below the surface are absorbed
        if rec.normal.dot(scattered.direction()) > 0.0 {
            Some(ScatterRecord {
                attenuation: self.albedo,
                is_specular: true,
                specular_ray: scattered,
                pdf: None,
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    albedo: Color,
    /// Index of refraction
    ref_idx: f32,
}

impl Dielectric {
    /// Clear dielectric.
    ///
    /// - `ref_idx`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ref_idx: f32) -> Self {
        Self::with_albedo(Color::ONE, ref_idx)
    }

    /// Tinted dielectric.
    pub fn with_albedo(albedo: Color, ref_idx: f32) -> Self {
        Self { albedo, ref_idx }
    }

    pub fn ref_idx(&self) -> f32 {
        self.ref_idx
    }

    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &IntersectionRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        let direction = ray_in.direction();
        let d_dot_n = direction.dot(rec.normal);

        let (outward_normal, ni_over_nt, cosine) = if d_dot_n <= 0.0 {
            // Entering the medium
            (rec.normal, 1.0 / self.ref_idx, -d_dot_n / direction.length())
        } else {
            (
                -rec.normal,
                self.ref_idx,
                self.ref_idx * d_dot_n / direction.length(),
            )
        };

        let reflected = reflect(direction, rec.normal);
        let refracted = refract(direction, outward_normal, ni_over_nt);

        let reflect_prob = match refracted {
            Some(_) => schlick(cosine, self.ref_idx),
            None => 1.0,
        };

        // Total internal reflection forces reflect_prob to 1, so the draw
        // below always picks the reflected ray in that case
        let out = if gen_f32(rng) < reflect_prob {
            reflected
        } else {
            refracted.unwrap_or(reflected)
        };

        Some(ScatterRecord {
            attenuation: self.albedo,
            is_specular: true,
            specular_ray: Ray::new(rec.position, out),
            pdf: None,
        })
    }
}

/// Reflect vector `v` about normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with normal `n`.
///
/// Returns `None` on total internal reflection.
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = v.unit_vector();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);

    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for reflectance
#[inline]
pub fn schlick(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_at_origin(material: &Material) -> IntersectionRecord<'_> {
        IntersectionRecord {
            t: 1.0,
            position: Vec3::new(0.0, 0.0, 0.0),
            normal: Vec3::Y,
            material,
        }
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_normal_incidence() {
        let refracted = refract(Vec3::new(0.0, -2.0, 0.0), Vec3::Y, 1.0 / 1.5)
            .expect("head-on ray always refracts");
        assert!(refracted.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), 1e-6));
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // Leaving glass at a grazing angle: sin(theta) * 1.5 > 1
        let v = Vec3::new(1.0, 0.1, 0.0);
        assert!(refract(v, -Vec3::Y, 1.5).is_none());
    }

    #[test]
    fn test_schlick() {
        assert!((schlick(1.0, 1.5) - 0.04).abs() < 1e-6);
        assert!((schlick(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lambertian_scatter() {
        let albedo = Color::new(0.5, 0.3, 0.1);
        let material = Material::lambertian(albedo);
        let rec = IntersectionRecord {
            position: Vec3::new(1.0, 2.0, 3.0),
            ..hit_at_origin(&material)
        };
        let ray = Ray::new(Vec3::new(1.0, 5.0, 3.0), Vec3::new(0.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let scatter = material
                .scatter(&ray, &rec, &mut rng)
                .expect("lambertian never absorbs");
            assert_eq!(scatter.specular_ray.origin(), rec.position);
            assert_eq!(scatter.attenuation, albedo);
            assert!(!scatter.is_specular);
            assert!(scatter.pdf.is_none());
            // normal + point in unit sphere stays in the upper hemisphere
            assert!(scatter.specular_ray.direction().dot(rec.normal) > 0.0);
        }
    }

    #[test]
    fn test_metal_mirror() {
        let material = Material::metal(Color::new(0.8, 0.8, 0.8), 0.0);
        let rec = hit_at_origin(&material);
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -3.0, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        let scatter = material
            .scatter(&ray, &rec, &mut rng)
            .expect("head-on metal bounce scatters");
        assert!(scatter.is_specular);
        assert!(scatter
            .specular_ray
            .direction()
            .abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_metal_fuzzy_reflection_dominates() {
        let material = Material::metal(Color::ONE, 0.3);
        let rec = hit_at_origin(&material);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mirror = Vec3::new(1.0, 1.0, 0.0).unit_vector();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let scatter = material
                .scatter(&ray, &rec, &mut rng)
                .expect("45 degree bounce with fuzz 0.3 stays above the surface");
            let out = scatter.specular_ray.direction();
            // Perturbation is shorter than 0.3, so the mirror component wins
            assert!((out - mirror).length() < 0.3);
        }
    }

    #[test]
    fn test_metal_grazing_absorbed() {
        let material = Material::metal(Color::ONE, 0.0);
        let rec = hit_at_origin(&material);
        let ray = Ray::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::X);
        let mut rng = StdRng::seed_from_u64(42);

        assert!(material.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_metal_fuzz_clamped_above_only() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, 0.4).fuzz(), 0.4);
        assert_eq!(Metal::new(Color::ONE, -0.5).fuzz(), -0.5);
    }

    #[test]
    fn test_metal_negative_fuzz_inverts_perturbation() {
        let material = Material::from(Metal::new(Color::ONE, -0.3));
        let rec = hit_at_origin(&material);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mirror = Vec3::new(1.0, 1.0, 0.0).unit_vector();

        // Same seed, same draw as the one scatter makes
        let p = random_in_unit_sphere(&mut StdRng::seed_from_u64(7));
        let mut rng = StdRng::seed_from_u64(7);

        let scatter = material
            .scatter(&ray, &rec, &mut rng)
            .expect("perturbation of length < 0.3 keeps a 45 degree bounce above the surface");
        let out = scatter.specular_ray.direction();
        assert!(out.abs_diff_eq(mirror - 0.3 * p, 1e-6));
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::dielectric(1.5);
        let rec = hit_at_origin(&material);
        // Exiting the medium (d . n > 0) at a grazing angle
        let direction = Vec3::new(1.0, 0.1, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, -0.1, 0.0), direction);
        let expected = reflect(direction, rec.normal);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let scatter = material
                .scatter(&ray, &rec, &mut rng)
                .expect("dielectric never absorbs");
            assert!(scatter.is_specular);
            assert!(scatter.pdf.is_none());
            assert_eq!(scatter.specular_ray.direction(), expected);
        }
    }

    #[test]
    fn test_dielectric_head_on_mostly_refracts() {
        let material = Material::dielectric(1.5);
        let rec = hit_at_origin(&material);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        let trials = 10_000;
        let mut reflections = 0;
        for _ in 0..trials {
            let scatter = material.scatter(&ray, &rec, &mut rng).unwrap();
            let out = scatter.specular_ray.direction();
            if out.y() > 0.0 {
                reflections += 1;
            } else {
                assert!(out.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), 1e-6));
            }
        }

        // Schlick at normal incidence for glass is 4%
        let fraction = reflections as f32 / trials as f32;
        assert!((0.02..0.06).contains(&fraction), "fraction = {}", fraction);
    }

    #[test]
    fn test_dielectric_exit_refracts() {
        let material = Material::dielectric(1.5);
        let rec = hit_at_origin(&material);
        // Leaving the medium (d . n > 0) close to the normal
        let direction = Vec3::new(0.1, 1.0, 0.0);
        let ray = Ray::new(Vec3::new(-0.1, -1.0, 0.0), direction);
        let reflected = reflect(direction, rec.normal);
        let mut rng = StdRng::seed_from_u64(42);

        let trials = 10_000;
        let mut reflections = 0;
        for _ in 0..trials {
            let out = material.scatter(&ray, &rec, &mut rng).unwrap().specular_ray.direction();
            if out == reflected {
                reflections += 1;
            } else {
                // Refracted ray keeps going out of the glass, bent away from the normal
                assert!(out.y() > 0.0);
                assert!(out.x() > direction.x() / direction.length());
            }
        }

        // Cosine is scaled by the index on the way out
        let expected = schlick(1.5 * direction.y() / direction.length(), 1.5);
        let fraction = reflections as f32 / trials as f32;
        assert!(
            (fraction - expected).abs() < 0.006,
            "fraction = {}, expected = {}",
            fraction,
            expected
        );
    }

    #[test]
    fn test_dielectric_albedo() {
        let tint = Color::new(0.9, 1.0, 0.9);
        let material = Material::from(Dielectric::with_albedo(tint, 1.3));
        let rec = hit_at_origin(&material);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.3, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(1);

        let scatter = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(scatter.attenuation, tint);
        assert_eq!(material.albedo(), tint);
        assert_eq!(Dielectric::new(1.5).ref_idx(), 1.5);
    }
}

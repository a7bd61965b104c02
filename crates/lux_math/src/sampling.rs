//! Random sampling helpers.
//!
//! Every sampler takes the generator explicitly so callers can seed it for
//! reproducible renders or hand each worker its own instance.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform `f32` in `[0, 1)`.
#[inline]
pub fn gen_f32<R: RngCore + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}

/// Uniformly distributed point strictly inside the unit sphere.
///
/// Rejection sampling over the `[-1, 1]` cube; accepts roughly 52% of draws.
pub fn random_in_unit_sphere<R: RngCore + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = 2.0 * Vec3::new(gen_f32(rng), gen_f32(rng), gen_f32(rng)) - Vec3::ONE;
        if p.squared_length() < 1.0 {
            return p;
        }
    }
}

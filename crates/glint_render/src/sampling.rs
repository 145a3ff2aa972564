//! Random sampling helpers for scattering and lens simulation.

use crate::gen_f32;
use glint_math::Vec3;
use rand::RngCore;

/// Generate a random vector with components in [min, max).
#[inline]
fn random_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        min + (max - min) * gen_f32(rng),
        min + (max - min) * gen_f32(rng),
        min + (max - min) * gen_f32(rng),
    )
}

/// Generate a random unit vector on the unit sphere.
///
/// Rejection-samples the unit ball, then normalizes. Candidates with a
/// tiny length are rejected so normalization stays well conditioned.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = random_range(rng, -1.0, 1.0);
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Sample a random point in the unit disk (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

//! Random sampling and reflection helpers shared by the camera and materials.
//!
//! Every function takes its random source explicitly so callers can give
//! each pixel its own generator.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform sample in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5] (z = 0).
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_f64(rng) - 0.5, random_f64(rng) - 0.5, 0.0)
}

/// Sample a random point strictly inside the unit disk on the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate a random unit vector, uniformly distributed on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling; tiny vectors are rejected so normalizing cannot blow up.
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
        );
        let len_sq = p.length_squared();
        if 1e-160 < len_sq && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// True when every component is close enough to zero to be unusable as a direction.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    const S: f64 = 1e-8;
    v.abs().max_element() < S
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n` (Snell's law).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

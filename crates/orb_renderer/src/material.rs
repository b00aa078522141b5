//! Surface scattering for each material kind.

use crate::hittable::HitRecord;
use orb_core::Material;
use orb_math::sampling::{near_zero, random_f64, random_unit_vector, reflect, refract};
use orb_math::{Color, Ray};
use rand::RngCore;

/// Result of a scatter event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel factor applied to light gathered along `scattered`
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// How light interacts with a surface.
pub trait Scatter {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;
}

impl Scatter for Material {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => Some(scatter_lambertian(albedo, rec, rng)),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, ray_in, rec, rng),
            Material::Dielectric { refractive_index } => {
                Some(scatter_dielectric(refractive_index, ray_in, rec, rng))
            }
        }
    }
}

fn scatter_lambertian(albedo: Color, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
    let mut scatter_direction = rec.normal + random_unit_vector(rng);

    // Catch degenerate scatter direction
    if near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }

    ScatterResult {
        attenuation: albedo,
        scattered: Ray::new(rec.p, scatter_direction),
    }
}

fn scatter_metal(
    albedo: Color,
    fuzz: f64,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<ScatterResult> {
    let reflected = reflect(ray_in.direction().normalize(), rec.normal);
    let scattered_dir = reflected + fuzz * random_unit_vector(rng);

    // Fuzz can push the ray below the surface; treat that as absorbed
    if scattered_dir.dot(rec.normal) > 0.0 {
        Some(ScatterResult {
            attenuation: albedo,
            scattered: Ray::new(rec.p, scattered_dir),
        })
    } else {
        None
    }
}

fn scatter_dielectric(
    refractive_index: f64,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> ScatterResult {
    let refraction_ratio = if rec.front_face {
        1.0 / refractive_index
    } else {
        refractive_index
    };

    let unit_direction = ray_in.direction().normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = refraction_ratio * sin_theta > 1.0;
    let direction =
        if cannot_refract || reflectance(cos_theta, refraction_ratio) > random_f64(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

    ScatterResult {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Schlick's approximation for reflectance.
fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

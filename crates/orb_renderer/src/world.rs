//! The validated scene the renderer traces against.

use crate::error::{RenderError, RenderResult};
use crate::hittable::{HitRecord, Hittable, HittableList};
use orb_core::{Material, MaterialId, Primitive, Scene};
use orb_math::{Color, Interval, Ray};

/// Geometry plus the material arena it refers to.
///
/// Only constructible through `World::new`, which checks every precondition
/// the integrator relies on. A render never starts on an invalid scene.
#[derive(Debug, Clone)]
pub struct World {
    objects: HittableList,
    materials: Vec<Material>,
}

impl World {
    /// Validate a scene and take ownership of it.
    pub fn new(scene: Scene) -> RenderResult<Self> {
        let (mut materials, primitives) = scene.into_parts();

        for (index, material) in materials.iter_mut().enumerate() {
            validate_material(material, MaterialId(index))?;
            log::debug!("Material #{}: {}", index, material.kind());
        }

        for (index, primitive) in primitives.iter().enumerate() {
            let id = primitive.material();
            if id.index() >= materials.len() {
                return Err(RenderError::MissingMaterial {
                    primitive: index,
                    material: id,
                });
            }
            match primitive {
                Primitive::Sphere(sphere) => {
                    let finite = sphere.center.is_finite() && sphere.radius.is_finite();
                    if !finite || sphere.radius == 0.0 {
                        return Err(RenderError::DegenerateSphere { primitive: index });
                    }
                }
            }
        }

        log::info!(
            "World ready: {} primitives, {} materials",
            primitives.len(),
            materials.len()
        );

        Ok(Self {
            objects: HittableList::from(primitives),
            materials,
        })
    }

    /// Material bound to a hit. Handles in a `World` are always valid.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    pub fn objects(&self) -> &HittableList {
        &self.objects
    }
}

impl Hittable for World {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.objects.hit(ray, ray_t)
    }
}

/// Check a material's parameters, normalizing metal fuzz into [0, 1].
fn validate_material(material: &mut Material, id: MaterialId) -> RenderResult<()> {
    match material {
        Material::Lambertian { albedo } => validate_albedo(*albedo, id),
        Material::Metal { albedo, fuzz } => {
            if !fuzz.is_finite() {
                return Err(RenderError::InvalidFuzz { material: id });
            }
            *fuzz = fuzz.clamp(0.0, 1.0);
            validate_albedo(*albedo, id)
        }
        Material::Dielectric { refractive_index } => {
            let value = *refractive_index;
            if !value.is_finite() || value <= 0.0 {
                return Err(RenderError::InvalidRefractiveIndex {
                    material: id,
                    value,
                });
            }
            Ok(())
        }
    }
}

fn validate_albedo(albedo: Color, id: MaterialId) -> RenderResult<()> {
    let unit = Interval::new(0.0, 1.0);
    if albedo.to_array().iter().all(|&c| unit.contains(c)) {
        Ok(())
    } else {
        Err(RenderError::InvalidAlbedo { material: id })
    }
}

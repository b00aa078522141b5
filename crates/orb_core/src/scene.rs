//! Scene types for Orb.
//!
//! A scene is a flat list of primitives plus an arena of materials. Primitives
//! refer to their material by `MaterialId`, so any number of spheres can share
//! one material without owning it.

use std::fmt;

use orb_math::{Color, Point3};

/// Handle to a material stored in a `Scene`'s material arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

impl MaterialId {
    /// Position of the material in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Surface material definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Ideal diffuse surface.
    Lambertian { albedo: Color },
    /// Specular reflector; `fuzz` of 0 is a perfect mirror, 1 is very rough.
    Metal { albedo: Color, fuzz: f64 },
    /// Clear refractive material (1.0 = air, 1.5 = glass, 2.4 = diamond).
    Dielectric { refractive_index: f64 },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian { albedo }
    }

    /// Create a metal, clamping `fuzz` into [0, 1].
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Self::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn dielectric(refractive_index: f64) -> Self {
        Self::Dielectric { refractive_index }
    }

    /// Tag naming this material in scene files and log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lambertian { .. } => "lambertian",
            Self::Metal { .. } => "metal",
            Self::Dielectric { .. } => "dielectric",
        }
    }
}

/// A sphere primitive.
///
/// A negative radius is kept as-is: the outward normal `(p - center) / radius`
/// then points inward, which turns a dielectric sphere into a hollow shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f64,
    pub material: MaterialId,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// Every kind of geometry a scene can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
}

impl Primitive {
    /// Material the primitive is bound to.
    pub fn material(&self) -> MaterialId {
        match self {
            Self::Sphere(sphere) => sphere.material,
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Self::Sphere(sphere)
    }
}

/// Center of the ground sphere used by `Scene::with_ground`.
pub const GROUND_CENTER: Point3 = Point3::new(0.0, -1000.0, 0.0);
/// Radius of the ground sphere used by `Scene::with_ground`.
pub const GROUND_RADIUS: f64 = 1000.0;
/// Albedo of the ground sphere used by `Scene::with_ground`.
pub const GROUND_ALBEDO: Color = Color::new(0.5, 0.5, 0.5);

/// A complete scene: material arena plus primitives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    materials: Vec<Material>,
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene holding only the large gray ground sphere.
    pub fn with_ground() -> Self {
        let mut scene = Self::new();
        let ground = scene.add_material(Material::lambertian(GROUND_ALBEDO));
        scene.add_sphere(GROUND_CENTER, GROUND_RADIUS, ground);
        scene
    }

    /// Add a material to the arena.
    ///
    /// An identical definition already in the arena is reused instead of
    /// stored twice.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        if let Some(index) = self.materials.iter().position(|m| *m == material) {
            return MaterialId(index);
        }
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Add a sphere bound to an existing material handle.
    pub fn add_sphere(&mut self, center: Point3, radius: f64, material: MaterialId) {
        self.add(Sphere::new(center, radius, material));
    }

    /// Add any primitive.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Look up a material by handle.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.index())
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Split the scene into its material arena and primitive list.
    pub fn into_parts(self) -> (Vec<Material>, Vec<Primitive>) {
        (self.materials, self.primitives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(
            Material::metal(Color::ONE, 3.0),
            Material::Metal {
                albedo: Color::ONE,
                fuzz: 1.0
            }
        );
        assert_eq!(
            Material::metal(Color::ONE, -0.5),
            Material::Metal {
                albedo: Color::ONE,
                fuzz: 0.0
            }
        );
    }

    #[test]
    fn test_identical_materials_share_a_slot() {
        let mut scene = Scene::new();
        let a = scene.add_material(Material::dielectric(1.5));
        let b = scene.add_material(Material::lambertian(Color::new(0.1, 0.2, 0.3)));
        let c = scene.add_material(Material::dielectric(1.5));

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(scene.material_count(), 2);
    }

    #[test]
    fn test_with_ground() {
        let scene = Scene::with_ground();
        assert_eq!(scene.primitive_count(), 1);

        let Primitive::Sphere(ground) = scene.primitives()[0];
        assert_eq!(ground.center, GROUND_CENTER);
        assert_eq!(ground.radius, GROUND_RADIUS);
        assert_eq!(
            scene.material(ground.material),
            Some(&Material::lambertian(GROUND_ALBEDO))
        );
    }

    #[test]
    fn test_material_lookup_out_of_range() {
        let scene = Scene::new();
        assert!(scene.material(MaterialId(0)).is_none());
    }
}

//! Hittable trait and HitRecord for ray-object intersection.

use orb_core::{MaterialId, Primitive};
use orb_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: MaterialId,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Build a record from the geometric outward normal.
    ///
    /// `outward_normal` must be unit length. The stored normal is flipped when
    /// the ray arrives from inside, and `front_face` records which case it was.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: MaterialId) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            material,
            t,
            front_face,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection whose `t` lies strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

impl Hittable for Primitive {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

/// A list of hittable objects, scanned linearly.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    objects: Vec<Primitive>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        self.objects.push(object.into());
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }
}

impl From<Vec<Primitive>> for HittableList {
    fn from(objects: Vec<Primitive>) -> Self {
        Self { objects }
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

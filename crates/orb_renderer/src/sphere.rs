//! Ray-sphere intersection.

use crate::hittable::{HitRecord, Hittable};
use orb_core::Sphere;
use orb_math::{Interval, Ray};

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        // Dividing by the signed radius flips the normal of a hollow (negative radius) sphere.
        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::MaterialId;
    use orb_math::{Point3, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const RAY_T: Interval = Interval::new(0.001, f64::INFINITY);

    fn unit_sphere() -> Sphere {
        Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, MaterialId(0))
    }

    #[test]
    fn test_sphere_hit() {
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = unit_sphere().hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-9); // Should hit at t=0.5
        assert!(rec.front_face);
        assert!(rec.normal.abs_diff_eq(Vec3::Z, 1e-12));
    }

    #[test]
    fn test_sphere_miss() {
        // Ray pointing away from sphere
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(unit_sphere().hit(&ray, RAY_T).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let ray = Ray::new(Point3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -2.0));

        let rec = unit_sphere().hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 0.25).abs() < 1e-9);
        assert!(!rec.front_face);
        // Stored normal still opposes the ray
        assert!(rec.normal.abs_diff_eq(Vec3::Z, 1e-12));
    }

    #[test]
    fn test_negative_radius_inverts_faces() {
        let hollow = Sphere::new(Point3::new(0.0, 0.0, -1.0), -0.5, MaterialId(0));
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = hollow.hit(&ray, RAY_T).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-9);
        assert!(!rec.front_face);
        assert!(rec.normal.dot(ray.direction()) <= 0.0);
    }

    #[test]
    fn test_random_hits_lie_on_surface_with_opposing_unit_normals() {
        let mut rng = StdRng::seed_from_u64(99);
        let sphere = Sphere::new(Point3::new(0.3, -0.2, -4.0), 1.7, MaterialId(0));

        let mut hits = 0;
        for _ in 0..2000 {
            let origin = Point3::new(
                rng.gen_range(-6.0..6.0),
                rng.gen_range(-6.0..6.0),
                rng.gen_range(-6.0..6.0),
            );
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            ) * rng.gen_range(0.1..10.0_f64);
            let ray = Ray::new(origin, direction);

            if let Some(rec) = sphere.hit(&ray, RAY_T) {
                hits += 1;
                assert!(((rec.p - sphere.center).length() - sphere.radius).abs() < 1e-6);
                assert!((rec.normal.length() - 1.0).abs() < 1e-6);
                assert!(rec.normal.dot(ray.direction()) <= 0.0);
                assert!(RAY_T.surrounds(rec.t));
            }
        }
        assert!(hits > 0);
    }
}

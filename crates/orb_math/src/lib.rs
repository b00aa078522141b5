// Re-export glam for convenience. Orb traces in double precision so that
// large spheres (the 1000-unit ground) do not suffer self-intersection acne.
pub use glam::DVec3 as Vec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color, components nominally in [0, 1].
pub type Color = Vec3;

// Orb math types
mod interval;
mod ray;
pub mod sampling;

pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_color_hadamard_product() {
        let attenuation = Color::new(0.5, 1.0, 0.0);
        let incoming = Color::new(0.8, 0.4, 1.0);
        assert_eq!(attenuation * incoming, Color::new(0.4, 0.4, 0.0));
    }
}

//! Camera configuration.
//!
//! `CameraSettings` is everything a render is set up from. It deserializes
//! from JSON with every field optional, so a config file only needs the keys
//! it changes.

use orb_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

/// User-facing camera and quality settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,

    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point the camera is looking from
    pub look_from: Point3,
    /// Point the camera is looking at
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,

    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 800,
            samples_per_pixel: 50,
            max_depth: 50,
            vfov: 20.0,
            look_from: Point3::new(13.0, 2.0, 3.0),
            look_at: Point3::ZERO,
            vup: Vec3::Y,
            defocus_angle: 0.6,
            focus_dist: 10.0,
        }
    }
}

impl CameraSettings {
    /// Set image width and aspect ratio.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Image height derived from width and aspect ratio, never less than 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f64 / self.aspect_ratio) as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_height() {
        let settings = CameraSettings::default().with_resolution(800, 16.0 / 9.0);
        assert_eq!(settings.image_height(), 450);

        let wide = CameraSettings::default().with_resolution(10, 100.0);
        assert_eq!(wide.image_height(), 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "image_width": 320, "look_from": [0, 0, 5], "defocus_angle": 0 }"#;
        let settings: CameraSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.image_width, 320);
        assert_eq!(settings.look_from, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(settings.defocus_angle, 0.0);
        assert_eq!(settings.samples_per_pixel, 50);
        assert_eq!(settings.vup, Vec3::Y);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = CameraSettings::default()
            .with_quality(8, 4)
            .with_lens(40.0, 0.0, 3.5);
        let json = serde_json::to_string(&settings).unwrap();
        let back: CameraSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}

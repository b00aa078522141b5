//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative path tracing with configurable depth
//! - Gamma correction
//! - Anti-aliasing via multi-sampling
//! - Per-pixel seeded random streams, so output does not depend on threading

use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::material::Scatter;
use crate::{Camera, Hittable, World};
use orb_math::{Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Smallest accepted hit distance; keeps scattered rays from re-hitting their origin.
pub const T_MIN: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// Follows the ray through the world, bouncing off surfaces until it escapes
/// to the sky or is absorbed. Each bounce multiplies its attenuation into the
/// path throughput. A path still bouncing after `depth` hits gathers no light.
///
/// Runs in constant stack space, so any `max_depth` is safe.
pub fn ray_color(ray: &Ray, depth: u32, world: &World, rng: &mut dyn RngCore) -> Color {
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(T_MIN, f64::INFINITY)) else {
            return throughput * background(&ray);
        };

        match world.material(rec.material).scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    // Out of depth: no more light is gathered
    Color::ZERO
}

/// Sky gradient: white at the horizon blending to blue overhead.
pub fn background(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0) to a value clamped into [0, 1].
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    linear.clamp(0.0, 1.0).sqrt()
}

/// Gamma-correct every channel of a linear color.
#[inline]
pub fn gamma_correct(color: Color) -> Color {
    Color::new(
        linear_to_gamma(color.x),
        linear_to_gamma(color.y),
        linear_to_gamma(color.z),
    )
}

/// Quantize a gamma-corrected color to 8 bits per channel.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f64| (256.0 * intensity.clamp(c)) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Independent random stream for one pixel of one render.
///
/// Seeds are mixed with SplitMix64 so neighbouring pixels get unrelated streams.
pub fn pixel_rng(seed: u64, pixel_index: u64) -> StdRng {
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(pixel_index)))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Render a single pixel with multi-sampling.
///
/// Returns the averaged linear color, before gamma correction.
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, camera.max_depth(), world, rng);
    }

    pixel_color * camera.samples_scale()
}

/// Gamma-corrected render output, stored row-major from the top-left pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (offset, color) in result.pixels.iter().enumerate() {
            let local_x = offset as u32 % bucket.width;
            let local_y = offset as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Convert to packed 8-bit RGB bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }

    /// Convert to an `image` crate buffer for saving in any supported format.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb8(self.get(x, y)))
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire world to an image buffer.
///
/// Buckets are traced in parallel on the current rayon pool. Every pixel
/// draws from its own stream derived from `seed`, so the same seed yields
/// bit-identical output regardless of thread count or scheduling.
pub fn render(camera: &Camera, world: &World, seed: u64) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let buckets = generate_buckets(width, height, DEFAULT_BUCKET_SIZE);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} buckets on {} threads",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth(),
        buckets.len(),
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, camera, world, seed);
            log::debug!("Bucket {}/{} done", bucket.index + 1, buckets.len());
            result
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::{CameraSettings, Material, Scene};
    use orb_math::{Point3, Vec3};

    #[test]
    fn test_sky_gradient() {
        let up = background(&Ray::new(Point3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        assert!(up.abs_diff_eq(Color::new(0.5, 0.7, 1.0), 1e-12));

        let down = background(&Ray::new(Point3::ZERO, Vec3::new(0.0, -1.0, 0.0)));
        assert!(down.abs_diff_eq(Color::ONE, 1e-12));

        let horizon = background(&Ray::new(Point3::ZERO, Vec3::X));
        assert!(horizon.abs_diff_eq(Color::new(0.75, 0.85, 1.0), 1e-12));
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(1.0), 1.0);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
        // Out-of-range input is clamped first
        assert_eq!(linear_to_gamma(-0.3), 0.0);
        assert_eq!(linear_to_gamma(4.0), 1.0);
    }

    #[test]
    fn test_gamma_is_monotonic() {
        let mut previous = linear_to_gamma(0.0);
        for i in 1..=100 {
            let value = linear_to_gamma(i as f64 / 100.0);
            assert!(value > previous);
            previous = value;
        }
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb8(Color::new(0.5, 0.25, 2.0)), [128, 64, 255]);
    }

    #[test]
    fn test_pixel_rng_streams_differ() {
        use rand::Rng;
        let a: u64 = pixel_rng(0, 0).gen();
        let b: u64 = pixel_rng(0, 1).gen();
        let c: u64 = pixel_rng(1, 0).gen();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, pixel_rng(0, 0).gen::<u64>());
    }

    #[test]
    fn test_render_pixel() {
        let mut scene = Scene::new();
        let gray = scene.add_material(Material::lambertian(Color::splat(0.5)));
        scene.add_sphere(Point3::new(0.0, 0.0, -1.0), 0.5, gray);
        let world = World::new(scene).unwrap();

        let settings = CameraSettings::default()
            .with_resolution(10, 1.0)
            .with_quality(4, 5)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        let camera = Camera::new(settings).unwrap();
        let mut rng = pixel_rng(42, 55);

        // Center pixel hits the sphere, which absorbs at least half the light
        let color = render_pixel(&camera, &world, 5, 5, &mut rng);
        assert!(color.length() > 0.0);
        assert!(color.max_element() <= 0.5 + 1e-12);
    }

    #[test]
    fn test_trapped_path_survives_huge_depth() {
        // A white diffuse shell around the camera keeps every path bouncing
        let mut scene = Scene::new();
        let white = scene.add_material(Material::lambertian(Color::ONE));
        scene.add_sphere(Point3::ZERO, 10.0, white);
        let world = World::new(scene).unwrap();

        let settings = CameraSettings::default()
            .with_resolution(2, 2.0)
            .with_quality(1, 300_000)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y);
        let camera = Camera::new(settings).unwrap();

        let image = camera.render(&world, 0);
        assert_eq!(image.pixels.len(), 2);
        for pixel in &image.pixels {
            assert!(pixel.is_finite());
            assert!(pixel.min_element() >= 0.0 && pixel.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_throughput_scales_background() {
        let mut scene = Scene::new();
        let gray = scene.add_material(Material::lambertian(Color::splat(0.5)));
        scene.add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, gray);
        let world = World::new(scene).unwrap();
        let mut rng = pixel_rng(3, 0);

        // Straight down onto the plane-like sphere, one bounce, then sky
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        for _ in 0..50 {
            let color = ray_color(&ray, 2, &world, &mut rng);
            if color != Color::ZERO {
                assert!(color.max_element() <= 0.5 + 1e-12);
                assert!(color.min_element() >= 0.25 - 1e-12);
            }
        }
    }

    #[test]
    fn test_write_bucket_places_pixels() {
        let mut image = ImageBuffer::new(4, 4);
        let bucket = crate::Bucket::new(2, 1, 2, 3, 0);
        let pixels = (0..6).map(|i| Color::splat(i as f64)).collect();
        image.write_bucket(&BucketResult::new(bucket, pixels));

        assert_eq!(image.get(2, 1), Color::splat(0.0));
        assert_eq!(image.get(3, 1), Color::splat(1.0));
        assert_eq!(image.get(2, 3), Color::splat(4.0));
        assert_eq!(image.get(3, 3), Color::splat(5.0));
        assert_eq!(image.get(0, 0), Color::ZERO);
    }
}

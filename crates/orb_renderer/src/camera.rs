//! Camera for ray generation.

use crate::error::{RenderError, RenderResult};
use crate::renderer::{self, ImageBuffer};
use crate::world::World;
use orb_core::CameraSettings;
use orb_math::sampling::{random_in_unit_disk, sample_square};
use orb_math::{Point3, Ray, Vec3};
use rand::RngCore;

/// A camera set up from `CameraSettings`, ready to generate rays.
///
/// All derived state is computed once in `Camera::new`; a `Camera` is never
/// mutated afterwards, so one instance can be shared by every render thread.
#[derive(Debug, Clone)]
pub struct Camera {
    settings: CameraSettings,
    image_height: u32,

    // Derived values
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    samples_scale: f64,
}

impl Camera {
    /// Validate settings and derive the viewport, basis and defocus disk.
    pub fn new(settings: CameraSettings) -> RenderResult<Self> {
        validate(&settings)?;

        let image_width = settings.image_width;
        let image_height = settings.image_height();
        let center = settings.look_from;

        // Calculate viewport dimensions
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * settings.focus_dist;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // Calculate camera basis vectors
        let w = (settings.look_from - settings.look_at).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        // Calculate pixel delta vectors
        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        // Calculate upper left pixel location
        let viewport_upper_left =
            center - settings.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius =
            settings.focus_dist * (settings.defocus_angle / 2.0).to_radians().tan();
        let defocus_disk_u = u * defocus_radius;
        let defocus_disk_v = v * defocus_radius;

        log::debug!(
            "Camera at {:?} looking at {:?}, {}x{}, vfov {}",
            center,
            settings.look_at,
            image_width,
            image_height,
            settings.vfov
        );

        Ok(Self {
            settings,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u,
            defocus_disk_v,
            samples_scale: 1.0 / settings.samples_per_pixel as f64,
        })
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The sample point is jittered within the pixel for antialiasing; the
    /// origin is jittered on the defocus disk when depth of field is enabled.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.settings.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Render `world` with this camera. See [`renderer::render`].
    pub fn render(&self, world: &World, seed: u64) -> ImageBuffer {
        renderer::render(self, world, seed)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    pub fn image_width(&self) -> u32 {
        self.settings.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.settings.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.settings.max_depth
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Orthonormal camera frame (u right, v up, w backwards).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f64 {
        self.samples_scale
    }
}

/// Largest accepted image side, in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 1 << 16;

fn validate(settings: &CameraSettings) -> RenderResult<()> {
    if settings.image_width == 0 {
        return Err(RenderError::InvalidImageWidth);
    }
    if !settings.aspect_ratio.is_finite() || settings.aspect_ratio <= 0.0 {
        return Err(RenderError::InvalidAspectRatio(settings.aspect_ratio));
    }
    let (width, height) = (settings.image_width, settings.image_height());
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(RenderError::ImageTooLarge {
            width,
            height,
            max: MAX_IMAGE_DIMENSION,
        });
    }
    if settings.samples_per_pixel == 0 {
        return Err(RenderError::ZeroSamples);
    }
    if !(settings.vfov > 0.0 && settings.vfov < 180.0) {
        return Err(RenderError::InvalidFieldOfView(settings.vfov));
    }
    if !settings.focus_dist.is_finite() || settings.focus_dist <= 0.0 {
        return Err(RenderError::InvalidFocusDistance(settings.focus_dist));
    }

    let view = settings.look_from - settings.look_at;
    let finite =
        settings.look_from.is_finite() && settings.look_at.is_finite() && settings.vup.is_finite();
    if !finite || view.length_squared() == 0.0 || settings.vup.cross(view).length_squared() < 1e-24
    {
        return Err(RenderError::DegenerateViewBasis);
    }

    Ok(())
}

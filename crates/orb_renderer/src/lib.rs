//! Orb Renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! materials, in the style of "Ray Tracing in One Weekend".

mod bucket;
mod camera;
mod error;
mod hittable;
mod material;
mod renderer;
mod sphere;
mod world;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, MAX_IMAGE_DIMENSION};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Scatter, ScatterResult};
pub use renderer::{
    background, color_to_rgb8, gamma_correct, linear_to_gamma, pixel_rng, ray_color, render,
    render_pixel, ImageBuffer, T_MIN,
};
pub use world::World;

/// Re-export the scene and math types the renderer works with
pub use orb_core::{CameraSettings, Material, MaterialId, Primitive, Scene, Sphere};
pub use orb_math::{Color, Interval, Point3, Ray, Vec3};

//! Orb Core - scene description for the Orb ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Primitive`, and the `Material`
//!   arena addressed by `MaterialId`
//! - **Scene files**: parsing and loading of the whitespace-separated sphere format
//! - **Camera settings**: the configuration a render is set up from
//!
//! # Example
//!
//! ```ignore
//! use orb_core::{load_scene_into, Scene};
//!
//! let mut scene = Scene::with_ground();
//! load_scene_into("sphere_data.txt", &mut scene)?;
//! println!("Loaded {} spheres, {} materials",
//!     scene.primitive_count(),
//!     scene.material_count());
//! ```

pub mod config;
pub mod loader;
pub mod parser;
pub mod scene;

// Re-export commonly used types
pub use config::CameraSettings;
pub use loader::{load_camera_settings, load_scene, load_scene_into, LoadError, LoadResult};
pub use parser::{parse_scene, parse_scene_into, ParseError, ParseResult};
pub use scene::{Material, MaterialId, Primitive, Scene, Sphere};

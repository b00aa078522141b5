//! Loading scenes and camera settings from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::CameraSettings;
use crate::parser::{parse_scene_into, ParseError};
use crate::scene::Scene;

/// Errors that can occur while loading input files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid camera settings: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file into a new scene.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let mut scene = Scene::new();
    load_scene_into(path, &mut scene)?;
    Ok(scene)
}

/// Load a scene file, appending its spheres to `scene`.
pub fn load_scene_into<P: AsRef<Path>>(path: P, scene: &mut Scene) -> LoadResult<usize> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let added = parse_scene_into(&content, scene)?;

    log::info!(
        "Loaded {} spheres from {:?} ({} primitives, {} materials in scene)",
        added,
        path,
        scene.primitive_count(),
        scene.material_count()
    );

    Ok(added)
}

/// Load camera settings from a JSON file. Missing keys keep their defaults.
pub fn load_camera_settings<P: AsRef<Path>>(path: P) -> LoadResult<CameraSettings> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&content)?;
    log::info!("Loaded camera settings from {:?}", path);
    Ok(settings)
}

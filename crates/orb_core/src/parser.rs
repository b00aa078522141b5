//! Scene file parser.
//!
//! One sphere per line, whitespace separated:
//!
//! ```text
//! # x  y    z   radius material   parameters...
//! 0    1    0   1.0    dielectric 1.5
//! -4   1    0   1.0    lambertian 0.4 0.2 0.1
//! 4    1    0   1.0    metal      0.7 0.6 0.5 0.0
//! ```
//!
//! Blank lines and `#` comments are ignored. A record with missing or
//! malformed numbers is skipped with a warning; an unknown material tag is an
//! error, since the sphere would otherwise have no material at all.

use std::str::SplitWhitespace;

use orb_math::{Color, Point3};
use thiserror::Error;

use crate::scene::{Material, Scene};

/// Errors that can occur while parsing a scene file.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Unknown material '{tag}' at line {line}")]
    UnknownMaterial { line: usize, tag: String },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse scene text into a new scene.
pub fn parse_scene(content: &str) -> ParseResult<Scene> {
    let mut scene = Scene::new();
    parse_scene_into(content, &mut scene)?;
    Ok(scene)
}

/// Parse scene text, appending its spheres to `scene`.
///
/// Returns the number of spheres added.
pub fn parse_scene_into(content: &str, scene: &mut Scene) -> ParseResult<usize> {
    let mut added = 0;
    let mut skipped = 0;

    for (index, line) in content.lines().enumerate() {
        let line_num = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_record(trimmed, line_num)? {
            Some((center, radius, material)) => {
                log::trace!("Line {}: {} sphere, radius {}", line_num, material.kind(), radius);
                let id = scene.add_material(material);
                scene.add_sphere(center, radius, id);
                added += 1;
            }
            None => {
                log::warn!("Skipping malformed sphere record at line {}: {:?}", line_num, trimmed);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {} malformed line(s)", skipped);
    }
    log::debug!("Parsed {} spheres", added);

    Ok(added)
}

/// Parse one non-comment line.
///
/// `Ok(None)` means the line is malformed and should be skipped.
fn parse_record(line: &str, line_num: usize) -> ParseResult<Option<(Point3, f64, Material)>> {
    let mut fields = Fields::new(line);

    let Some(center) = fields.next_vec3() else {
        return Ok(None);
    };
    let Some(radius) = fields.next_f64() else {
        return Ok(None);
    };
    let Some(tag) = fields.next_token() else {
        return Ok(None);
    };

    let material = match tag {
        "lambertian" => fields.next_vec3().map(Material::lambertian),
        "metal" => fields
            .next_vec3()
            .and_then(|albedo| fields.next_f64().map(|fuzz| Material::metal(albedo, fuzz))),
        "dielectric" => fields.next_f64().map(Material::dielectric),
        other => {
            return Err(ParseError::UnknownMaterial {
                line: line_num,
                tag: other.to_string(),
            })
        }
    };

    Ok(material.map(|material| (center, radius, material)))
}

/// Token cursor over one record. Trailing tokens are ignored.
struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            tokens: line.split_whitespace(),
        }
    }

    fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }

    // `f64::from_str` accepts "inf" and "NaN"; neither is a usable scene value.
    fn next_f64(&mut self) -> Option<f64> {
        self.next_token()?
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    fn next_vec3(&mut self) -> Option<Color> {
        let x = self.next_f64()?;
        let y = self.next_f64()?;
        let z = self.next_f64()?;
        Some(Color::new(x, y, z))
    }
}

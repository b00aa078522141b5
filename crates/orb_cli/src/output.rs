//! Writing rendered images to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use image::ImageFormat;
use orb_renderer::{color_to_rgb8, ImageBuffer};

/// Save an image, choosing the format from the file extension.
///
/// `.ppm` is written as plain-text P3; everything else goes through `image`.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        let mut writer = BufWriter::new(file);
        write_ppm(image, &mut writer)?;
        writer.flush()?;
    } else {
        let format = ImageFormat::from_path(path)
            .with_context(|| format!("Unsupported image format for {:?}", path))?;
        image
            .to_rgb_image()
            .save_with_format(path, format)
            .with_context(|| format!("Failed to save {:?}", path))?;
    }

    Ok(())
}

/// Write a plain (P3) PPM, one pixel per line, top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

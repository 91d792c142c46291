use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::{foundation::error::BubbleResult, render::surface::Surface};

/// Encode a surface as PNG bytes.
pub fn encode_png(surface: &Surface) -> BubbleResult<Vec<u8>> {
    let img = surface.to_rgba_image()?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Write a surface as PNG, creating parent directories as needed.
pub fn save_png(surface: &Surface, path: &Path) -> BubbleResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let img = surface.to_rgba_image()?;
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Timestamped download name, e.g. `bubble-pixel-art-1700000000000.png`.
pub fn default_export_file_name(unix_millis: u128) -> String {
    format!("bubble-pixel-art-{unix_millis}.png")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;

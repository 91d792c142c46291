use std::path::Path;

use anyhow::Context;

use crate::{
    assets::adjust::ImageAdjust,
    foundation::core::{CapabilityTier, PixelBuffer},
    foundation::error::{BubbleError, BubbleResult},
};

/// Decoded source image: owned straight RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub rgba8: Vec<u8>,
}

impl SourceImage {
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> BubbleResult<Self> {
        PixelBuffer::checked(width, height, &rgba8)?;
        Ok(Self {
            width,
            height,
            rgba8,
        })
    }

    pub fn as_buffer(&self) -> PixelBuffer<'_> {
        PixelBuffer::new(self.width, self.height, &self.rgba8)
    }
}

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP, ...) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> BubbleResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(SourceImage {
        width,
        height,
        rgba8: rgba.into_raw(),
    })
}

pub fn open_image(path: &Path) -> BubbleResult<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Scale `(width, height)` to fit a `max_width x max_height` box, keeping the aspect ratio.
///
/// Small images are scaled up to the box as well. Each side is at least 1 px.
pub fn fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> BubbleResult<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(BubbleError::validation("cannot fit a zero-sized image"));
    }
    if max_width == 0 || max_height == 0 {
        return Err(BubbleError::validation("fit box must be non-empty"));
    }
    let ratio = (f64::from(max_width) / f64::from(width))
        .min(f64::from(max_height) / f64::from(height));
    let scale = |v: u32| ((f64::from(v) * ratio).round() as u32).max(1);
    Ok((scale(width), scale(height)))
}

/// How a decoded image is turned into the buffer the grid pass samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrepareOptions {
    /// Edge of the square box the image is fitted into.
    pub max_dimension: u32,
    pub adjust: ImageAdjust,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            max_dimension: 600,
            adjust: ImageAdjust::default(),
        }
    }
}

/// Fit the image into the working box with a smooth filter, then apply tone adjustments.
///
/// Adjustments are skipped on constrained hosts.
#[tracing::instrument(skip(src), fields(width = src.width, height = src.height))]
pub fn prepare_source(
    src: &SourceImage,
    opts: &PrepareOptions,
    tier: CapabilityTier,
) -> BubbleResult<SourceImage> {
    let (width, height) =
        fit_dimensions(src.width, src.height, opts.max_dimension, opts.max_dimension)?;

    let mut rgba8 = if (width, height) == (src.width, src.height) {
        src.rgba8.clone()
    } else {
        let img = image::RgbaImage::from_raw(src.width, src.height, src.rgba8.clone())
            .ok_or_else(|| BubbleError::validation("source byte length does not match size"))?;
        image::imageops::resize(&img, width, height, image::imageops::FilterType::Triangle)
            .into_raw()
    };

    if !tier.is_constrained() && !opts.adjust.is_identity() {
        opts.adjust.apply(&mut rgba8);
    }
    tracing::debug!(width, height, "prepared source image");
    SourceImage::from_rgba8(width, height, rgba8)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

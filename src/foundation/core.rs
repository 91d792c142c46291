use std::str::FromStr;

use crate::foundation::error::{BubbleError, BubbleResult};

/// Opaque 8-bit RGB color. Export output is always opaque, so there is no alpha channel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Add `amount` to every channel, saturating at 255.
    pub fn lighten(self, amount: u8) -> Self {
        Self::new(
            self.r.saturating_add(amount),
            self.g.saturating_add(amount),
            self.b.saturating_add(amount),
        )
    }

    /// Subtract `amount` from every channel, saturating at 0.
    pub fn darken(self, amount: u8) -> Self {
        Self::new(
            self.r.saturating_sub(amount),
            self.g.saturating_sub(amount),
            self.b.saturating_sub(amount),
        )
    }

    pub fn to_rgba(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }
}

/// Borrowed, read-only view over straight RGBA8 pixels in row-major order.
///
/// The view is lenient: `data` may be shorter than `width * height * 4`, in which case the
/// missing bytes are simply never sampled. Use [`PixelBuffer::checked`] when the caller wants
/// the length enforced up front.
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn checked(width: u32, height: u32, data: &'a [u8]) -> BubbleResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BubbleError::validation("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(BubbleError::validation(format!(
                "pixel buffer expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self::new(width, height, data))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Coarse host performance class. Always supplied by the caller, never detected here.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityTier {
    /// Low-power or touch-first hosts: fewer samples, more frequent yields, capped quality.
    Constrained,
    #[default]
    Unconstrained,
}

impl CapabilityTier {
    pub fn is_constrained(self) -> bool {
        self == Self::Constrained
    }
}

impl FromStr for CapabilityTier {
    type Err = BubbleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constrained" => Ok(Self::Constrained),
            "unconstrained" => Ok(Self::Unconstrained),
            other => Err(BubbleError::validation(format!(
                "unknown capability tier '{other}' (expected constrained|unconstrained)"
            ))),
        }
    }
}

/// Export fidelity, mapped to a pixel-size multiplier over the preview block size.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Medium,
    #[default]
    High,
    Ultra,
}

impl QualityLevel {
    /// Export multiplier. Ultra is capped at 2x on constrained hosts.
    pub fn multiplier(self, tier: CapabilityTier) -> u32 {
        match (self, tier) {
            (Self::Medium, _) => 1,
            (Self::High, _) => 2,
            (Self::Ultra, CapabilityTier::Constrained) => 2,
            (Self::Ultra, CapabilityTier::Unconstrained) => 3,
        }
    }
}

impl FromStr for QualityLevel {
    type Err = BubbleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "ultra" => Ok(Self::Ultra),
            other => Err(BubbleError::validation(format!(
                "unknown quality level '{other}' (expected medium|high|ultra)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

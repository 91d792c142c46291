use crate::foundation::error::{BubbleError, BubbleResult};

/// Tone adjustments applied before sampling, in order: contrast, brightness, saturation.
/// Each factor is 1.0 for "unchanged".
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageAdjust {
    pub contrast: f32,
    pub brightness: f32,
    pub saturation: f32,
}

impl Default for ImageAdjust {
    fn default() -> Self {
        Self {
            contrast: 1.2,
            brightness: 1.0,
            saturation: 1.1,
        }
    }
}

impl ImageAdjust {
    pub const IDENTITY: Self = Self {
        contrast: 1.0,
        brightness: 1.0,
        saturation: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn validate(&self) -> BubbleResult<()> {
        for (name, v) in [
            ("contrast", self.contrast),
            ("brightness", self.brightness),
            ("saturation", self.saturation),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(BubbleError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Adjust straight RGBA8 pixels in place. Alpha is untouched.
    pub fn apply(&self, rgba: &mut [u8]) {
        for px in rgba.chunks_exact_mut(4) {
            let mut c = [px[0], px[1], px[2]].map(|v| f32::from(v) / 255.0);
            c = c.map(|v| ((v - 0.5) * self.contrast + 0.5).clamp(0.0, 1.0));
            c = c.map(|v| (v * self.brightness).clamp(0.0, 1.0));
            c = saturate(c, self.saturation);
            for (dst, v) in px.iter_mut().zip(c) {
                *dst = (v * 255.0).round() as u8;
            }
        }
    }
}

// Luminance-preserving saturation matrix (Rec. 709 weights).
fn saturate([r, g, b]: [f32; 3], s: f32) -> [f32; 3] {
    let out = [
        (0.213 + 0.787 * s) * r + (0.715 - 0.715 * s) * g + (0.072 - 0.072 * s) * b,
        (0.213 - 0.213 * s) * r + (0.715 + 0.285 * s) * g + (0.072 - 0.072 * s) * b,
        (0.213 - 0.213 * s) * r + (0.715 - 0.715 * s) * g + (0.072 + 0.928 * s) * b,
    ];
    out.map(|v| v.clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/adjust.rs"]
mod tests;

use std::path::Path;

use anyhow::Context;

use crate::{
    assets::adjust::ImageAdjust,
    assets::decode::PrepareOptions,
    export::ExportOptions,
    foundation::core::{CapabilityTier, QualityLevel},
    foundation::error::{BubbleError, BubbleResult},
    grid::builder::GridOptions,
    render::preview::PreviewOptions,
    schedule::ProgressRange,
};

/// User-facing conversion settings, loadable from JSON. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BubbleConfig {
    /// Source pixels per bubble.
    pub block_size: u32,
    /// Source images are fitted into a square of this edge before sampling.
    pub max_dimension: u32,
    pub quality: QualityLevel,
    pub tier: CapabilityTier,
    pub adjust: ImageAdjust,
    /// Straight RGBA8 behind preview bubbles; transparent when absent.
    pub preview_background: Option<[u8; 4]>,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            block_size: 12,
            max_dimension: 600,
            quality: QualityLevel::High,
            tier: CapabilityTier::Unconstrained,
            adjust: ImageAdjust::default(),
            preview_background: None,
        }
    }
}

impl BubbleConfig {
    pub fn from_json_str(s: &str) -> BubbleResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse bubblepix config json")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> BubbleResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> BubbleResult<()> {
        if self.block_size == 0 {
            return Err(BubbleError::validation("block_size must be >= 1"));
        }
        if self.max_dimension == 0 {
            return Err(BubbleError::validation("max_dimension must be >= 1"));
        }
        self.adjust.validate()
    }

    pub fn grid_options(&self, progress: ProgressRange) -> GridOptions {
        GridOptions {
            block_size: self.block_size,
            tier: self.tier,
            progress,
        }
    }

    pub fn export_options(&self, progress: ProgressRange) -> ExportOptions {
        ExportOptions {
            quality: self.quality,
            tier: self.tier,
            progress,
        }
    }

    pub fn prepare_options(&self) -> PrepareOptions {
        PrepareOptions {
            max_dimension: self.max_dimension,
            adjust: self.adjust,
        }
    }

    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            cell_size: None,
            background: self.preview_background.unwrap_or([0, 0, 0, 0]),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

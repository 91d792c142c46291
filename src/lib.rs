//! bubblepix turns raster images into grids of shaded "bubbles".
//!
//! # Pipeline overview
//!
//! 1. **Prepare** (optional): decode, fit into a working box, tone-adjust (`SourceImage`)
//! 2. **Build**: `PixelBuffer -> ColorGrid`, one sampled color per block ([`build_grid`])
//! 3. **Preview**: `ColorGrid -> Surface` at roughly source resolution ([`render_preview`])
//! 4. **Export**: `ColorGrid -> Surface` at a quality-scaled size on white ([`render_export`])
//!
//! [`ConversionSession`] ties these together and owns the per-conversion state.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded, cooperative**: long passes call back into a [`PassHost`] to report
//!   progress, poll for cancellation and yield. Nothing runs in parallel.
//! - **Deterministic**: the same buffer and settings always produce bit-identical grids.
//! - **No process-wide state**: caches and grids live in the session the caller owns.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod export;
mod foundation;
mod grid;
mod render;
mod sample;
mod schedule;
mod session;

pub use assets::adjust::ImageAdjust;
pub use assets::decode::{
    PrepareOptions, SourceImage, decode_image, fit_dimensions, open_image, prepare_source,
};
pub use assets::encode::{default_export_file_name, encode_png, save_png};
pub use config::BubbleConfig;
pub use export::{ExportOptions, export_block_size, render_export};
pub use foundation::core::{CapabilityTier, PixelBuffer, QualityLevel, Rgb8};
pub use foundation::error::{BubbleError, BubbleResult, PassOutcome};
pub use grid::builder::{BuiltGrid, GridOptions, build_grid, grid_dimensions};
pub use grid::color_grid::ColorGrid;
pub use render::bubble::{BubbleStyle, render_bubble};
pub use render::preview::{PreviewOptions, render_preview};
pub use render::surface::{Canvas, Surface};
pub use sample::{ColorSampler, SampleKey, SampleOffsets, sample_block_uncached};
pub use schedule::{
    CallbackHost, CancelToken, NullHost, PassHost, ProgressRange, ProgressThrottle,
};
pub use session::{ConversionSession, ConversionStats};

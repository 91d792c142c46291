use crate::{
    export::{ExportOptions, render_export},
    foundation::core::{CapabilityTier, PixelBuffer, QualityLevel},
    foundation::error::{BubbleError, BubbleResult, PassOutcome},
    grid::builder::{GridOptions, build_grid},
    grid::color_grid::ColorGrid,
    render::preview::{PreviewOptions, render_preview},
    render::surface::Surface,
    sample::ColorSampler,
    schedule::{PassHost, ProgressRange},
};

/// Summary of the last completed grid pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConversionStats {
    pub total_bubbles: u64,
    pub distinct_colors: usize,
    pub cols: usize,
    pub rows: usize,
    pub block_size: u32,
    pub source_width: u32,
    pub source_height: u32,
}

/// Owns the state of one conversion: sample cache, committed grid, stats and progress.
///
/// Callers must not start a pass while another pass on the same session is in flight; `&mut self`
/// on every pass entry point enforces this within safe code.
#[derive(Debug, Default)]
pub struct ConversionSession {
    sampler: ColorSampler,
    grid: Option<ColorGrid>,
    stats: Option<ConversionStats>,
    progress: f64,
}

impl ConversionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed grid, present only after a completed [`convert`](Self::convert).
    pub fn grid(&self) -> Option<&ColorGrid> {
        self.grid.as_ref()
    }

    pub fn stats(&self) -> Option<ConversionStats> {
        self.stats
    }

    /// Last progress fraction reported by any pass on this session.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Drop the grid, stats and cache.
    pub fn reset(&mut self) {
        self.sampler.clear();
        self.grid = None;
        self.stats = None;
        self.progress = 0.0;
    }

    /// Build a fresh grid from `buffer`.
    ///
    /// The previous grid is discarded up front; the new one is committed only if the pass
    /// completes, so a cancelled pass leaves the session without a grid.
    pub fn convert(
        &mut self,
        buffer: &PixelBuffer<'_>,
        opts: &GridOptions,
        host: &mut dyn PassHost,
    ) -> BubbleResult<PassOutcome<ConversionStats>> {
        self.grid = None;
        self.stats = None;
        self.progress = opts.progress.start;

        let mut tap = ProgressTap {
            inner: host,
            last: &mut self.progress,
        };
        let outcome = build_grid(&mut self.sampler, buffer, opts, &mut tap)?;
        let PassOutcome::Completed(built) = outcome else {
            return Ok(PassOutcome::Cancelled);
        };

        let stats = ConversionStats {
            total_bubbles: built.total_blocks,
            distinct_colors: built.distinct_colors,
            cols: built.grid.cols(),
            rows: built.grid.row_count(),
            block_size: built.grid.block_size(),
            source_width: buffer.width(),
            source_height: buffer.height(),
        };
        self.grid = Some(built.grid);
        self.stats = Some(stats);
        Ok(PassOutcome::Completed(stats))
    }

    /// Render the committed grid at export resolution.
    pub fn export(
        &mut self,
        opts: &ExportOptions,
        host: &mut dyn PassHost,
    ) -> BubbleResult<PassOutcome<Surface>> {
        let grid = self.grid.as_ref().ok_or(BubbleError::EmptyGrid)?;
        let mut tap = ProgressTap {
            inner: host,
            last: &mut self.progress,
        };
        render_export(grid, opts, &mut tap)
    }

    /// Render the committed grid for on-screen preview.
    pub fn preview(&self, opts: &PreviewOptions) -> BubbleResult<Surface> {
        let grid = self.grid.as_ref().ok_or(BubbleError::EmptyGrid)?;
        render_preview(grid, opts)
    }

    /// Build then export as one operation on a continuous `[0, 1]` progress scale.
    pub fn generate_and_export(
        &mut self,
        buffer: &PixelBuffer<'_>,
        block_size: u32,
        quality: QualityLevel,
        tier: CapabilityTier,
        host: &mut dyn PassHost,
    ) -> BubbleResult<PassOutcome<(ConversionStats, Surface)>> {
        let grid_opts = GridOptions {
            block_size,
            tier,
            progress: ProgressRange::GRID_PHASE,
        };
        let PassOutcome::Completed(stats) = self.convert(buffer, &grid_opts, host)? else {
            return Ok(PassOutcome::Cancelled);
        };
        let export_opts = ExportOptions {
            quality,
            tier,
            progress: ProgressRange::EXPORT_PHASE,
        };
        Ok(self.export(&export_opts, host)?.map(|surface| (stats, surface)))
    }
}

/// Forwards to the caller's host while remembering the last reported fraction.
struct ProgressTap<'a> {
    inner: &'a mut dyn PassHost,
    last: &'a mut f64,
}

impl PassHost for ProgressTap<'_> {
    fn report_progress(&mut self, fraction: f64) {
        *self.last = fraction;
        self.inner.report_progress(fraction);
    }

    fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    fn suspend(&mut self) {
        self.inner.suspend();
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;

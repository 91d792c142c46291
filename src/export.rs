use crate::{
    foundation::core::{CapabilityTier, QualityLevel},
    foundation::error::{BubbleError, BubbleResult, PassOutcome},
    grid::color_grid::ColorGrid,
    render::bubble::{BubbleStyle, render_bubble},
    render::preview::surface_size,
    render::surface::{Canvas, Surface},
    schedule::{PassHost, ProgressRange, ProgressReporter, ProgressThrottle},
};

/// Rows between forced progress reports, independent of the per-cell throttle.
const FORCED_REPORT_ROWS: usize = 10;

const WHITE: [u8; 4] = [255, 255, 255, 255];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportOptions {
    pub quality: QualityLevel,
    pub tier: CapabilityTier,
    pub progress: ProgressRange,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            quality: QualityLevel::High,
            tier: CapabilityTier::Unconstrained,
            progress: ProgressRange::EXPORT_PHASE,
        }
    }
}

/// Pixel size of one export cell.
pub fn export_block_size(
    base_block_size: u32,
    quality: QualityLevel,
    tier: CapabilityTier,
) -> BubbleResult<u32> {
    base_block_size
        .checked_mul(quality.multiplier(tier))
        .filter(|&s| s > 0)
        .ok_or_else(|| {
            BubbleError::validation(format!(
                "invalid export block size for base {base_block_size} at {quality:?}"
            ))
        })
}

/// Re-render `grid` at export resolution on an opaque white surface.
///
/// Fails with [`BubbleError::EmptyGrid`] before allocating anything when the grid has no cells.
/// Cancellation is polled once per row; a cancelled export drops its partial surface.
#[tracing::instrument(skip(grid, host), fields(cols = grid.cols(), rows = grid.row_count()))]
pub fn render_export(
    grid: &ColorGrid,
    opts: &ExportOptions,
    host: &mut dyn PassHost,
) -> BubbleResult<PassOutcome<Surface>> {
    if grid.is_empty() {
        return Err(BubbleError::EmptyGrid);
    }
    let cell = export_block_size(grid.block_size(), opts.quality, opts.tier)?;
    let (width, height) = surface_size(grid, cell)?;
    tracing::debug!(cell, width, height, "allocating export surface");
    let mut canvas = Canvas::new(width, height, WHITE)?;

    let total = grid.cell_count() as u64;
    let mut reporter = ProgressReporter::new(
        opts.progress,
        ProgressThrottle::for_tier(total, opts.tier),
        total,
    );
    reporter.begin(host);

    let style = BubbleStyle::EXPORT;
    let size = f64::from(cell);
    let radius = size / 2.0 + style.radius_pad;
    let mut done = 0u64;
    let mut last_reported = 0u64;

    for (y, row) in grid.rows().iter().enumerate() {
        if host.is_cancelled() {
            tracing::info!(rows_done = y, "export cancelled");
            return Ok(PassOutcome::Cancelled);
        }
        let top = y as f64 * size;
        for (x, &color) in row.iter().enumerate() {
            let left = x as f64 * size;
            render_bubble(
                &mut canvas,
                left + size / 2.0,
                top + size / 2.0,
                radius,
                color,
                &style,
            );
            done += 1;
            if reporter.step(done, host) {
                last_reported = done;
            }
        }
        if (y + 1) % FORCED_REPORT_ROWS == 0 && last_reported != done {
            reporter.force(done, host);
            last_reported = done;
        }
    }

    let surface = canvas.finish()?;
    tracing::info!(width, height, "export render complete");
    Ok(PassOutcome::Completed(surface))
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;

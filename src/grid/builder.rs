use std::collections::HashSet;

use crate::{
    foundation::core::{CapabilityTier, PixelBuffer},
    foundation::error::{BubbleError, BubbleResult, PassOutcome},
    grid::color_grid::ColorGrid,
    sample::ColorSampler,
    schedule::{PassHost, ProgressRange, ProgressReporter, ProgressThrottle},
};

/// Parameters for one grid pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridOptions {
    /// Edge length of one block in source pixels. Must be >= 1.
    pub block_size: u32,
    pub tier: CapabilityTier,
    /// Where this pass sits on the caller's overall progress scale.
    pub progress: ProgressRange,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            block_size: 12,
            tier: CapabilityTier::Unconstrained,
            progress: ProgressRange::GRID_PHASE,
        }
    }
}

/// A completed grid pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltGrid {
    pub grid: ColorGrid,
    /// Distinct RGB triples seen while building.
    pub distinct_colors: usize,
    pub total_blocks: u64,
}

/// `(cols, rows)` for a `width x height` buffer cut into `block_size` blocks.
pub fn grid_dimensions(width: u32, height: u32, block_size: u32) -> (u32, u32) {
    (width.div_ceil(block_size), height.div_ceil(block_size))
}

/// Rows between unconditional suspensions.
fn suspend_row_interval(tier: CapabilityTier) -> u32 {
    if tier.is_constrained() { 3 } else { 10 }
}

/// Partition `buffer` into blocks and sample each one into a [`ColorGrid`].
///
/// The sampler cache is cleared first, so a pass never sees colors from an earlier buffer.
/// Cancellation is polled at every row boundary and before every block; a cancelled pass returns
/// [`PassOutcome::Cancelled`] and drops any rows built so far.
#[tracing::instrument(
    skip(sampler, buffer, host),
    fields(width = buffer.width(), height = buffer.height())
)]
pub fn build_grid(
    sampler: &mut ColorSampler,
    buffer: &PixelBuffer<'_>,
    opts: &GridOptions,
    host: &mut dyn PassHost,
) -> BubbleResult<PassOutcome<BuiltGrid>> {
    if opts.block_size == 0 {
        return Err(BubbleError::validation("block_size must be >= 1"));
    }
    if buffer.is_empty() {
        return Err(BubbleError::validation(
            "pixel buffer must have non-zero width and height",
        ));
    }

    sampler.clear();

    let block = opts.block_size;
    let (cols, rows) = grid_dimensions(buffer.width(), buffer.height(), block);
    let total = u64::from(cols) * u64::from(rows);
    let throttle = ProgressThrottle::for_tier(total, opts.tier);
    tracing::debug!(
        cols,
        rows,
        total,
        report_every = throttle.every(),
        "building color grid"
    );

    let mut reporter = ProgressReporter::new(opts.progress, throttle, total);
    reporter.begin(host);

    let row_interval = suspend_row_interval(opts.tier);
    let mut out_rows = Vec::with_capacity(rows as usize);
    let mut seen = HashSet::new();
    let mut done = 0u64;

    for row_idx in 0..rows {
        if host.is_cancelled() {
            tracing::info!(done, total, "grid pass cancelled");
            return Ok(PassOutcome::Cancelled);
        }
        let y = row_idx * block;
        let mut row = Vec::with_capacity(cols as usize);
        for col_idx in 0..cols {
            if host.is_cancelled() {
                tracing::info!(done, total, "grid pass cancelled");
                return Ok(PassOutcome::Cancelled);
            }
            let color = sampler.sample_block(buffer, col_idx * block, y, block, opts.tier);
            row.push(color);
            seen.insert(color);
            done += 1;
            reporter.step(done, host);
        }
        out_rows.push(row);

        if row_idx.is_multiple_of(row_interval) {
            host.suspend();
        }
    }

    let grid = ColorGrid::from_rows(out_rows, block)?;
    tracing::info!(
        cols,
        rows,
        distinct_colors = seen.len(),
        "color grid complete"
    );
    Ok(PassOutcome::Completed(BuiltGrid {
        grid,
        distinct_colors: seen.len(),
        total_blocks: total,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/grid/builder.rs"]
mod tests;

use crate::{
    foundation::error::{BubbleError, BubbleResult},
    grid::color_grid::ColorGrid,
    render::bubble::{BubbleStyle, render_bubble},
    render::surface::{Canvas, Surface},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewOptions {
    /// Pixels per cell. `None` uses the grid's block size.
    pub cell_size: Option<u32>,
    /// Straight RGBA8 behind the bubbles.
    pub background: [u8; 4],
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            cell_size: None,
            background: [0, 0, 0, 0],
        }
    }
}

/// Draw the whole grid once with [`BubbleStyle::PREVIEW`].
///
/// Preview grids are small, so this runs to completion without checkpoints.
#[tracing::instrument(skip(grid), fields(cols = grid.cols(), rows = grid.row_count()))]
pub fn render_preview(grid: &ColorGrid, opts: &PreviewOptions) -> BubbleResult<Surface> {
    if grid.is_empty() {
        return Err(BubbleError::EmptyGrid);
    }
    let cell = opts.cell_size.unwrap_or(grid.block_size());
    if cell == 0 {
        return Err(BubbleError::validation("preview cell_size must be >= 1"));
    }
    let (width, height) = surface_size(grid, cell)?;
    let mut canvas = Canvas::new(width, height, opts.background)?;

    let size = f64::from(cell);
    let style = BubbleStyle::PREVIEW;
    let radius = size / 2.0 + style.radius_pad;
    for (x, y, color) in grid.iter_cells() {
        let cx = x as f64 * size + size / 2.0;
        let cy = y as f64 * size + size / 2.0;
        render_bubble(&mut canvas, cx, cy, radius, color, &style);
    }
    canvas.finish()
}

/// Pixel size of a grid drawn at `cell` pixels per cell.
pub(crate) fn surface_size(grid: &ColorGrid, cell: u32) -> BubbleResult<(u32, u32)> {
    let dim = |n: usize| {
        u32::try_from(n)
            .ok()
            .and_then(|n| n.checked_mul(cell))
            .ok_or_else(|| BubbleError::surface(format!("{n} cells of {cell} px overflow u32")))
    };
    Ok((dim(grid.cols())?, dim(grid.row_count())?))
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;

use vello_cpu::kurbo::Rect;
use vello_cpu::peniko::color::PremulRgba8;

use crate::foundation::error::{BubbleError, BubbleResult};

/// Finished RGBA8 image produced by a [`Canvas`].
///
/// Pixels are stored premultiplied, as `vello_cpu` renders them; accessors return straight alpha.
pub struct Surface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Straight-alpha RGBA8 at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixmap.data_as_u8_slice().get(idx..idx + 4)?;
        Some(unpremultiply([px[0], px[1], px[2], px[3]]))
    }

    /// Copy into a straight-alpha [`image::RgbaImage`] for encoding.
    pub fn to_rgba_image(&self) -> BubbleResult<image::RgbaImage> {
        let data = self
            .pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .flat_map(|px| unpremultiply([px[0], px[1], px[2], px[3]]))
            .collect();
        image::RgbaImage::from_raw(self.width(), self.height(), data)
            .ok_or_else(|| BubbleError::surface("surface byte length does not match dimensions"))
    }
}

/// Drawing target: a `vello_cpu` render context over a background fill.
///
/// Draw calls are recorded into the context and rasterized once by [`Canvas::finish`].
pub struct Canvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl Canvas {
    /// Start a `width x height` canvas filled with straight RGBA8 `background`.
    ///
    /// Sizes beyond `u16` or zero are rejected as [`BubbleError::Surface`].
    pub fn new(width: u32, height: u32, background: [u8; 4]) -> BubbleResult<Self> {
        if width == 0 || height == 0 {
            return Err(BubbleError::surface(format!(
                "surface dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| BubbleError::surface(format!("surface width {width} exceeds u16")))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| BubbleError::surface(format!("surface height {height} exceeds u16")))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        let [r, g, b, a] = background;
        if a > 0 {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        }
        Ok(Self {
            width: w,
            height: h,
            ctx,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    pub(crate) fn context(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> BubbleResult<Surface> {
        let mut pixmap = allocate_pixmap(self.width, self.height)?;
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(Surface {
            width: self.width,
            height: self.height,
            pixmap,
        })
    }
}

fn allocate_pixmap(width: u16, height: u16) -> BubbleResult<vello_cpu::Pixmap> {
    let len = usize::from(width) * usize::from(height);
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|e| {
        BubbleError::surface(format!("cannot allocate {width}x{height} surface: {e}"))
    })?;
    pixels.resize(
        len,
        PremulRgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        },
    );
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, width, height, true))
}

fn unpremultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    match a {
        0 => [0, 0, 0, 0],
        255 => [r, g, b, a],
        _ => {
            let a32 = u32::from(a);
            let un = |c: u8| ((u32::from(c) * 255 + a32 / 2) / a32).min(255) as u8;
            [un(r), un(g), un(b), a]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;

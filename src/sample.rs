use std::collections::HashMap;

use crate::foundation::core::{CapabilityTier, PixelBuffer, Rgb8};

/// Fractional `(dx, dy)` sample positions inside a block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleOffsets(&'static [(f64, f64)]);

const FULL_OFFSETS: &[(f64, f64)] = &[
    (0.5, 0.5),
    (0.25, 0.25),
    (0.75, 0.25),
    (0.25, 0.75),
    (0.75, 0.75),
];

const REDUCED_OFFSETS: &[(f64, f64)] = &[(0.5, 0.5)];

impl SampleOffsets {
    /// Centre plus four quadrant points on unconstrained hosts, centre only otherwise.
    pub fn for_tier(tier: CapabilityTier) -> Self {
        match tier {
            CapabilityTier::Unconstrained => Self(FULL_OFFSETS),
            CapabilityTier::Constrained => Self(REDUCED_OFFSETS),
        }
    }

    pub fn as_slice(&self) -> &'static [(f64, f64)] {
        self.0
    }
}

/// Memo key: block origin and size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleKey {
    pub x: u32,
    pub y: u32,
    pub block_size: u32,
}

/// Representative color of the block at `(origin_x, origin_y)`, without caching.
///
/// Sample coordinates are clamped into the buffer. A sample is only read when its red, green and
/// blue bytes all lie inside `data`; a block with no readable samples is black.
pub fn sample_block_uncached(
    buffer: &PixelBuffer<'_>,
    origin_x: u32,
    origin_y: u32,
    block_size: u32,
    tier: CapabilityTier,
) -> Rgb8 {
    let data = buffer.data();
    let width = i64::from(buffer.width());
    let height = i64::from(buffer.height());

    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for &(dx, dy) in SampleOffsets::for_tier(tier).as_slice() {
        let x = clamp_coord(i64::from(origin_x) + offset(block_size, dx), width);
        let y = clamp_coord(i64::from(origin_y) + offset(block_size, dy), height);
        let Some(idx) = byte_index(x, y, width) else {
            continue;
        };
        if idx + 2 >= data.len() {
            continue;
        }
        sum[0] += u64::from(data[idx]);
        sum[1] += u64::from(data[idx + 1]);
        sum[2] += u64::from(data[idx + 2]);
        count += 1;
    }

    if count == 0 {
        tracing::warn!(
            origin_x,
            origin_y,
            block_size,
            "no readable samples for block, using black"
        );
        return Rgb8::BLACK;
    }

    Rgb8::new(
        round_div(sum[0], count),
        round_div(sum[1], count),
        round_div(sum[2], count),
    )
}

fn offset(block_size: u32, frac: f64) -> i64 {
    (f64::from(block_size) * frac).floor() as i64
}

// Clamp into [0, len - 1]; for len == 0 this yields -1, which `byte_index` rejects.
fn clamp_coord(v: i64, len: i64) -> i64 {
    v.max(0).min(len - 1)
}

fn byte_index(x: i64, y: i64, width: i64) -> Option<usize> {
    if x < 0 || y < 0 {
        return None;
    }
    let idx = y.checked_mul(width)?.checked_add(x)?.checked_mul(4)?;
    usize::try_from(idx).ok()
}

// Round half up, matching `round(sum / count)` for non-negative sums.
fn round_div(sum: u64, count: u64) -> u8 {
    ((2 * sum + count) / (2 * count)).min(255) as u8
}

/// Block sampler with a per-pass memo cache.
///
/// The cache key is geometry only, so the cache must be cleared whenever the source buffer or
/// the block size changes. [`build_grid`](crate::build_grid) does this at the start of every pass.
#[derive(Debug, Default)]
pub struct ColorSampler {
    cache: HashMap<SampleKey, Rgb8>,
}

impl ColorSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_block(
        &mut self,
        buffer: &PixelBuffer<'_>,
        origin_x: u32,
        origin_y: u32,
        block_size: u32,
        tier: CapabilityTier,
    ) -> Rgb8 {
        let key = SampleKey {
            x: origin_x,
            y: origin_y,
            block_size,
        };
        if let Some(&hit) = self.cache.get(&key) {
            return hit;
        }
        let color = sample_block_uncached(buffer, origin_x, origin_y, block_size, tier);
        self.cache.insert(key, color);
        color
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
#[path = "../tests/unit/sample.rs"]
mod tests;

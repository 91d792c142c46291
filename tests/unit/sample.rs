use super::*;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    rgba.repeat((width * height) as usize)
}

fn checker(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = ((x * 31 + y * 17) % 256) as u8;
            out.extend_from_slice(&[v, 255 - v, v / 2, 255]);
        }
    }
    out
}

#[test]
fn solid_block_returns_its_color() {
    let data = solid(4, 4, [255, 0, 0, 255]);
    let buf = PixelBuffer::new(4, 4, &data);
    for tier in [CapabilityTier::Constrained, CapabilityTier::Unconstrained] {
        assert_eq!(
            sample_block_uncached(&buf, 0, 0, 4, tier),
            Rgb8::new(255, 0, 0)
        );
    }
}

#[test]
fn averages_five_points_with_rounding() {
    // 4x4 block: centre (2,2), quadrants (1,1) (3,1) (1,3) (3,3).
    let mut data = solid(4, 4, [0, 0, 0, 255]);
    let set = |data: &mut Vec<u8>, x: usize, y: usize, r: u8| {
        data[(y * 4 + x) * 4] = r;
    };
    set(&mut data, 2, 2, 10);
    set(&mut data, 1, 1, 1);
    set(&mut data, 3, 1, 1);
    set(&mut data, 1, 3, 0);
    set(&mut data, 3, 3, 0);
    let buf = PixelBuffer::new(4, 4, &data);
    // (10 + 1 + 1) / 5 = 2.4 -> 2
    assert_eq!(
        sample_block_uncached(&buf, 0, 0, 4, CapabilityTier::Unconstrained).r,
        2
    );
    // Centre only.
    assert_eq!(
        sample_block_uncached(&buf, 0, 0, 4, CapabilityTier::Constrained).r,
        10
    );
}

#[test]
fn rounds_half_up() {
    assert_eq!(round_div(5, 2), 3);
    assert_eq!(round_div(4, 2), 2);
    assert_eq!(round_div(12, 5), 2);
    assert_eq!(round_div(13, 5), 3);
    assert_eq!(round_div(255 * 5, 5), 255);
}

#[test]
fn edge_blocks_clamp_into_buffer() {
    let data = checker(5, 5);
    let buf = PixelBuffer::new(5, 5, &data);
    // Block at (4,4) of size 4 samples (6,6) etc., all clamped to (4,4).
    let c = sample_block_uncached(&buf, 4, 4, 4, CapabilityTier::Unconstrained);
    let idx = (4 * 5 + 4) * 4;
    assert_eq!(c, Rgb8::new(data[idx], data[idx + 1], data[idx + 2]));
}

#[test]
fn degenerate_buffers_fall_back_to_black() {
    let empty = PixelBuffer::new(0, 0, &[]);
    assert_eq!(
        sample_block_uncached(&empty, 0, 0, 4, CapabilityTier::Unconstrained),
        Rgb8::BLACK
    );

    // Geometry claims 4x4 but no bytes back it.
    let hollow = PixelBuffer::new(4, 4, &[]);
    assert_eq!(
        sample_block_uncached(&hollow, 100, 100, 4, CapabilityTier::Unconstrained),
        Rgb8::BLACK
    );

    // Only the first pixel exists; every clamped sample beyond it is unreadable.
    let tiny = [9u8, 8, 7, 255];
    let short = PixelBuffer::new(4, 4, &tiny);
    assert_eq!(
        sample_block_uncached(&short, 0, 0, 4, CapabilityTier::Unconstrained),
        Rgb8::BLACK
    );
    assert_eq!(
        sample_block_uncached(&short, 0, 0, 1, CapabilityTier::Constrained),
        Rgb8::new(9, 8, 7)
    );
}

#[test]
fn cache_hits_match_uncached_results() {
    let data = checker(16, 12);
    let buf = PixelBuffer::new(16, 12, &data);
    let mut sampler = ColorSampler::new();
    for tier in [CapabilityTier::Constrained, CapabilityTier::Unconstrained] {
        sampler.clear();
        for (x, y) in [(0, 0), (4, 0), (8, 4), (12, 8)] {
            let miss = sampler.sample_block(&buf, x, y, 4, tier);
            let hit = sampler.sample_block(&buf, x, y, 4, tier);
            assert_eq!(miss, hit);
            assert_eq!(miss, sample_block_uncached(&buf, x, y, 4, tier));
        }
        assert_eq!(sampler.cached_len(), 4);
    }
}

#[test]
fn clear_drops_stale_entries() {
    let red = solid(2, 2, [255, 0, 0, 255]);
    let blue = solid(2, 2, [0, 0, 255, 255]);
    let mut sampler = ColorSampler::new();

    let first = sampler.sample_block(&PixelBuffer::new(2, 2, &red), 0, 0, 2, CapabilityTier::Unconstrained);
    assert_eq!(first, Rgb8::new(255, 0, 0));

    // Same geometry, different source: stale until cleared.
    let stale = sampler.sample_block(&PixelBuffer::new(2, 2, &blue), 0, 0, 2, CapabilityTier::Unconstrained);
    assert_eq!(stale, first);

    sampler.clear();
    assert_eq!(sampler.cached_len(), 0);
    let fresh = sampler.sample_block(&PixelBuffer::new(2, 2, &blue), 0, 0, 2, CapabilityTier::Unconstrained);
    assert_eq!(fresh, Rgb8::new(0, 0, 255));
}

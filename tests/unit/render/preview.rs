use super::*;
use crate::foundation::core::Rgb8;

#[test]
fn preview_is_block_size_per_cell() {
    let c = Rgb8::new(30, 60, 90);
    let grid = ColorGrid::from_rows(vec![vec![c, c, c], vec![c, c, c]], 6).unwrap();
    let s = render_preview(&grid, &PreviewOptions::default()).unwrap();
    assert_eq!((s.width(), s.height()), (18, 12));
    // Cell centres are opaque; the transparent background shows through in the cell corners,
    // apart from a sliver of edge anti-aliasing.
    assert_eq!(s.pixel(3, 3).unwrap()[3], 255);
    assert!(s.pixel(0, 0).unwrap()[3] < 64);
}

#[test]
fn preview_honours_cell_size_and_background() {
    let grid = ColorGrid::from_rows(vec![vec![Rgb8::new(0, 0, 0)]], 4).unwrap();
    let opts = PreviewOptions {
        cell_size: Some(10),
        background: [255, 255, 255, 255],
    };
    let s = render_preview(&grid, &opts).unwrap();
    assert_eq!((s.width(), s.height()), (10, 10));
    assert_eq!(s.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn preview_of_empty_grid_is_an_error() {
    let grid = ColorGrid::from_rows(Vec::new(), 4).unwrap();
    assert!(matches!(
        render_preview(&grid, &PreviewOptions::default()),
        Err(BubbleError::EmptyGrid)
    ));
}

use super::*;

#[test]
fn rejects_ragged_rows_and_zero_block_size() {
    let a = Rgb8::new(1, 2, 3);
    let err = ColorGrid::from_rows(vec![vec![a, a], vec![a]], 4).unwrap_err();
    assert!(err.to_string().contains("row 1"));
    assert!(ColorGrid::from_rows(vec![vec![a]], 0).is_err());
}

#[test]
fn empty_shapes_report_empty() {
    let none = ColorGrid::from_rows(Vec::new(), 8).unwrap();
    assert!(none.is_empty());
    assert_eq!(none.cols(), 0);

    let hollow = ColorGrid::from_rows(vec![Vec::new(), Vec::new()], 8).unwrap();
    assert!(hollow.is_empty());
    assert_eq!(hollow.row_count(), 2);
}

#[test]
fn cells_iterate_row_major_and_count_distinct() {
    let r = Rgb8::new(255, 0, 0);
    let b = Rgb8::new(0, 0, 255);
    let grid = ColorGrid::from_rows(vec![vec![r, b, r], vec![b, b, r]], 2).unwrap();
    assert_eq!(grid.cell_count(), 6);
    assert_eq!(grid.get(1, 0), Some(b));
    assert_eq!(grid.get(3, 0), None);
    assert_eq!(grid.distinct_colors(), 2);

    let order: Vec<(usize, usize)> = grid.iter_cells().map(|(x, y, _)| (x, y)).collect();
    assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
}

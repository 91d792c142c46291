use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BubbleError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BubbleError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(BubbleError::EmptyGrid.to_string().contains("empty grid"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BubbleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn pass_outcome_helpers() {
    let done = PassOutcome::Completed(3u32);
    assert!(!done.is_cancelled());
    assert_eq!(done.clone().map(|v| v * 2), PassOutcome::Completed(6));
    assert_eq!(done.completed(), Some(3));

    let cancelled: PassOutcome<u32> = PassOutcome::Cancelled;
    assert!(cancelled.is_cancelled());
    assert_eq!(cancelled.map(|v| v + 1), PassOutcome::Cancelled);
}

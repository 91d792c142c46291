use super::*;

#[derive(Default)]
struct Recorder {
    progress: Vec<f64>,
    suspends: usize,
}

impl PassHost for Recorder {
    fn report_progress(&mut self, fraction: f64) {
        self.progress.push(fraction);
    }

    fn is_cancelled(&self) -> bool {
        false
    }

    fn suspend(&mut self) {
        self.suspends += 1;
    }
}

#[test]
fn range_endpoints_are_exact() {
    let r = ProgressRange::EXPORT_PHASE;
    assert_eq!(r.at(0, 10), 0.5);
    assert_eq!(r.at(10, 10), 1.0);
    assert_eq!(ProgressRange::GRID_PHASE.at(5, 5), 0.5);
    assert_eq!(ProgressRange::FULL.at(0, 0), 1.0);
    assert!((ProgressRange::FULL.at(1, 4) - 0.25).abs() < 1e-12);
}

#[test]
fn throttle_cadence_follows_tier() {
    let t = ProgressThrottle::for_tier(10_000, CapabilityTier::Unconstrained);
    assert_eq!(t.every(), 20);
    let t = ProgressThrottle::for_tier(10_000, CapabilityTier::Constrained);
    assert_eq!(t.every(), 50);
    let t = ProgressThrottle::for_tier(7, CapabilityTier::Constrained);
    assert_eq!(t.every(), 1);
}

#[test]
fn throttle_always_reports_final_unit() {
    let t = ProgressThrottle::with_target(1001, 500);
    assert_eq!(t.every(), 2);
    assert!(!t.should_report(1));
    assert!(t.should_report(2));
    assert!(t.should_report(1001));
}

#[test]
fn reporter_is_monotonic_and_suspends_after_each_report() {
    let mut host = Recorder::default();
    let total = 9;
    let mut rep = ProgressReporter::new(
        ProgressRange::GRID_PHASE,
        ProgressThrottle::with_target(total, 3),
        total,
    );
    rep.begin(&mut host);
    for done in 1..=total {
        rep.step(done, &mut host);
    }
    assert_eq!(host.progress.first().copied(), Some(0.0));
    assert_eq!(host.progress.last().copied(), Some(0.5));
    assert!(host.progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(host.suspends, host.progress.len() - 1);
}

#[test]
fn cancel_token_is_shared_between_clones() {
    let token = CancelToken::new();
    let mut host = CallbackHost::new(|_| {}).with_cancel(token.clone());
    assert!(!host.is_cancelled());
    token.cancel();
    assert!(host.is_cancelled());
    token.reset();
    assert!(!host.is_cancelled());
    host.suspend();
    assert_eq!(host.suspend_count(), 1);
}

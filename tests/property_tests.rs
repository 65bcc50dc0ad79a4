//! Property-based tests for the scroll lock.
//!
//! These tests use proptest to verify the counting and edge-trigger
//! invariants hold across randomly generated call sequences.

use proptest::prelude::*;

use scrollgate::core::state::{Acquired, LockState, Released};
use scrollgate::core::types::ScrollOffset;
use scrollgate::lock::ScrollLock;
use scrollgate::surface::{RecordingSurface, SurfaceEvent};

/// One caller action, with the scroll offset the page is at beforehand.
#[derive(Debug, Clone, Copy)]
enum Call {
    Acquire(i64),
    Release,
    Force,
}

fn call() -> impl Strategy<Value = Call> {
    prop_oneof![
        4 => (0i64..5_000).prop_map(Call::Acquire),
        4 => Just(Call::Release),
        1 => Just(Call::Force),
    ]
}

fn balanced_calls() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..64)
}

fn run(calls: &[Call]) -> (ScrollLock<RecordingSurface>, RecordingSurface) {
    let surface = RecordingSurface::new();
    let lock = ScrollLock::new(surface.clone());
    for c in calls {
        match *c {
            Call::Acquire(px) => {
                surface.set_position(ScrollOffset::new(px));
                lock.acquire();
            }
            Call::Release => {
                lock.release();
            }
            Call::Force => {
                lock.force_release();
            }
        }
    }
    (lock, surface)
}

proptest! {
    /// Without force releases, count is acquires minus releases, floored at 0
    /// after every call.
    #[test]
    fn count_is_floored_difference(ops in balanced_calls()) {
        let lock = ScrollLock::new(RecordingSurface::new());
        let mut expected: usize = 0;
        for acquire in ops {
            if acquire {
                lock.acquire();
                expected += 1;
            } else {
                lock.release();
                expected = expected.saturating_sub(1);
            }
            prop_assert_eq!(lock.count(), expected);
        }
    }

    /// Engage and disengage strictly alternate, starting with engage.
    #[test]
    fn surface_effects_alternate(calls in prop::collection::vec(call(), 0..80)) {
        let (lock, surface) = run(&calls);
        let mut engaged = false;
        for event in surface.events() {
            match event {
                SurfaceEvent::Engaged { .. } => {
                    prop_assert!(!engaged, "engaged twice without a disengage");
                    engaged = true;
                }
                SurfaceEvent::Disengaged => {
                    prop_assert!(engaged, "disengaged while not engaged");
                    engaged = false;
                }
                SurfaceEvent::ScrolledTo { .. } => prop_assert!(!engaged),
            }
        }
        prop_assert_eq!(engaged, lock.is_held());
        prop_assert_eq!(surface.is_engaged(), lock.is_held());
    }

    /// Every restore goes back to the offset captured by the engage before it.
    #[test]
    fn restore_matches_first_acquire(calls in prop::collection::vec(call(), 0..80)) {
        let (_lock, surface) = run(&calls);
        let mut pinned_at = None;
        for event in surface.events() {
            match event {
                SurfaceEvent::Engaged { at } => pinned_at = Some(at),
                SurfaceEvent::ScrolledTo { offset } => {
                    prop_assert_eq!(Some(offset), pinned_at.take());
                }
                SurfaceEvent::Disengaged => {}
            }
        }
    }

    /// Stats agree with the recorded surface calls.
    #[test]
    fn stats_match_surface(calls in prop::collection::vec(call(), 0..80)) {
        let (lock, surface) = run(&calls);
        let stats = lock.stats();
        prop_assert_eq!(stats.engagements as usize, surface.engage_count());
        prop_assert_eq!(stats.disengagements as usize, surface.disengage_count());
    }

    /// Force release always lands in Idle, and the next acquire engages afresh.
    #[test]
    fn force_release_always_idles(
        calls in prop::collection::vec(call(), 0..40),
        next_at in 0i64..5_000,
    ) {
        let (lock, surface) = run(&calls);
        lock.force_release();
        prop_assert_eq!(lock.count(), 0);
        prop_assert!(!surface.is_engaged());

        surface.set_position(ScrollOffset::new(next_at));
        prop_assert_eq!(
            lock.acquire(),
            Acquired::Engaged { saved: ScrollOffset::new(next_at) }
        );
    }

    /// Guards always balance, in any drop order.
    #[test]
    fn guards_balance_in_any_order(
        n in 1usize..16,
        order in prop::collection::vec(any::<prop::sample::Index>(), 16),
    ) {
        let surface = RecordingSurface::at(ScrollOffset::new(77));
        let lock = ScrollLock::new(surface.clone());
        let mut guards: Vec<_> = (0..n).map(|_| lock.hold()).collect();

        for idx in order.iter().take(n) {
            let i = idx.index(guards.len());
            drop(guards.swap_remove(i));
            prop_assert_eq!(lock.is_held(), !guards.is_empty());
        }

        prop_assert_eq!(lock.count(), 0);
        prop_assert_eq!(surface.engage_count(), 1);
        prop_assert_eq!(surface.disengage_count(), 1);
        prop_assert_eq!(surface.last_restore(), Some(ScrollOffset::new(77)));
        prop_assert_eq!(lock.stats().absorbed_releases, 0);
    }

    /// The pure state machine reports exactly one edge per idle/held switch.
    #[test]
    fn state_machine_edges(ops in balanced_calls()) {
        let mut state = LockState::new();
        let mut edges = 0usize;
        let mut switches = 0usize;
        for acquire in ops {
            let was_held = state.is_held();
            let edge = if acquire {
                matches!(state.acquire(ScrollOffset::TOP), Acquired::Engaged { .. })
            } else {
                matches!(state.release(), Released::Disengaged { .. })
            };
            edges += usize::from(edge);
            switches += usize::from(state.is_held() != was_held);
        }
        prop_assert_eq!(edges, switches);
    }
}

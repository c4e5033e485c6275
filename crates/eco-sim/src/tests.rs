//! Integration tests for eco-sim.

use std::sync::{Arc, Mutex};

use eco_agent::{NoopObserver, Observer, TickFunction, from_fn};
use eco_core::{AgentId, BarrierKind, FieldId, Month, SimConfig};
use eco_world::{FieldWrite, SharedWorld, WorldBuilder, WorldSnapshot};

use crate::{SimBuilder, SimError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(team_size: usize, horizon: u64) -> SimConfig {
    SimConfig {
        team_size,
        horizon: Month(horizon),
        seed: 42,
        watchdog_ms: Some(10_000),
        ..SimConfig::default()
    }
}

struct Fields {
    height:  FieldId,
    rabbits: FieldId,
}

/// `height` = 5.0 and `rabbits` = 1, the opening state of the meadow.
fn meadow_world() -> (SharedWorld, Fields) {
    let mut b = WorldBuilder::new();
    let height = b.add_float("height", 5.0).unwrap();
    let rabbits = b.add_count("rabbits", 1).unwrap();
    (b.build(), Fields { height, rabbits })
}

/// Grass grows 3 per month minus one per rabbit.
fn grass(f: &Fields) -> impl TickFunction {
    let (height, rabbits) = (f.height, f.rabbits);
    from_fn(vec![height], move |ctx, _| {
        let s = ctx.snapshot;
        let next = (s.float(height) + 3.0 - s.count(rabbits) as f64).max(0.0);
        vec![FieldWrite::float(height, next)]
    })
}

/// Rabbits step one toward the grass height.
fn rabbits(f: &Fields) -> impl TickFunction {
    let (height, rabbits) = (f.height, f.rabbits);
    from_fn(vec![rabbits], move |ctx, _| {
        let s = ctx.snapshot;
        let capacity = s.float(height) as u64;
        let now = s.count(rabbits);
        let next = if now < capacity { now + 1 } else { now.saturating_sub((now > capacity) as u64) };
        vec![FieldWrite::count(rabbits, next)]
    })
}

/// Observer that shares what it saw with the test through an `Arc`.
#[derive(Clone, Default)]
struct Shared(Arc<Mutex<Vec<WorldSnapshot>>>);

impl Observer for Shared {
    fn on_month(&mut self, snapshot: &WorldSnapshot) {
        self.0.lock().unwrap().push(snapshot.clone());
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_matching_team() {
        let (world, f) = meadow_world();
        let sim = SimBuilder::new(test_config(3, 12), world, NoopObserver)
            .agent(grass(&f))
            .agent(rabbits(&f))
            .build()
            .unwrap();
        assert_eq!(sim.team_size(), 3);
        assert_eq!(sim.watcher_id().0, 2);
        assert_eq!(sim.world.owner(f.height).map(|a| a.0), Some(0));
        assert_eq!(sim.world.owner(f.rabbits).map(|a| a.0), Some(1));
        assert_eq!(sim.world.clock_owner().map(|a| a.0), Some(2));
        assert_eq!(sim.barrier.team_size(), 3);
    }

    #[test]
    fn team_size_mismatch_errors() {
        let (world, f) = meadow_world();
        let result = SimBuilder::new(test_config(4, 12), world, NoopObserver)
            .agent(grass(&f))
            .agent(rabbits(&f))
            .build();
        assert!(matches!(result, Err(SimError::TeamSizeMismatch { expected: 4, got: 3 })));
    }

    #[test]
    fn zero_team_is_config_error() {
        let (world, _) = meadow_world();
        let result = SimBuilder::new(test_config(0, 12), world, NoopObserver).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn overlapping_ownership_errors() {
        let (world, f) = meadow_world();
        let result = SimBuilder::new(test_config(3, 12), world, NoopObserver)
            .agent(grass(&f))
            .agent(grass(&f))
            .build();
        assert!(matches!(result, Err(SimError::Ownership(_))));
    }

    #[test]
    fn watcher_may_own_fields() {
        let (world, f) = meadow_world();
        let sim = SimBuilder::new(test_config(2, 12), world, NoopObserver)
            .agent(rabbits(&f))
            .watcher_tick(grass(&f))
            .build()
            .unwrap();
        assert_eq!(sim.world.owner(f.height), Some(sim.watcher_id()));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use std::sync::OnceLock;

    use eco_barrier::Rendezvous;

    use super::*;
    use eco_agent::PhaseCounts;

    #[test]
    fn three_member_meadow_runs_twelve_months() {
        let (world, f) = meadow_world();
        let report = SimBuilder::new(test_config(3, 12), world, NoopObserver)
            .agent(grass(&f))
            .agent(rabbits(&f))
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(report.final_month, Month(12));
        assert_eq!(report.ticks(), 12);
        assert_eq!(report.barrier.rounds, 36);
        assert_eq!(report.barrier.arrived, 0);
        assert!(report.barrier.max_arrived <= 3);
        for agent in &report.agents {
            assert_eq!(agent.counts, PhaseCounts { compute: 12, commit: 12, observe: 12 });
        }

        // Replay the formulas sequentially and compare month by month.
        let (mut h, mut r) = (5.0_f64, 1_u64);
        for snap in &report.history {
            let cap = h as u64;
            let next_r = if r < cap { r + 1 } else if r > cap { r - 1 } else { r };
            h = (h + 3.0 - r as f64).max(0.0);
            r = next_r;
            assert_eq!(snap.float(f.height), h, "{}", snap.month());
            assert_eq!(snap.count(f.rabbits), r, "{}", snap.month());
        }
        assert_eq!(report.final_snapshot.float(f.height), h);
    }

    /// Reads barrier counters from inside the observation phase.
    struct RoundCounter {
        barrier: Arc<OnceLock<Arc<dyn Rendezvous>>>,
        seen:    Arc<Mutex<Vec<(u64, u64, usize)>>>,
    }

    impl Observer for RoundCounter {
        fn on_month(&mut self, snapshot: &WorldSnapshot) {
            if let Some(barrier) = self.barrier.get() {
                let stats = barrier.stats();
                self.seen.lock().unwrap().push((snapshot.month().0, stats.rounds, stats.arrived));
            }
        }
    }

    #[test]
    fn arrivals_reset_every_round() {
        for kind in [BarrierKind::Spin, BarrierKind::Condvar] {
            let (world, f) = meadow_world();
            let slot = Arc::new(OnceLock::new());
            let seen = Arc::new(Mutex::new(Vec::new()));
            let counter = RoundCounter { barrier: Arc::clone(&slot), seen: Arc::clone(&seen) };
            let config = SimConfig { barrier: kind, ..test_config(3, 12) };

            let sim = SimBuilder::new(config, world, counter)
                .agent(grass(&f))
                .agent(rabbits(&f))
                .build()
                .unwrap();
            assert!(slot.set(Arc::clone(&sim.barrier)).is_ok());
            let report = sim.run().unwrap();

            let seen = seen.lock().unwrap();
            assert_eq!(seen.len(), 12, "{kind:?}");
            for &(month, rounds, arrived) in seen.iter() {
                // Compute and assign barriers of this month done, observe
                // barrier still waiting on the watcher.
                assert_eq!(rounds, 3 * month + 2, "{kind:?} month {month}");
                assert!(arrived < 3, "{kind:?} month {month}: {arrived} arrived");
            }
            assert_eq!(report.barrier.rounds, 36);
            assert_eq!(report.barrier.arrived, 0);
            assert!(report.barrier.max_arrived <= 3);
        }
    }

    #[test]
    fn team_of_one_is_pass_through() {
        let mut b = WorldBuilder::new();
        let steps = b.add_count("steps", 0).unwrap();
        let report = SimBuilder::new(test_config(1, 24), b.build(), NoopObserver)
            .watcher_tick(from_fn(vec![steps], move |ctx, _| {
                vec![FieldWrite::count(steps, ctx.snapshot.count(steps) + 1)]
            }))
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(report.final_month, Month(24));
        assert_eq!(report.final_snapshot.count(steps), 24);
        assert_eq!(report.barrier.rounds, 72);
        assert_eq!(report.barrier.max_arrived, 1);
    }

    #[test]
    fn disjoint_commits_visible_next_tick() {
        for kind in [BarrierKind::Spin, BarrierKind::Condvar] {
            let mut b = WorldBuilder::new();
            let left = b.add_count("left", 0).unwrap();
            let right = b.add_count("right", 100).unwrap();
            let config = SimConfig { barrier: kind, ..test_config(3, 30) };

            let report = SimBuilder::new(config, b.build(), NoopObserver)
                .agent(from_fn(vec![left], move |ctx, _| {
                    vec![FieldWrite::count(left, ctx.snapshot.count(right))]
                }))
                .agent(from_fn(vec![right], move |ctx, _| {
                    vec![FieldWrite::count(right, ctx.snapshot.count(left) + 1)]
                }))
                .build()
                .unwrap()
                .run()
                .unwrap();

            // Each tick swaps the pair (right picking up one), so both
            // commits from tick t are what tick t+1 computes from.
            let (mut l, mut r) = (0u64, 100u64);
            for snap in &report.history {
                (l, r) = (r, l + 1);
                assert_eq!((snap.count(left), snap.count(right)), (l, r), "{kind:?}");
            }
        }
    }

    #[test]
    fn observer_sees_every_month_before_advance() {
        let (world, f) = meadow_world();
        let seen = Shared::default();
        let report = SimBuilder::new(test_config(3, 6), world, seen.clone())
            .agent(grass(&f))
            .agent(rabbits(&f))
            .build()
            .unwrap()
            .run()
            .unwrap();
        let months: Vec<Month> = seen.0.lock().unwrap().iter().map(|s| s.month()).collect();
        assert_eq!(months, (0..6).map(Month).collect::<Vec<_>>());
        assert_eq!(*seen.0.lock().unwrap(), report.history);
    }

    #[test]
    fn zero_horizon_joins_immediately() {
        let (world, f) = meadow_world();
        let report = SimBuilder::new(test_config(3, 0), world, NoopObserver)
            .agent(grass(&f))
            .agent(rabbits(&f))
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(report.ticks(), 0);
        assert_eq!(report.barrier.rounds, 0);
        assert_eq!(report.final_snapshot.float(f.height), 5.0);
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use eco_core::RandomSource;

    use super::*;

    fn noisy_run(seed: u64, kind: BarrierKind) -> Vec<WorldSnapshot> {
        let mut b = WorldBuilder::new();
        let x = b.add_float("x", 0.0).unwrap();
        let n = b.add_count("n", 10).unwrap();
        let config = SimConfig { seed, barrier: kind, ..test_config(3, 40) };

        SimBuilder::new(config, b.build(), NoopObserver)
            .agent(from_fn(vec![x], move |ctx, rng: &mut dyn RandomSource| {
                let drift = rng.uniform(-1.0, 1.0);
                vec![FieldWrite::float(x, ctx.snapshot.float(x) + drift)]
            }))
            .agent(from_fn(vec![n], move |ctx, rng: &mut dyn RandomSource| {
                let now = ctx.snapshot.count(n);
                let born = (0..now).filter(|_| rng.chance(0.1)).count() as u64;
                vec![FieldWrite::count(n, now + born - born / 2)]
            }))
            .build()
            .unwrap()
            .run()
            .unwrap()
            .history
    }

    #[test]
    fn same_seed_same_history() {
        let a = noisy_run(7, BarrierKind::Spin);
        let b = noisy_run(7, BarrierKind::Condvar);
        assert_eq!(a.len(), 40);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_history() {
        assert_ne!(noisy_run(1, BarrierKind::Spin), noisy_run(2, BarrierKind::Spin));
    }

    /// A scripted source replaces the seeded RNG for one member.
    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
            self.0
        }

        fn chance(&mut self, _p: f64) -> bool {
            true
        }
    }

    #[test]
    fn plugged_source_drives_draws() {
        let mut b = WorldBuilder::new();
        let x = b.add_float("x", 0.0).unwrap();
        let report = SimBuilder::new(test_config(2, 5), b.build(), NoopObserver)
            .agent_with_source(
                from_fn(vec![x], move |ctx, rng: &mut dyn RandomSource| {
                    vec![FieldWrite::float(x, ctx.snapshot.float(x) + rng.uniform(0.0, 10.0))]
                }),
                Fixed(0.5),
            )
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(report.final_snapshot.float(x), 2.5);
    }
}

// ── Failures ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn foreign_write_surfaces_as_protocol_error() {
        let (world, f) = meadow_world();
        let height = f.height;
        let result = SimBuilder::new(test_config(3, 4), world, NoopObserver)
            .agent(grass(&f))
            .agent(from_fn(vec![f.rabbits], move |_, _| vec![FieldWrite::float(height, 0.0)]))
            .build()
            .unwrap()
            .run();
        match result {
            Err(SimError::Protocol { agent, .. }) => assert_eq!(agent.0, 1),
            other => panic!("expected protocol error, got {:?}", other.err()),
        }
    }

    #[test]
    fn stuck_member_trips_the_watchdog() {
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = Mutex::new(release_rx);

        let mut b = WorldBuilder::new();
        let x = b.add_count("x", 0).unwrap();
        let config = SimConfig { watchdog_ms: Some(200), ..test_config(3, 10) };

        let result = SimBuilder::new(config, b.build(), NoopObserver)
            .agent(from_fn(vec![x], move |ctx, _| {
                if ctx.month() == Month(3) {
                    // Never reaches the compute barrier until released.
                    let _ = release_rx.lock().unwrap().recv();
                }
                vec![FieldWrite::count(x, ctx.month().0)]
            }))
            .agent(from_fn(vec![], |_, _| vec![]))
            .build()
            .unwrap()
            .run();

        match result {
            Err(SimError::Stalled { rounds, month }) => {
                assert_eq!(rounds, 9);
                assert_eq!(month, Month(3));
            }
            other => panic!("expected stall, got {:?}", other.err()),
        }
        // Let the detached team finish.
        release_tx.send(()).unwrap();
    }

    fn panics_in_month_two(f: &Fields) -> impl TickFunction {
        let height = f.height;
        from_fn(vec![height], move |ctx, _| {
            if ctx.month() == Month(2) {
                panic!("grass blew up");
            }
            vec![FieldWrite::float(height, ctx.snapshot.float(height) + 1.0)]
        })
    }

    #[test]
    fn panicking_tick_reported_not_stalled() {
        let (world, f) = meadow_world();
        let config = SimConfig { watchdog_ms: Some(200), ..test_config(3, 6) };
        let result = SimBuilder::new(config, world, NoopObserver)
            .agent(panics_in_month_two(&f))
            .agent(rabbits(&f))
            .build()
            .unwrap()
            .run();
        match result {
            Err(SimError::AgentPanicked(id)) => assert_eq!(id, AgentId(0)),
            other => panic!("expected AgentPanicked, got {:?}", other.err()),
        }
    }

    #[test]
    fn panicking_tick_reported_without_watchdog() {
        let (world, f) = meadow_world();
        let config = SimConfig { watchdog_ms: None, barrier: BarrierKind::Condvar, ..test_config(3, 6) };
        let result = SimBuilder::new(config, world, NoopObserver)
            .agent(rabbits(&f))
            .agent(panics_in_month_two(&f))
            .build()
            .unwrap()
            .run();
        assert!(matches!(result, Err(SimError::AgentPanicked(AgentId(1)))));
    }

    /// Panics outside any tick function, on the watcher's thread.
    struct Explodes;

    impl Observer for Explodes {
        fn on_month(&mut self, snapshot: &WorldSnapshot) {
            if snapshot.month() == Month(3) {
                panic!("observer failed");
            }
        }
    }

    #[test]
    fn dead_watcher_reported_while_team_waits() {
        let (world, f) = meadow_world();
        // Condvar: the detached members sleep instead of spinning.
        let config = SimConfig { watchdog_ms: None, barrier: BarrierKind::Condvar, ..test_config(3, 12) };
        let result = SimBuilder::new(config, world, Explodes)
            .agent(grass(&f))
            .agent(rabbits(&f))
            .build()
            .unwrap()
            .run();
        assert!(matches!(result, Err(SimError::AgentPanicked(AgentId(2)))));
    }

    #[test]
    fn start_gate_turns_members_away() {
        use crate::sim::StartGate;

        let gate = Arc::new(StartGate::new());
        let waiting: Vec<_> = (0..3)
            .map(|_| {
                let gate = Arc::clone(&gate);
                std::thread::spawn(move || gate.wait())
            })
            .collect();
        gate.release(false);
        for h in waiting {
            assert!(!h.join().unwrap());
        }

        let open = StartGate::new();
        open.release(true);
        assert!(open.wait());
    }
}

// ── Phase trace ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod trace_tests {
    use super::*;

    #[test]
    fn traced_run_is_aligned() {
        let (world, f) = meadow_world();
        let config = SimConfig { trace_phases: true, ..test_config(3, 8) };
        let report = SimBuilder::new(config, world, NoopObserver)
            .agent(grass(&f))
            .agent(rabbits(&f))
            .build()
            .unwrap()
            .run()
            .unwrap();
        let trace = report.trace.expect("trace enabled");
        assert_eq!(trace.check_alignment(), Ok(24));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;
    use eco_agent::PhaseCounts;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn every_member_runs_every_phase_each_tick(
            workers in 0usize..=4,
            ticks in 0u64..=15,
            condvar in any::<bool>(),
        ) {
            let kind = if condvar { BarrierKind::Condvar } else { BarrierKind::Spin };
            let mut b = WorldBuilder::new();
            let ids: Vec<FieldId> = (0..workers)
                .map(|i| b.add_count(&format!("f{i}"), 0).unwrap())
                .collect();
            let config = SimConfig {
                barrier: kind,
                trace_phases: true,
                ..test_config(workers + 1, ticks)
            };

            let mut builder = SimBuilder::new(config, b.build(), NoopObserver);
            for &id in &ids {
                builder = builder.agent(from_fn(vec![id], move |ctx, _| {
                    vec![FieldWrite::count(id, ctx.snapshot.count(id) + 1)]
                }));
            }
            let report = builder.build().unwrap().run().unwrap();

            prop_assert_eq!(report.final_month, Month(ticks));
            prop_assert_eq!(report.barrier.rounds, ticks * 3);
            prop_assert!(report.barrier.max_arrived <= workers + 1);
            for agent in &report.agents {
                prop_assert_eq!(agent.counts, PhaseCounts { compute: ticks, commit: ticks, observe: ticks });
            }
            for &id in &ids {
                prop_assert_eq!(report.final_snapshot.count(id), ticks);
            }
        }
    }
}

//! Fixed-timing and game-theory controller behaviour

use intersection_sim::simulation::{
    fixed_timing_control, game_theory_control, rank_groups, FixedPhase, FixedTimingState,
    SignalPhase, SyncGroup, SystemConfig, TrafficSystem, FAIRNESS_WEIGHT, GREEN_DURATION,
    MAX_WAIT_TIME, YELLOW_DURATION, YELLOW_TIME,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A system with every signal red and the given queues
fn red_system(groups: Vec<u32>, queues: &[u32]) -> TrafficSystem {
    let config = SystemConfig::new(groups.len()).with_sync_groups(groups);
    let mut rng = StdRng::seed_from_u64(1);
    let mut system = TrafficSystem::initialize(&config, &mut rng).expect("valid configuration");
    for (signal, &queue) in system.signals.iter_mut().zip(queues) {
        signal.turn_red();
        signal.queue_length = queue;
        signal.wait_time = 0;
    }
    system
}

fn expected_fixed(ticks: u64, groups: &[SyncGroup]) -> (SyncGroup, FixedPhase) {
    let period = u64::from(GREEN_DURATION + YELLOW_DURATION);
    let cycle = period * groups.len() as u64;
    let group = groups[((ticks % cycle) / period) as usize];
    let phase = if ticks % period >= u64::from(GREEN_DURATION) {
        FixedPhase::Yellow
    } else {
        FixedPhase::Green
    };
    (group, phase)
}

#[test]
fn test_fixed_timing_initial_state() {
    let state = FixedTimingState::new(SyncGroup(0));
    assert_eq!(state.current_green_group, SyncGroup(0));
    assert_eq!(state.phase, FixedPhase::Green);
    assert_eq!(state.timer, GREEN_DURATION);
    assert_eq!(state.cycle_count, 0);
}

#[test]
fn test_fixed_timing_green_yellow_handover() {
    let mut system = red_system(vec![0, 0, 1, 1], &[5, 5, 5, 5]);
    let mut state = None;

    fixed_timing_control(&mut system, &mut state);
    let current = state.as_ref().expect("state created on first call");
    assert_eq!(current.phase, FixedPhase::Green);
    assert_eq!(current.timer, GREEN_DURATION - 1);
    assert_eq!(system.phase_string(), "GGRR");

    for _ in 1..10 {
        fixed_timing_control(&mut system, &mut state);
    }
    let current = state.as_ref().unwrap();
    assert_eq!(current.current_green_group, SyncGroup(0));
    assert_eq!(current.phase, FixedPhase::Yellow);
    assert_eq!(current.timer, YELLOW_DURATION);
    assert_eq!(system.phase_string(), "YYRR");
    assert_eq!(system.signals[0].yellow_time_remaining, YELLOW_DURATION);

    for _ in 10..13 {
        fixed_timing_control(&mut system, &mut state);
    }
    let current = state.as_ref().unwrap();
    assert_eq!(current.current_green_group, SyncGroup(1));
    assert_eq!(current.phase, FixedPhase::Green);
    assert_eq!(current.timer, GREEN_DURATION);
    assert_eq!(current.cycle_count, 1);
    assert_eq!(system.phase_string(), "RRGG");
}

#[test]
fn test_fixed_timing_follows_closed_form() {
    for groups in [vec![0, 0, 1, 1], vec![2, 0, 1, 2, 0, 1]] {
        let mut system = red_system(groups, &[0, 9, 3, 7, 1, 4]);
        let order = system.sync_groups();
        let mut state = None;

        for t in 1..=120u64 {
            fixed_timing_control(&mut system, &mut state);
            let current = state.as_ref().unwrap();
            let (group, phase) = expected_fixed(t, &order);
            assert_eq!(current.current_green_group, group, "group at tick {}", t);
            assert_eq!(current.phase, phase, "phase at tick {}", t);

            for signal in &system.signals {
                let expected = match (signal.sync_group == group, phase) {
                    (true, FixedPhase::Green) => SignalPhase::Green,
                    (true, FixedPhase::Yellow) => SignalPhase::Yellow,
                    (false, _) => SignalPhase::Red,
                };
                assert_eq!(signal.phase, expected);
            }
        }
    }
}

#[test]
fn test_fixed_timing_ignores_queues() {
    let mut light = red_system(vec![0, 0, 1, 1], &[0, 0, 0, 0]);
    let mut heavy = red_system(vec![0, 0, 1, 1], &[90, 90, 1, 1]);
    let (mut light_state, mut heavy_state) = (None, None);

    for _ in 0..60 {
        fixed_timing_control(&mut light, &mut light_state);
        fixed_timing_control(&mut heavy, &mut heavy_state);
        assert_eq!(light.phase_string(), heavy.phase_string());
    }
}

#[test]
fn test_fixed_timing_keeps_green_elapsed_while_green() {
    let mut system = red_system(vec![0, 1], &[4, 4]);
    let mut state = None;

    fixed_timing_control(&mut system, &mut state);
    system.signals[0].green_time_elapsed = 1;
    fixed_timing_control(&mut system, &mut state);
    assert_eq!(system.signals[0].green_time_elapsed, 1);
}

#[test]
fn test_game_theory_selects_larger_queue() {
    let mut system = red_system(vec![0, 0, 1, 1], &[10, 10, 1, 1]);

    let ranking = rank_groups(&system);
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].sync_group, SyncGroup(0));
    assert_eq!(ranking[0].score, 20);
    assert_eq!(ranking[1].score, 2);

    game_theory_control(&mut system);
    assert_eq!(system.phase_string(), "GGRR");
    assert_eq!(system.signals[0].wait_time, 0);
    assert_eq!(system.signals[2].wait_time, 1);
    assert_eq!(system.signals[3].wait_time, 1);
}

#[test]
fn test_game_theory_fairness_bonus() {
    let mut system = red_system(vec![0, 0, 1, 1], &[60, 60, 0, 1]);
    system.signals[2].wait_time = MAX_WAIT_TIME;
    system.signals[3].wait_time = MAX_WAIT_TIME - 5;

    let ranking = rank_groups(&system);
    let starved = ranking
        .iter()
        .find(|bid| bid.sync_group == SyncGroup(1))
        .unwrap();
    assert_eq!(starved.max_wait_time, MAX_WAIT_TIME);
    assert_eq!(starved.total_queue, 1);
    assert!(starved.score >= 2000);
    assert_eq!(
        starved.score,
        1 + u64::from(MAX_WAIT_TIME) * FAIRNESS_WEIGHT
    );

    game_theory_control(&mut system);
    assert_eq!(system.phase_string(), "RRGG");
    assert_eq!(system.signals[2].wait_time, 0);
    assert_eq!(system.signals[3].wait_time, 0);
}

#[test]
fn test_game_theory_no_bonus_below_threshold() {
    let mut system = red_system(vec![0, 1], &[3, 0]);
    system.signals[1].wait_time = MAX_WAIT_TIME - 1;

    let ranking = rank_groups(&system);
    let bid = ranking.iter().find(|b| b.sync_group == SyncGroup(1)).unwrap();
    assert_eq!(bid.score, 0);

    game_theory_control(&mut system);
    assert_eq!(system.phase_string(), "GR");
    assert_eq!(system.signals[1].wait_time, MAX_WAIT_TIME);
}

#[test]
fn test_game_theory_ties_go_to_lowest_group() {
    let mut system = red_system(vec![4, 4, 2, 2], &[3, 3, 5, 1]);
    game_theory_control(&mut system);
    assert_eq!(system.phase_string(), "RRGG");
}

#[test]
fn test_game_theory_waits_accrue_without_selection() {
    let mut system = red_system(vec![0, 0, 1, 1], &[0, 0, 0, 0]);

    game_theory_control(&mut system);
    game_theory_control(&mut system);

    assert_eq!(system.phase_string(), "RRRR");
    assert!(system.signals.iter().all(|s| s.wait_time == 2));
}

#[test]
fn test_game_theory_skips_groups_conflicting_with_green() {
    let mut system = red_system(vec![0, 0, 1, 1], &[8, 8, 40, 40]);
    system.signals[0].turn_green();
    system.signals[1].turn_green();

    assert!(rank_groups(&system).is_empty());

    game_theory_control(&mut system);
    // Green has not reached its minimum yet, so nothing changes
    assert_eq!(system.phase_string(), "GGRR");
    assert_eq!(system.signals[2].wait_time, 1);
}

#[test]
fn test_game_theory_holds_green_while_queue_is_long() {
    let mut system = red_system(vec![0, 1], &[10, 40]);
    system.signals[0].turn_green();
    system.signals[0].green_time_elapsed = 12;

    game_theory_control(&mut system);
    assert!(system.signals[0].is_green());
}

#[test]
fn test_game_theory_max_green_forces_yellow() {
    let mut system = red_system(vec![0, 1], &[10, 1]);
    system.signals[0].turn_green();
    system.signals[0].green_time_elapsed = system.signals[0].max_green_time;

    game_theory_control(&mut system);
    assert!(system.signals[0].is_yellow());
    assert_eq!(system.signals[0].yellow_time_remaining, YELLOW_TIME);
    assert_eq!(system.signals[0].green_time_elapsed, 0);
}

#[test]
fn test_game_theory_yellow_runs_before_next_group() {
    let mut system = red_system(vec![0, 0, 1, 1], &[1, 1, 4, 4]);
    system.signals[0].turn_green();
    system.signals[1].turn_green();
    system.signals[0].green_time_elapsed = 5;
    system.signals[1].green_time_elapsed = 5;

    game_theory_control(&mut system);
    assert_eq!(system.phase_string(), "YYRR");
    assert_eq!(system.signals[0].yellow_time_remaining, 3);

    game_theory_control(&mut system);
    assert_eq!(system.phase_string(), "YYRR");
    assert_eq!(system.signals[0].yellow_time_remaining, 2);

    game_theory_control(&mut system);
    assert_eq!(system.phase_string(), "YYRR");
    assert_eq!(system.signals[1].yellow_time_remaining, 1);

    game_theory_control(&mut system);
    assert_eq!(system.phase_string(), "RRGG");
    assert_eq!(system.signals[0].wait_time, 1);
    assert_eq!(system.signals[2].wait_time, 0);
}

#[test]
fn test_game_theory_min_green_respected() {
    let mut system = red_system(vec![0, 1], &[0, 30]);
    system.signals[0].turn_green();
    system.signals[0].green_time_elapsed = system.signals[0].min_green_time - 1;

    game_theory_control(&mut system);
    assert!(system.signals[0].is_green());
}

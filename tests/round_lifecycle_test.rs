use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tui_whack::core::{GameState, Settings};
use tui_whack::types::{Command, CountdownPhase, Difficulty, RoundOutcome, ROUND_SECONDS};

fn started(grid: i64, difficulty: Difficulty, seed: u64) -> GameState {
    let mut g = GameState::with_settings(Settings::new(grid, difficulty), seed);
    assert!(g.start(0));
    g
}

fn click_all(g: &mut GameState) -> u32 {
    let targets = g.snapshot().active;
    targets.iter().filter(|&&i| g.click(i)).count() as u32
}

#[test]
fn difficulty_table_is_fixed() {
    assert_eq!(Difficulty::Easy.interval_ms(), 1000);
    assert_eq!(Difficulty::Easy.max_duration_ms(), 3000);
    assert_eq!(Difficulty::Medium.interval_ms(), 750);
    assert_eq!(Difficulty::Medium.max_duration_ms(), 2000);
    assert_eq!(Difficulty::Hard.interval_ms(), 250);
    assert_eq!(Difficulty::Hard.max_duration_ms(), 1000);
}

#[test]
fn start_always_resets_score_and_timer() {
    let mut g = started(3, Difficulty::Easy, 5);
    for t in (0..=20_000).step_by(100) {
        g.advance_to(t);
        click_all(&mut g);
    }
    assert!(g.score() > 0);
    assert!(g.seconds_remaining() < ROUND_SECONDS);

    g.apply(Command::Reset, 20_000);
    assert!(g.start(20_000));
    assert_eq!(g.score(), 0);
    assert_eq!(g.seconds_remaining(), ROUND_SECONDS);

    // Also after a lost round.
    g.advance_to(30_000);
    assert!(!g.running());
    assert!(g.start(30_000));
    assert_eq!(g.score(), 0);
    assert_eq!(g.seconds_remaining(), ROUND_SECONDS);
    assert_eq!(g.last_outcome(), None);
}

#[test]
fn clicks_score_exactly_once() {
    let mut g = started(4, Difficulty::Medium, 11);
    g.advance_to(0);
    let index = g.snapshot().active[0];

    assert!(g.click(index));
    assert_eq!(g.score(), 1);
    assert!(!g.is_active(index));

    // Inactive, already-whacked and out-of-range clicks change nothing.
    assert!(!g.click(index));
    assert!(!g.click(16));
    assert!(!g.click(u16::MAX));
    assert_eq!(g.score(), 1);
}

#[test]
fn active_cells_stay_unique_and_in_range() {
    let mut clicker = StdRng::seed_from_u64(99);
    for grid in 3..=10i64 {
        for difficulty in Difficulty::ALL {
            let mut g = started(grid, difficulty, grid as u64 * 7);
            let total = (grid * grid) as u16;
            let mut t = 0;
            while g.running() && t <= 61_000 {
                g.advance_to(t);
                if clicker.random_bool(0.7) {
                    g.click(clicker.random_range(0..total + 2));
                }
                let snap = g.snapshot();
                let mut seen = snap.active.to_vec();
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(seen.len(), snap.active.len(), "duplicate index on grid {}", grid);
                assert!(snap.active.iter().all(|&i| i < total));
                t += 50;
            }
        }
    }
}

#[test]
fn overstay_ends_round_within_one_tick() {
    for difficulty in Difficulty::ALL {
        let mut g = started(5, difficulty, 3);
        g.advance_to(0);
        let first = g.snapshot().active[0];
        let max = difficulty.max_duration_ms() as u64;
        let period = difficulty.interval_ms() as u64;

        // Keep every later cell clicked so only the first overstays.
        let mut t = 0;
        while t < max {
            t += period;
            g.advance_to(t - 1);
            for index in g.snapshot().active {
                if index != first {
                    g.click(index);
                }
            }
        }
        g.advance_to(max + period);
        assert!(!g.running(), "{:?} still running", difficulty);
        assert_eq!(g.last_outcome(), Some(RoundOutcome::Missed { index: first }));
        assert!(g.active_cells().is_empty());
    }
}

#[test]
fn idle_easy_round_is_lost_after_3001ms() {
    let mut g = started(3, Difficulty::Easy, 42);
    g.advance_to(3001);
    assert!(!g.running());
    assert!(matches!(g.last_outcome(), Some(RoundOutcome::Missed { .. })));
    assert_eq!(g.countdown_phase(), CountdownPhase::Idle);
    assert_eq!(g.score(), 0);
}

#[test]
fn clicking_the_only_cell_right_after_spawn() {
    let mut g = started(3, Difficulty::Easy, 8);
    g.advance_to(0);
    let snap = g.snapshot();
    assert_eq!(snap.active.len(), 1);
    let index = snap.active[0];

    assert!(g.click(index));
    assert_eq!(g.score(), 1);
    assert!(!g.is_active(index));
}

#[test]
fn countdown_ends_round_and_keeps_score() {
    let mut g = started(3, Difficulty::Easy, 21);
    let mut t = 0;
    while g.running() {
        g.advance_to(t);
        click_all(&mut g);
        t += 100;
    }
    assert_eq!(g.last_outcome(), Some(RoundOutcome::TimeUp));
    assert_eq!(g.seconds_remaining(), 0);
    assert_eq!(g.countdown_phase(), CountdownPhase::Expired);
    assert_eq!(g.score(), 60);
    assert_eq!(g.past_scores(), &[60]);
    assert_eq!(g.next_deadline_ms(), None);
}

#[test]
fn stale_timers_do_not_leak_into_next_round() {
    let mut g = started(3, Difficulty::Hard, 4);
    g.advance_to(500);
    let old = g.timer_spec(tui_whack::types::TimerKind::Spawner).unwrap();

    g.reset();
    assert!(g.start(600));
    let before = g.snapshot();
    assert!(!g.fire(tui_whack::types::TimerKind::Spawner, old.handle, 700));
    assert_eq!(g.snapshot(), before);
}

#[test]
fn settings_lock_while_running() {
    let mut g = started(3, Difficulty::Easy, 1);
    assert!(!g.apply(Command::SetGridSize(6), 0));
    assert!(!g.apply(Command::SetDifficulty(Difficulty::Hard), 0));
    assert_eq!(g.grid_size(), 3);
    assert_eq!(g.difficulty(), Difficulty::Easy);

    g.reset();
    assert!(g.apply(Command::SetGridSize(6), 0));
    assert!(g.apply(Command::CycleDifficulty, 0));
    assert_eq!(g.grid_size(), 6);
    assert_eq!(g.difficulty(), Difficulty::Medium);
}

#[test]
fn disabled_grid_refuses_start() {
    let mut g = GameState::new(1);
    assert!(g.set_grid_size(-4));
    assert_eq!(g.grid_size(), 0);
    assert!(!g.snapshot().can_start);
    assert!(!g.apply(Command::Start, 0));

    assert!(g.apply(Command::GrowGrid, 0));
    assert_eq!(g.grid_size(), 3);
    assert!(g.apply(Command::Start, 0));
}

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use tui_whack_core::{GameState, Settings};
use tui_whack_engine::{Driver, Engine, Fired};
use tui_whack_types::{Command, CountdownPhase, Difficulty, RoundOutcome, TimerKind};

fn game(difficulty: Difficulty, grid: i64) -> GameState {
    GameState::with_settings(Settings::new(grid, difficulty), 77)
}

#[tokio::test(start_paused = true)]
async fn idle_easy_round_is_lost_by_3001ms() {
    let (driver, snaps) = Driver::new(game(Difficulty::Easy, 3));
    let (tx, rx) = mpsc::channel(8);
    let task = tokio::spawn(driver.run(rx));

    tx.send(Command::Start).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    {
        let snap = snaps.borrow();
        assert!(snap.running);
        assert_eq!(snap.active.len(), 1);
    }

    tokio::time::sleep(Duration::from_millis(2991)).await;
    let snap = snaps.borrow().clone();
    assert!(!snap.running);
    assert!(matches!(snap.last_outcome, Some(RoundOutcome::Missed { .. })));
    assert_eq!(snap.countdown, CountdownPhase::Idle);

    drop(tx);
    let last = task.await.unwrap();
    assert_eq!(last.past_scores.as_slice(), &[0]);
}

#[tokio::test(start_paused = true)]
async fn attentive_player_reaches_time_up() {
    let (driver, snaps) = Driver::new(game(Difficulty::Easy, 3));
    let (tx, rx) = mpsc::channel(64);
    let task = tokio::spawn(driver.run(rx));

    tx.send(Command::Start).await.unwrap();
    for _ in 0..610 {
        let active = snaps.borrow().active.clone();
        for idx in active {
            tx.send(Command::Click(idx)).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let snap = snaps.borrow().clone();
    assert!(!snap.running);
    assert_eq!(snap.seconds_remaining, 0);
    assert_eq!(snap.countdown, CountdownPhase::Expired);
    assert_eq!(snap.last_outcome, Some(RoundOutcome::TimeUp));
    assert!(snap.score >= 55, "score {}", snap.score);
    assert_eq!(snap.past_scores.last().copied(), Some(snap.score));

    drop(tx);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn start_spawns_two_tasks_and_reset_cancels_them() {
    let (mut driver, _snaps) = Driver::new(game(Difficulty::Hard, 3));
    assert_eq!(driver.live_tasks(), 0);

    assert!(driver.handle_command(Command::Start));
    assert_eq!(driver.live_tasks(), 2);

    driver.handle_command(Command::Reset);
    assert_eq!(driver.live_tasks(), 0);
    assert!(!driver.game().running());
}

fn fire_current(driver: &mut Driver, kind: TimerKind, origin: Instant, at_ms: u64) -> bool {
    let handle = driver.game().timer_spec(kind).unwrap().handle;
    driver.handle_fired(Fired {
        kind,
        handle,
        at: origin + Duration::from_millis(at_ms),
    })
}

#[tokio::test(start_paused = true)]
async fn overstay_cancels_both_tasks() {
    let origin = Instant::now();
    let (mut driver, snaps) = Driver::new(game(Difficulty::Easy, 3));
    driver.handle_command(Command::Start);
    assert_eq!(driver.live_tasks(), 2);

    for at_ms in [0, 1000, 2000] {
        assert!(fire_current(&mut driver, TimerKind::Spawner, origin, at_ms));
        assert!(driver.game().running());
        assert_eq!(driver.live_tasks(), 2);
    }
    assert!(fire_current(&mut driver, TimerKind::Spawner, origin, 3000));

    assert!(!driver.game().running());
    assert_eq!(driver.live_tasks(), 0);
    assert_eq!(driver.game().timer_spec(TimerKind::Countdown), None);
    assert_eq!(driver.game().timer_spec(TimerKind::Spawner), None);
    assert!(matches!(
        snaps.borrow().last_outcome,
        Some(RoundOutcome::Missed { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn time_up_cancels_both_tasks() {
    let origin = Instant::now();
    let (mut driver, snaps) = Driver::new(game(Difficulty::Medium, 4));
    driver.handle_command(Command::Start);

    for second in 1..=60u64 {
        assert!(fire_current(&mut driver, TimerKind::Countdown, origin, second * 1000));
    }

    assert!(!driver.game().running());
    assert_eq!(driver.live_tasks(), 0);
    assert_eq!(snaps.borrow().last_outcome, Some(RoundOutcome::TimeUp));
    assert_eq!(snaps.borrow().countdown, CountdownPhase::Expired);
}

#[tokio::test(start_paused = true)]
async fn fire_from_previous_round_is_ignored() {
    let (mut driver, _snaps) = Driver::new(game(Difficulty::Easy, 3));
    driver.handle_command(Command::Start);
    let old = driver.game().timer_spec(TimerKind::Countdown).unwrap().handle;

    driver.handle_command(Command::Reset);
    driver.handle_command(Command::Start);

    let stale = Fired {
        kind: TimerKind::Countdown,
        handle: old,
        at: Instant::now() + Duration::from_millis(1000),
    };
    assert!(!driver.handle_fired(stale));
    assert_eq!(driver.game().seconds_remaining(), 60);
    assert!(driver.game().running());
}

#[tokio::test(start_paused = true)]
async fn settings_commands_are_refused_mid_round() {
    let (mut driver, snaps) = Driver::new(game(Difficulty::Easy, 3));
    driver.handle_command(Command::Start);
    assert!(!driver.handle_command(Command::GrowGrid));
    assert!(!driver.handle_command(Command::SetDifficulty(Difficulty::Hard)));
    assert_eq!(snaps.borrow().grid_size, 3);
    assert_eq!(snaps.borrow().difficulty, Difficulty::Easy);
}

#[test]
fn engine_runs_commands_from_sync_side() {
    let engine = Engine::start(GameState::new(5)).unwrap();
    engine.send(Command::Start);

    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while !engine.snapshot().running {
        assert!(std::time::Instant::now() < deadline, "round never started");
        std::thread::sleep(Duration::from_millis(5));
    }

    engine.send(Command::Reset);
    let snap = engine.shutdown().unwrap();
    assert!(!snap.running);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.seconds_remaining, 60);
}

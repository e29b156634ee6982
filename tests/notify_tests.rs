//! Integration tests for the notification lifecycle
//!
//! Drives the notification center through the tracker with a manual clock,
//! the way the CLI and tests are meant to observe toasts.

use asteca_progress::core::notify::{
    ManualClock, NotificationCenter, NotificationKind, NotificationState, NotificationTimings,
};
use asteca_progress::core::progress::{ProgressTracker, DEFAULT_PROGRESS_KEY};
use asteca_progress::core::storage::{CorruptPolicy, MemoryStore};
use std::time::Duration;

/// Tracker over an in-memory store with a shared manual clock
fn tracker_with_clock() -> (ProgressTracker<MemoryStore>, ManualClock) {
    let clock = ManualClock::new();
    let center = NotificationCenter::new(
        NotificationTimings::default(),
        Box::new(clock.clone()),
    );
    let (tracker, _) = ProgressTracker::initialize(
        MemoryStore::new(),
        DEFAULT_PROGRESS_KEY,
        100,
        CorruptPolicy::UseDefaults,
        center,
    )
    .expect("initialize");
    (tracker, clock)
}

#[test]
fn test_badge_toast_walks_the_full_lifecycle() {
    let (mut tracker, clock) = tracker_with_clock();

    tracker
        .award_badge("perfect_attendance", "Sempre Presente")
        .expect("award badge");

    let center = tracker.notifications_mut();
    assert_eq!(center.active().len(), 1);
    assert_eq!(center.active()[0].state, NotificationState::Created);
    assert!(center.visible().is_empty(), "Not yet shown at creation");

    // Shown from 100ms after creation
    clock.set(Duration::from_millis(100));
    center.pump();
    assert_eq!(center.active()[0].state, NotificationState::Shown);
    assert_eq!(center.visible().len(), 1);

    // Dismissing from 3000ms after creation
    clock.set(Duration::from_millis(3000));
    center.pump();
    assert_eq!(center.active()[0].state, NotificationState::Dismissing);
    assert!(center.visible().is_empty(), "Dismissing toasts are not visible");

    // Gone 300ms later
    clock.set(Duration::from_millis(3300));
    center.pump();
    assert!(center.active().is_empty());
}

#[test]
fn test_badge_and_level_up_messages_match_the_site() {
    let (mut tracker, _clock) = tracker_with_clock();

    tracker
        .award_badge("safety_expert", "Especialista em Segurança")
        .expect("award badge");
    tracker.add_points(100).expect("add points");

    let kinds: Vec<String> = tracker
        .notifications_mut()
        .drain()
        .into_iter()
        .map(|n| n.kind.to_string())
        .collect();

    assert_eq!(
        kinds,
        vec![
            "🏆 Parabéns! Você conquistou o badge: Especialista em Segurança".to_string(),
            "🎉 Level Up! Você alcançou o nível 2!".to_string(),
        ]
    );
}

#[test]
fn test_overlapping_toasts_age_independently() {
    let (mut tracker, clock) = tracker_with_clock();

    tracker
        .award_badge("perfect_attendance", "Sempre Presente")
        .expect("first badge");

    // Second notification created 2 seconds into the first one's life
    clock.set(Duration::from_millis(2000));
    tracker.add_points(100).expect("add points");

    clock.set(Duration::from_millis(2100));
    let center = tracker.notifications_mut();
    center.pump();
    let states: Vec<NotificationState> = center.active().iter().map(|n| n.state).collect();
    assert_eq!(states, vec![NotificationState::Shown, NotificationState::Shown]);

    // First dismisses at 3000, second only at 5000
    clock.set(Duration::from_millis(3000));
    center.pump();
    assert_eq!(center.visible().len(), 1);
    assert!(matches!(
        center.visible()[0].kind,
        NotificationKind::LevelUp { .. }
    ));

    // First is gone at 3300; second survives until 5300
    clock.set(Duration::from_millis(3300));
    center.pump();
    assert_eq!(center.active().len(), 1);

    clock.set(Duration::from_millis(5300));
    center.pump();
    assert!(center.active().is_empty());
}

#[test]
fn test_single_far_future_pump_clears_everything() {
    let (mut tracker, clock) = tracker_with_clock();

    tracker
        .award_badge("team_player", "Colaborador Exemplar")
        .expect("award badge");
    tracker.add_points(250).expect("add points");
    assert_eq!(tracker.notifications().active().len(), 2);

    clock.set(Duration::from_secs(60));
    let transitions = tracker.notifications_mut().pump();

    // Each toast stepped Created -> Shown -> Dismissing -> Removed
    assert_eq!(transitions.len(), 6);
    assert!(tracker.notifications().active().is_empty());
}

#[test]
fn test_multi_boundary_jump_announces_only_the_final_level() {
    let (mut tracker, _clock) = tracker_with_clock();

    tracker.add_points(250).expect("add points");

    let level_ups: Vec<String> = tracker
        .notifications_mut()
        .drain()
        .into_iter()
        .filter(|n| matches!(n.kind, NotificationKind::LevelUp { .. }))
        .map(|n| n.kind.to_string())
        .collect();

    assert_eq!(
        level_ups,
        vec!["🎉 Level Up! Você alcançou o nível 3!".to_string()]
    );
}

#[test]
fn test_no_boundary_cross_means_no_toast() {
    let (mut tracker, _clock) = tracker_with_clock();
    tracker.add_points(150).expect("add points");
    tracker.notifications_mut().drain();

    // Same level after another small addition: nothing to announce
    tracker.add_points(10).expect("add points");
    assert!(tracker.notifications().active().is_empty());
}

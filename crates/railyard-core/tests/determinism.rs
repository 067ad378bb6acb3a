//! Determinism verification tests
//!
//! Sessions with the same seed and the same player input must play out
//! identically.

use railyard_core::{Railyard, RailyardConfig};
use railyard_events::{ActionTag, SessionSnapshot, TickReport};

fn seeded(seed: u64) -> Railyard {
    let mut config = RailyardConfig::default();
    config.session.seed = seed;
    let mut railyard = Railyard::new(config).unwrap();
    railyard.start().unwrap();
    railyard
}

fn play_out(railyard: &mut Railyard) -> Vec<TickReport> {
    let mut reports = Vec::new();
    while let Some(report) = railyard.tick() {
        reports.push(report);
    }
    reports
}

/// Snapshot with the random session id blanked out
fn comparable(mut snapshot: SessionSnapshot) -> SessionSnapshot {
    snapshot.session_id.clear();
    snapshot
}

/// Test that the same seed populates the same grid
#[test]
fn test_same_seed_same_grid() {
    let a = seeded(42).snapshot();
    let b = seeded(42).snapshot();
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.trains, b.trains);
}

/// Test that different seeds populate different grids
#[test]
fn test_different_seeds_differ() {
    let a = seeded(42).snapshot();
    let b = seeded(43).snapshot();
    assert_ne!(a.grid, b.grid, "Different seeds should scatter entities differently");
}

/// Test that whole sessions replay identically
#[test]
fn test_session_replays_identically() {
    let mut a = seeded(7);
    let mut b = seeded(7);

    let reports_a = play_out(&mut a);
    let reports_b = play_out(&mut b);

    assert!(!reports_a.is_empty());
    assert_eq!(reports_a, reports_b);
    assert_eq!(comparable(a.snapshot()), comparable(b.snapshot()));
}

/// Test that counter-offers follow the seed
#[test]
fn test_counter_offers_are_seeded() {
    let mut a = seeded(99);
    let mut b = seeded(99);

    // Lower trust so the utilitarian haggles instead of complying
    for railyard in [&mut a, &mut b] {
        for _ in 0..5 {
            railyard.report_broken_promise("@greatest");
        }
    }

    for _ in 0..6 {
        let reply_a = a.handle_player_message("@greatest think of the lives you save");
        let reply_b = b.handle_player_message("@greatest think of the lives you save");
        assert!(matches!(reply_a[0].action_tag, ActionTag::Counter(_)));
        assert_eq!(reply_a, reply_b);
    }
}

/// Test that interleaving chat and ticks is reproducible
#[test]
fn test_mixed_chat_and_ticks_replay_identically() {
    let script = [
        Some("@mercy please, they feel pain"),
        None,
        None,
        Some("@protocol by order of the law, halt"),
        None,
        Some("why do any of this?"),
        None,
    ];

    let run = |seed| {
        let mut railyard = seeded(seed);
        let mut replies = Vec::new();
        for step in script {
            match step {
                Some(text) => replies.extend(railyard.handle_player_message(text)),
                None => {
                    railyard.tick();
                }
            }
        }
        (replies, comparable(railyard.snapshot()))
    };

    assert_eq!(run(5), run(5));
}

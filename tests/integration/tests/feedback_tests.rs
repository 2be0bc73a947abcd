//! Feedback Integration Tests
//!
//! Drive the reaction, comment, and timeline services end to end against a
//! fresh in-memory engine. No external services are required.
//!
//! Run with: cargo test -p integration-tests --test feedback_tests

use std::sync::Arc;

use feedback_core::{FeedbackEvent, ReactionType, Snowflake, SnowflakeGenerator, TimelinePosition};
use feedback_engine::{EventLog, ReactionLedger};
use feedback_service::dto::PeaksQuery;
use integration_tests::{around, assert_error, comment, to_json, toggle, unique_id, TestContext};

// ============================================================================
// Toggle Tests
// ============================================================================

#[test]
fn test_toggle_always_flips() {
    let test = TestContext::start();
    let (target, viewer) = (unique_id(), unique_id());

    let first = test.reactions().toggle_reaction(target, "like", toggle(viewer, 1.0)).unwrap();
    let second = test.reactions().toggle_reaction(target, "like", toggle(viewer, 1.0)).unwrap();

    assert!(first.active);
    assert!(!second.active);
}

#[test]
fn test_toggle_parity_appends_every_event() {
    let test = TestContext::start();
    let (target, viewer) = (unique_id(), unique_id());

    for n in 0..7 {
        test.reactions()
            .toggle_reaction(target, "clap", toggle(viewer, f64::from(n)))
            .unwrap();
    }

    assert!(test.reactions().is_active(target, viewer, "clap").unwrap());
    assert_eq!(test.ctx.engine().stats().events_logged, 7);
    assert_eq!(test.reactions().get_history(target, viewer, "clap").unwrap().len(), 7);
}

#[test]
fn test_toggle_returns_full_collection() {
    let test = TestContext::start();
    let target = unique_id();
    let (alice, bob) = (unique_id(), unique_id());

    test.reactions().toggle_reaction(target, "love", toggle(bob, 1.0)).unwrap();
    test.reactions().toggle_reaction(target, "wow", toggle(bob, 2.0)).unwrap();
    let response = test
        .reactions()
        .toggle_reaction(target, "love", toggle(alice, 3.0))
        .unwrap();

    assert_eq!(response.active_reactions.len(), 3);
    let json = to_json(&response).unwrap();
    assert_eq!(json["reactions"][0]["reaction_type"], "love");
    assert_eq!(json["reactions"][0]["count"], 2);
    assert_eq!(json["reactions"][0]["me"], true);
    assert_eq!(json["reactions"][1]["reaction_type"], "wow");
    assert_eq!(json["reactions"][1]["me"], false);
    assert_eq!(json["event"]["author_id"], alice.to_string());
}

#[test]
fn test_rejected_requests_have_no_side_effect() {
    let test = TestContext::start();
    let (target, viewer) = (unique_id(), unique_id());

    assert_error(
        test.reactions().toggle_reaction(target, "thumbsdown", toggle(viewer, 1.0)),
        400,
        "INVALID_REACTION_KIND",
    )
    .unwrap();
    for position in [-1.0, f64::NAN, f64::INFINITY] {
        assert_error(
            test.reactions().toggle_reaction(target, "like", toggle(viewer, position)),
            400,
            "INVALID_TIMESTAMP",
        )
        .unwrap();
    }
    assert_error(
        test.comments().create_comment(target, comment(viewer, "too early", -1.0)),
        400,
        "INVALID_TIMESTAMP",
    )
    .unwrap();
    assert_error(
        test.timeline().group_around(target, around(-1.0, None)),
        400,
        "INVALID_TIMESTAMP",
    )
    .unwrap();
    assert_error(
        test.timeline().group_around(target, around(1.0, Some(0.0))),
        400,
        "INVALID_WINDOW",
    )
    .unwrap();

    assert_eq!(test.ctx.engine().stats().events_logged, 0);
    assert!(test.reactions().get_active_reactions(target).is_empty());
}

// ============================================================================
// Window Tests
// ============================================================================

#[test]
fn test_window_bounds_are_inclusive() {
    let test = TestContext::start();
    let (target, viewer) = (unique_id(), unique_id());

    for at in [5.0, 15.0, 15.000_001] {
        test.comments().create_comment(target, comment(viewer, "edge", at)).unwrap();
    }

    let group = test.timeline().group_around(target, around(10.0, Some(5.0))).unwrap();
    let positions: Vec<_> = group.events.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![5.0, 15.0]);
}

#[test]
fn test_group_around_is_deterministic() {
    let test = TestContext::start();
    let target = unique_id();

    for _ in 0..5 {
        let viewer = unique_id();
        test.reactions().toggle_reaction(target, "laugh", toggle(viewer, 8.0)).unwrap();
        test.comments().create_comment(target, comment(viewer, "same time", 8.0)).unwrap();
    }

    let first = test.timeline().group_around(target, around(8.0, None)).unwrap();
    let second = test.timeline().group_around(target, around(8.0, None)).unwrap();

    let ids = |group: &feedback_service::dto::FeedbackGroupResponse| {
        group.events.iter().map(|e| e.id.parse::<i64>().unwrap()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
    let mut sorted = ids(&first);
    sorted.sort_unstable();
    assert_eq!(ids(&first), sorted);
}

#[test]
fn test_tombstones_filtered_but_logged() {
    let test = TestContext::start();
    let (target, viewer) = (unique_id(), unique_id());

    test.reactions().toggle_reaction(target, "like", toggle(viewer, 3.0)).unwrap();
    test.reactions().toggle_reaction(target, "like", toggle(viewer, 4.0)).unwrap();
    test.comments().create_comment(target, comment(viewer, "still here", 3.5)).unwrap();

    let group = test.timeline().group_around(target, around(3.5, None)).unwrap();
    assert!(group.reactions.is_empty());
    assert_eq!(group.events.len(), 1);
    assert_eq!(group.comment_count, 1);
    assert_eq!(test.ctx.engine().stats().events_logged, 3);
}

#[test]
fn test_empty_group_is_not_an_error() {
    let test = TestContext::start();
    let group = test.timeline().group_around(unique_id(), around(42.0, None)).unwrap();
    assert!(group.events.is_empty());
    assert_eq!(group.center, 42.0);
}

// ============================================================================
// Scenario Tests
// ============================================================================

fn seed_scenario(test: &TestContext) -> Snowflake {
    let target = unique_id();
    let viewer = unique_id();
    test.reactions().toggle_reaction(target, "like", toggle(viewer, 2.0)).unwrap();
    test.comments().create_comment(target, comment(viewer, "nice", 4.0)).unwrap();
    test.reactions().toggle_reaction(target, "wow", toggle(viewer, 9.0)).unwrap();
    test.comments().create_comment(target, comment(viewer, "the end", 20.0)).unwrap();
    target
}

#[test]
fn test_scenario_group_around() {
    let test = TestContext::start();
    let target = seed_scenario(&test);

    let group = test.timeline().group_around(target, around(4.0, Some(5.0))).unwrap();
    let positions: Vec<_> = group.events.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![2.0, 4.0, 9.0]);
}

#[test]
fn test_scenario_peaks() {
    let test = TestContext::start();
    let target = seed_scenario(&test);

    let peaks = test.timeline().peaks(target, PeaksQuery::default()).unwrap();
    let positions: Vec<Vec<f64>> = peaks
        .iter()
        .map(|group| group.events.iter().map(|e| e.position).collect())
        .collect();
    assert_eq!(positions, vec![vec![2.0, 4.0, 9.0], vec![20.0]]);
}

#[test]
fn test_window_from_configuration() {
    let test = TestContext::start_with_env(&[("FEEDBACK_WINDOW_SECONDS", "3")]).unwrap();
    let target = seed_scenario(&test);

    let peaks = test.timeline().peaks(target, PeaksQuery::default()).unwrap();
    assert_eq!(peaks.len(), 3);

    assert!(TestContext::start_with_env(&[("FEEDBACK_WINDOW_SECONDS", "-1")]).is_err());
}

#[test]
fn test_comment_limit_from_configuration() {
    let test = TestContext::start_with_env(&[("FEEDBACK_MAX_COMMENT_LENGTH", "5000")]).unwrap();
    let (target, viewer) = (unique_id(), unique_id());

    let body = "a".repeat(3000);
    let posted = test.comments().create_comment(target, comment(viewer, &body, 1.0)).unwrap();
    assert_eq!(posted.body.len(), 3000);

    assert_error(
        test.comments().create_comment(target, comment(viewer, &"a".repeat(5001), 1.0)),
        400,
        "CONTENT_TOO_LONG",
    )
    .unwrap();
}

// ============================================================================
// Ingestion Tests
// ============================================================================

#[test]
fn test_duplicate_ingest_rejected() {
    let test = TestContext::start();
    let target = seed_scenario(&test);
    let index = test.ctx.engine().index();

    let existing = test.ctx.engine().log().events_for_target(target)[0].clone();
    let before = test.timeline().group_around(target, around(4.0, None)).unwrap();

    let err = index.ingest(existing).unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_EVENT");

    let after = test.timeline().group_around(target, around(4.0, None)).unwrap();
    assert_eq!(before.events.len(), after.events.len());
}

#[test]
fn test_replay_rebuilds_ledger() {
    let test = TestContext::start();
    let target = unique_id();
    let (alice, bob) = (unique_id(), unique_id());

    test.reactions().toggle_reaction(target, "like", toggle(alice, 1.0)).unwrap();
    test.reactions().toggle_reaction(target, "love", toggle(bob, 2.0)).unwrap();
    test.reactions().toggle_reaction(target, "love", toggle(bob, 3.0)).unwrap();

    let log = Arc::new(EventLog::new());
    for event in test.ctx.engine().log().snapshot() {
        log.append(event);
    }
    let replayed = ReactionLedger::replay(Arc::new(SnowflakeGenerator::default()), log);

    let active = replayed.active_reactions(target);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].key.author_id, alice);
    assert_eq!(active[0].key.reaction_type, ReactionType::Like);
}

#[test]
fn test_out_of_order_positions_latest_toggle_wins() {
    let test = TestContext::start();
    let (target, viewer) = (unique_id(), unique_id());

    // Second toggle lands earlier on the timeline than the first
    test.reactions().toggle_reaction(target, "clap", toggle(viewer, 10.0)).unwrap();
    test.reactions().toggle_reaction(target, "clap", toggle(viewer, 6.0)).unwrap();

    let group = test.timeline().group_around(target, around(8.0, None)).unwrap();
    assert!(group.reactions.is_empty());

    // Comments posted directly as events are never filtered
    let event = FeedbackEvent::comment(
        test.ctx.generate_id(),
        target,
        TimelinePosition::new(8.0).unwrap(),
        viewer,
        "manual".to_string(),
    );
    test.ctx.engine().index().ingest(event).unwrap();
    let group = test.timeline().group_around(target, around(8.0, None)).unwrap();
    assert_eq!(group.comment_count, 1);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_toggles_same_key() {
    let test = Arc::new(TestContext::start());
    let (target, viewer) = (unique_id(), unique_id());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let test = Arc::clone(&test);
            tokio::spawn(async move {
                for i in 0..25 {
                    test.reactions()
                        .toggle_reaction(target, "like", toggle(viewer, f64::from(i)))
                        .unwrap();
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    // 200 flips: even, so the key ends inactive and no flip was lost
    assert!(!test.reactions().is_active(target, viewer, "like").unwrap());
    assert_eq!(test.reactions().get_history(target, viewer, "like").unwrap().len(), 200);
}

#[tokio::test]
async fn test_live_feed_sees_every_event() {
    let test = TestContext::start();
    let mut feed = test.ctx.engine().subscribe();
    let (target, viewer) = (unique_id(), unique_id());

    test.reactions().toggle_reaction(target, "like", toggle(viewer, 1.0)).unwrap();
    test.comments().create_comment(target, comment(viewer, "hello", 2.0)).unwrap();

    assert!(feed.recv().await.unwrap().is_reaction());
    assert_eq!(feed.recv().await.unwrap().comment_body(), Some("hello"));
}

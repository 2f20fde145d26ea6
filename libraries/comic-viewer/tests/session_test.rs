//! Integration tests for the viewer session
//!
//! Cover config checks, selection, manual navigation under both policies, the derived view,
//! catalog replacement and the autoplay timer (with paused tokio time).

use comic_catalog::{AssetPaths, Catalog};
use comic_viewer::{
    AutoplayTick, NavigationPolicy, SessionSignal, SilentPlayer, ViewerConfig, ViewerError,
    ViewerEvent, ViewerSession,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

// ===== Test Helpers =====

const MANIFEST: &str = r#"{
    "intro": { "name": "Intro", "pages": 5, "captions": { "0": "Cover" } },
    "demo": { "name": "Demo", "pages": 3, "captions": { "1": "middle" } },
    "x": { "name": "X", "pages": 3 }
}"#;

fn catalog(json: &str) -> Arc<Catalog> {
    Arc::new(Catalog::from_json(json, AssetPaths::default()).unwrap())
}

fn session_with(
    json: &str,
    config: ViewerConfig,
) -> (ViewerSession, UnboundedReceiver<SessionSignal>) {
    ViewerSession::new(catalog(json), config, Arc::new(SilentPlayer::new())).unwrap()
}

fn wrap_config() -> ViewerConfig {
    ViewerConfig {
        navigation: NavigationPolicy::Wrap,
        ..ViewerConfig::default()
    }
}

// ===== Configuration =====

fn rejects(config: ViewerConfig) -> bool {
    matches!(
        ViewerSession::new(catalog(MANIFEST), config, Arc::new(SilentPlayer::new())),
        Err(ViewerError::InvalidConfig(_))
    )
}

#[test]
fn test_zero_interval_rejected_at_construction() {
    assert!(rejects(ViewerConfig {
        autoplay_interval_ms: 0,
        ..ViewerConfig::default()
    }));
}

#[test]
fn test_interval_outside_bounds_rejected_at_construction() {
    for ms in [2999, 4001] {
        assert!(rejects(ViewerConfig {
            autoplay_interval_ms: ms,
            ..ViewerConfig::default()
        }));
    }
}

#[test]
fn test_empty_caption_fallback_rejected_at_construction() {
    assert!(rejects(ViewerConfig {
        caption_fallback: String::new(),
        ..ViewerConfig::default()
    }));
}

#[test]
fn test_session_keeps_its_config() {
    let (session, _signals) = session_with(MANIFEST, wrap_config());
    assert_eq!(session.get_config(), &wrap_config());
    assert_eq!(session.get_config().autoplay_interval(), Duration::from_millis(4000));
}

// ===== Selection =====

#[test]
fn test_first_collection_selected_on_start() {
    let (session, _signals) = session_with(MANIFEST, ViewerConfig::default());

    assert_eq!(session.get_selected_collection(), Some("intro"));
    assert_eq!(session.get_page_index(), 0);
    assert!(!session.is_autoplay());
    assert!(!session.is_music_on());

    let view = session.current_view().unwrap();
    assert_eq!(view.title, "Intro");
    assert_eq!(view.caption, "Cover");
    assert_eq!(view.page_counter(), (1, 5));
}

#[test]
fn test_select_resets_page() {
    let (mut session, _signals) = session_with(MANIFEST, ViewerConfig::default());
    session.next_page();
    session.next_page();
    assert_eq!(session.get_page_index(), 2);

    assert!(session.select_collection("demo"));
    assert_eq!(session.get_selected_collection(), Some("demo"));
    assert_eq!(session.get_page_index(), 0);

    // Re-selecting the same collection resets as well
    session.next_page();
    assert!(session.select_collection("demo"));
    assert_eq!(session.get_page_index(), 0);
}

#[test]
fn test_unknown_collection_is_noop() {
    let (mut session, _signals) = session_with(MANIFEST, ViewerConfig::default());
    session.next_page();
    session.drain_events();

    assert!(!session.select_collection("nope"));
    assert_eq!(session.get_selected_collection(), Some("intro"));
    assert_eq!(session.get_page_index(), 1);
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_collections_listed_in_manifest_order() {
    let (session, _signals) = session_with(MANIFEST, ViewerConfig::default());
    let ids: Vec<String> = session.collections().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["intro", "demo", "x"]);
}

// ===== Navigation =====

#[test]
fn test_end_to_end_demo_with_wrap() {
    let (mut session, _signals) = session_with(MANIFEST, wrap_config());
    assert!(session.select_collection("demo"));

    let pages = session.get_catalog().get("demo").unwrap().pages().to_vec();
    assert_eq!(
        pages,
        vec![
            "/images/demo/00.jpg",
            "/images/demo/01.jpg",
            "/images/demo/02.jpg"
        ]
    );

    session.next_page();
    let view = session.current_view().unwrap();
    assert_eq!(session.get_page_index(), 1);
    assert_eq!(view.caption, "middle");
    assert_eq!(view.image.as_deref(), Some("/images/demo/01.jpg"));

    session.next_page();
    let view = session.current_view().unwrap();
    assert_eq!(session.get_page_index(), 2);
    assert_eq!(view.caption, "Page 3");

    session.next_page();
    assert_eq!(session.get_page_index(), 0);

    session.previous_page();
    assert_eq!(session.get_page_index(), 2);
}

#[test]
fn test_clamp_is_default_and_stops_at_boundaries() {
    let (mut session, _signals) = session_with(MANIFEST, ViewerConfig::default());
    session.select_collection("demo");

    assert!(!session.previous_page());
    assert_eq!(session.get_page_index(), 0);

    assert!(session.next_page());
    assert!(session.next_page());
    assert!(!session.next_page());
    assert_eq!(session.get_page_index(), 2);
    assert_eq!(session.current_view().unwrap().page_counter(), (3, 3));
}

#[test]
fn test_caption_fallback_never_empty() {
    let (mut session, _signals) = session_with(MANIFEST, wrap_config());
    session.select_collection("x");

    for index in 0..3 {
        let view = session.current_view().unwrap();
        assert_eq!(view.caption, format!("Page {}", index + 1));
        session.next_page();
    }
}

#[test]
fn test_every_transition_pushes_view() {
    let (mut session, _signals) = session_with(MANIFEST, ViewerConfig::default());
    session.drain_events();

    session.next_page();
    let events = session.drain_events();
    match events.as_slice() {
        [ViewerEvent::ViewChanged { view: Some(view) }] => assert_eq!(view.page, 2),
        other => panic!("Expected a single ViewChanged, got {:?}", other),
    }
}

// ===== Catalog replacement =====

#[test]
fn test_loading_then_catalog_arrives() {
    let (mut session, _signals) = session_with("{}", ViewerConfig::default());
    assert!(session.is_loading());
    assert!(session.current_view().is_none());

    session.replace_catalog(catalog(MANIFEST));
    assert_eq!(session.get_selected_collection(), Some("intro"));
    assert!(session.current_view().is_some());
}

#[test]
fn test_replace_keeps_selection_and_reclamps() {
    let (mut session, _signals) = session_with(MANIFEST, ViewerConfig::default());
    for _ in 0..4 {
        session.next_page();
    }
    assert_eq!(session.get_page_index(), 4);

    session.replace_catalog(catalog(r#"{ "other": { "name": "O", "pages": 1 }, "intro": { "name": "Intro v2", "pages": 2 } }"#));
    assert_eq!(session.get_selected_collection(), Some("intro"));
    assert_eq!(session.get_page_index(), 1);
    assert_eq!(session.current_view().unwrap().title, "Intro v2");
}

#[test]
fn test_replace_without_selection_falls_back_to_first() {
    let (mut session, _signals) = session_with(MANIFEST, ViewerConfig::default());
    session.next_page();

    session.replace_catalog(catalog(r#"{ "fresh": { "name": "Fresh", "pages": 2 } }"#));
    assert_eq!(session.get_selected_collection(), Some("fresh"));
    assert_eq!(session.get_page_index(), 0);

    session.replace_catalog(catalog("{}"));
    assert!(session.is_loading());
    assert!(session.current_view().is_none());
}

// ===== Autoplay =====

#[tokio::test(start_paused = true)]
async fn test_autoplay_advances_and_wraps() {
    let (mut session, mut signals) = session_with(MANIFEST, ViewerConfig::default());
    session.select_collection("demo");

    assert!(session.toggle_autoplay());
    assert!(session.is_autoplay());

    let mut seen = Vec::new();
    for _ in 0..4 {
        let signal = signals.recv().await.unwrap();
        session.handle_signal(signal);
        seen.push(session.get_page_index());
    }

    // Wraps even though manual navigation clamps
    assert_eq!(seen, vec![1, 2, 0, 1]);
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_uses_configured_interval() {
    let config = ViewerConfig {
        autoplay_interval_ms: 3000,
        ..ViewerConfig::default()
    };
    let (mut session, mut signals) = session_with(MANIFEST, config);

    let started = tokio::time::Instant::now();
    session.toggle_autoplay();
    let signal = signals.recv().await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_millis(3000));

    session.handle_signal(signal);
    assert_eq!(session.get_page_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_on_then_off_before_tick() {
    let (mut session, mut signals) = session_with(MANIFEST, ViewerConfig::default());

    assert!(session.toggle_autoplay());
    assert!(!session.toggle_autoplay());

    tokio::time::sleep(Duration::from_secs(30)).await;

    assert!(signals.try_recv().is_err());
    assert_eq!(session.get_page_index(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_select_collection_stops_autoplay() {
    let (mut session, mut signals) = session_with(MANIFEST, ViewerConfig::default());
    session.toggle_autoplay();

    // Let a tick land in the channel without applying it
    tokio::time::sleep(Duration::from_millis(4001)).await;

    assert!(session.select_collection("demo"));
    assert!(!session.is_autoplay());

    let mut queued = 0;
    while let Ok(signal) = signals.try_recv() {
        queued += 1;
        session.handle_signal(signal);
    }
    assert!(queued > 0, "expected a tick queued before the switch");
    assert_eq!(session.get_page_index(), 0);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(signals.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_stale_tick_from_old_timer_ignored() {
    let (mut session, _signals) = session_with(MANIFEST, ViewerConfig::default());

    session.toggle_autoplay();
    session.toggle_autoplay();
    session.toggle_autoplay();

    // Generation 1 belongs to the first, cancelled timer
    session.handle_signal(SessionSignal::Tick(AutoplayTick {
        generation: 1,
        collection_id: "intro".to_string(),
    }));
    assert_eq!(session.get_page_index(), 0);

    // Live generation, wrong collection
    session.handle_signal(SessionSignal::Tick(AutoplayTick {
        generation: 2,
        collection_id: "demo".to_string(),
    }));
    assert_eq!(session.get_page_index(), 0);

    session.handle_signal(SessionSignal::Tick(AutoplayTick {
        generation: 2,
        collection_id: "intro".to_string(),
    }));
    assert_eq!(session.get_page_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_events() {
    let (mut session, _signals) = session_with(MANIFEST, ViewerConfig::default());
    session.drain_events();

    session.toggle_autoplay();
    let events = session.drain_events();
    assert!(events.contains(&ViewerEvent::AutoplayChanged { enabled: true }));
    assert!(matches!(
        events.last(),
        Some(ViewerEvent::ViewChanged { view: Some(view) }) if view.autoplay
    ));

    session.toggle_autoplay();
    let events = session.drain_events();
    assert!(events.contains(&ViewerEvent::AutoplayChanged { enabled: false }));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_session_stops_timer() {
    let (mut session, mut signals) = session_with(MANIFEST, ViewerConfig::default());
    session.toggle_autoplay();
    drop(session);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(signals.recv().await.is_none());
}

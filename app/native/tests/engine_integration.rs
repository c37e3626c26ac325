//! End-to-end tests for the masonry engine.
//!
//! These drive [`MasonryEngine`] through its public API with a
//! [`RecordingDriver`] and a [`RecordingHost`], the same way a renderer
//! would: mount, render nodes, feed sizes and pointer events, tear down.
//!
//! ```bash
//! cargo test -p masonry --test engine_integration
//! ```

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use masonry_lib::config::{EntryDirection, MasonryConfig};
use masonry_lib::error::MasonryResult;
use masonry_lib::masonry::{
    ClickOutcome, DriverCall, Item, ItemId, ItemNodes, LinkOpener, MasonryEngine, NodeId,
    Property, RecordingDriver, RecordingHost, Size,
};

// ============================================================================
// Helpers
// ============================================================================

/// Overlay nodes live at `OVERLAY + index`.
const OVERLAY: u64 = 100;

fn config() -> MasonryConfig {
    let mut config = MasonryConfig::default();
    config.layout.await_media = false;
    config.layout.resize_debounce_ms = 0;
    config.animation.random_seed = Some(7);
    config
}

fn scenario_items() -> Vec<Item> {
    [600.0, 700.0, 800.0, 500.0, 400.0]
        .into_iter()
        .enumerate()
        .map(|(i, h)| Item::new(i as u64, h))
        .collect()
}

fn id(i: u64) -> ItemId { ItemId::from(i) }

fn nodes(i: u64) -> ItemNodes { ItemNodes { item: NodeId(i), overlay: Some(NodeId(OVERLAY + i)) } }

struct Harness {
    engine: MasonryEngine<RecordingDriver>,
    driver: RecordingDriver,
    host: RecordingHost,
}

impl Harness {
    fn new(config: &MasonryConfig) -> Self {
        let driver = RecordingDriver::new();
        let mut host = RecordingHost::new();
        let mut engine = MasonryEngine::new(driver.clone(), config).unwrap();
        engine.mount(&mut host);
        Self { engine, driver, host }
    }

    /// Mounts, renders every item and lays out at `width` on a desktop viewport.
    fn laid_out(config: &MasonryConfig, items: Vec<Item>, width: f64) -> Self {
        let mut harness = Self::new(config);
        harness.engine.on_viewport_resize(Size::new(1280.0, 800.0), Instant::now());
        for i in 0..items.len() as u64 {
            harness.engine.on_node_mounted(id(i), nodes(i));
        }
        harness.engine.set_items(items).unwrap();
        harness.engine.on_container_resize(Size::new(width, 0.0));
        harness
    }

    fn tweens_since(&self, from: usize) -> Vec<DriverCall> {
        self.driver.calls().into_iter().skip(from).filter(DriverCall::is_tween).collect()
    }
}

fn from_to_count(calls: &[DriverCall]) -> usize {
    calls.iter().filter(|c| matches!(c, DriverCall::FromTo { .. })).count()
}

fn to_count(calls: &[DriverCall]) -> usize { calls.iter().filter(|c| matches!(c, DriverCall::To { .. })).count() }

// ============================================================================
// Packing scenarios
// ============================================================================

#[test]
fn test_single_column_stacks_items() {
    let mut harness = Harness::new(&config());
    harness.engine.set_column_count(NonZeroUsize::MIN);
    harness.engine.set_items(scenario_items()).unwrap();
    harness.engine.on_container_resize(Size::new(900.0, 0.0));

    let layout = harness.engine.layout();
    let ys: Vec<f64> = layout.slots.iter().map(|slot| slot.rect.y).collect();
    assert_eq!(ys, vec![0.0, 300.0, 650.0, 1050.0, 1300.0]);
    assert!((layout.total_height - 1500.0).abs() < f64::EPSILON);
}

#[test]
fn test_three_columns_balance_to_550() {
    let harness = Harness::laid_out(&config(), scenario_items(), 900.0);
    let layout = harness.engine.layout();

    assert_eq!(harness.engine.columns().get(), 3);
    let placed: Vec<(usize, f64, f64)> =
        layout.slots.iter().map(|s| (s.column, s.rect.y, s.rect.height)).collect();
    assert_eq!(
        placed,
        vec![(0, 0.0, 300.0), (1, 0.0, 350.0), (2, 0.0, 550.0), (0, 300.0, 250.0), (1, 350.0, 200.0)]
    );
    assert_eq!(layout.column_bottoms(3), vec![550.0, 550.0, 550.0]);
    assert!((layout.total_height - 550.0).abs() < f64::EPSILON);
}

// ============================================================================
// Animation issuance
// ============================================================================

#[test]
fn test_initial_mount_enters_every_item_once() {
    let harness = Harness::laid_out(&config(), scenario_items(), 900.0);
    let calls = harness.tweens_since(0);

    assert_eq!(from_to_count(&calls), 5);
    for i in 0..5 {
        assert!(harness.engine.is_mounted(&id(i)));
    }
    // settled on the slot, fully opaque and sharp
    assert_eq!(harness.driver.sample(NodeId(4), Property::X, 30.0), Some(300.0));
    assert_eq!(harness.driver.sample(NodeId(4), Property::Y, 30.0), Some(350.0));
    assert_eq!(harness.driver.sample(NodeId(4), Property::Opacity, 30.0), Some(1.0));
    assert_eq!(harness.driver.sample(NodeId(4), Property::Blur, 30.0), Some(0.0));
}

#[test]
fn test_resize_900_to_600_moves_instead_of_entering() {
    let mut harness = Harness::laid_out(&config(), scenario_items(), 900.0);
    harness.driver.advance_to(5.0);
    let before = harness.driver.calls().len();

    assert_eq!(harness.engine.on_container_resize(Size::new(600.0, 0.0)), 5);

    let calls = harness.tweens_since(before);
    assert_eq!(from_to_count(&calls), 0);
    assert_eq!(to_count(&calls), 5);
    for call in &calls {
        let DriverCall::To { to, .. } = call else { unreachable!() };
        assert!(to.get(Property::Opacity).is_none());
        assert!(to.get(Property::Blur).is_none());
    }

    // x and width scale by 600 / 900
    assert_eq!(harness.driver.sample(NodeId(1), Property::X, 30.0), Some(200.0));
    assert_eq!(harness.driver.sample(NodeId(1), Property::Width, 30.0), Some(200.0));
    assert_eq!(harness.driver.sample(NodeId(2), Property::X, 30.0), Some(400.0));
}

#[test]
fn test_rapid_resize_overrides_in_flight_moves() {
    let mut harness = Harness::laid_out(&config(), scenario_items(), 900.0);
    harness.driver.advance_to(5.0);
    harness.engine.on_container_resize(Size::new(600.0, 0.0));
    let first_move = harness
        .driver
        .calls_for(NodeId(1))
        .into_iter()
        .rev()
        .find_map(|call| match call {
            DriverCall::To { handle, .. } => Some(handle),
            _ => None,
        })
        .unwrap();

    harness.driver.advance_to(5.1);
    harness.engine.on_container_resize(Size::new(750.0, 0.0));

    assert!(harness.driver.live_properties(first_move).is_none());
    assert_eq!(harness.driver.sample(NodeId(1), Property::X, 30.0), Some(250.0));
}

#[test]
fn test_missing_node_is_skipped_then_healed() {
    let mut harness = Harness::new(&config());
    harness.engine.on_viewport_resize(Size::new(1280.0, 800.0), Instant::now());
    for i in [0, 1, 3, 4] {
        harness.engine.on_node_mounted(id(i), nodes(i));
    }
    harness.engine.set_items(scenario_items()).unwrap();
    assert_eq!(harness.engine.on_container_resize(Size::new(900.0, 0.0)), 4);
    assert!(!harness.engine.is_mounted(&id(2)));

    assert_eq!(harness.engine.on_node_mounted(id(2), nodes(2)), 1);
    let DriverCall::FromTo { timing, .. } = harness.driver.calls_for(NodeId(2)).remove(0) else {
        panic!("expected an entry tween");
    };
    assert!((timing.delay - 0.30).abs() < 1e-9);
}

#[test]
fn test_media_gate_defers_first_layout() {
    let mut config = config();
    config.layout.await_media = true;
    let mut harness = Harness::laid_out(&config, scenario_items(), 900.0);

    assert!(harness.driver.calls().is_empty());
    assert_eq!(harness.engine.layout().len(), 5);
    assert_eq!(harness.engine.mark_media_ready(), 5);
    assert_eq!(from_to_count(&harness.driver.calls()), 5);
}

#[test]
fn test_random_direction_is_not_rerolled_on_rerender() {
    let mut config = config();
    config.animation.entry_direction = EntryDirection::Random;
    let mut harness = Harness::laid_out(&config, scenario_items(), 900.0);

    let origin = |calls: Vec<DriverCall>| {
        calls.into_iter().find_map(|call| match call {
            DriverCall::FromTo { from, .. } => Some((from.get(Property::X), from.get(Property::Y))),
            _ => None,
        })
    };
    let first = origin(harness.driver.calls_for(NodeId(3))).unwrap();

    // the renderer swaps the node for a new one
    harness.engine.on_node_mounted(id(3), ItemNodes { item: NodeId(33), overlay: None });
    let second = origin(harness.driver.calls_for(NodeId(33))).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Hover, reveal, click
// ============================================================================

#[test]
fn test_hover_does_not_fight_layout_tweens() {
    let mut harness = Harness::laid_out(&config(), scenario_items(), 900.0);
    let before = harness.driver.calls().len();

    assert_eq!(harness.engine.on_hover_enter(&id(0)), 2);
    let kills = harness.driver.calls().into_iter().skip(before).filter(|c| !c.is_tween()).count();
    assert_eq!(kills, 0);

    assert_eq!(harness.driver.sample(NodeId(0), Property::Scale, 30.0), Some(0.97));
    assert_eq!(harness.driver.sample(NodeId(OVERLAY), Property::OverlayOpacity, 30.0), Some(0.3));
    assert_eq!(harness.driver.sample(NodeId(0), Property::Y, 30.0), Some(0.0));

    harness.engine.on_hover_leave(&id(0));
    assert_eq!(harness.driver.sample(NodeId(0), Property::Scale, 30.0), Some(1.0));
}

#[test]
fn test_scroll_reveal_fires_once_per_item() {
    let mut harness = Harness::new(&config());
    // narrow viewport: one column of 200px tall slots
    harness.engine.on_viewport_resize(Size::new(500.0, 800.0), Instant::now());
    let items: Vec<Item> = (0..6_u64).map(|i| Item::new(i, 400.0)).collect();
    for i in 0..6 {
        harness.engine.on_node_mounted(id(i), nodes(i));
    }
    harness.engine.set_items(items).unwrap();
    harness.engine.on_container_resize(Size::new(400.0, 0.0));

    assert_eq!(harness.engine.on_scroll(0.0), 4);
    assert_eq!(harness.engine.on_scroll(-300.0), 2);
    assert_eq!(harness.engine.on_scroll(0.0), 0);
    assert_eq!(harness.engine.on_scroll(-300.0), 0);
    for i in 0..6 {
        assert!(harness.engine.is_revealed(&id(i)));
    }

    let reveals = harness
        .driver
        .calls()
        .into_iter()
        .filter(|call| match call {
            DriverCall::FromTo { from, .. } => from.get(Property::OffsetY).is_some(),
            _ => false,
        })
        .count();
    assert_eq!(reveals, 6);
}

#[test]
fn test_scroll_during_entry_keeps_the_cascade() {
    let mut config = config();
    config.animation.entry_direction = EntryDirection::Center;
    let mut harness = Harness::laid_out(&config, scenario_items(), 900.0);
    let before = harness.driver.calls().len();

    assert_eq!(harness.engine.on_scroll(0.0), 5);

    let kills = harness
        .driver
        .calls()
        .into_iter()
        .skip(before)
        .filter(|call| matches!(call, DriverCall::Kill { .. }))
        .count();
    assert_eq!(kills, 0);

    // item 4 enters after 0.6s, so it is still hidden at its origin
    let sample = |property, at| harness.driver.sample(NodeId(4), property, at).unwrap();
    assert_eq!(sample(Property::Opacity, 0.5), 0.0);
    assert!((sample(Property::X, 0.5) - 300.0).abs() < 1e-9);
    assert!((sample(Property::Y, 0.5) - 175.0).abs() < 1e-9);
    assert!(sample(Property::RevealOpacity, 0.5) > 0.0);

    // both channels settle on the slot
    assert_eq!(sample(Property::Opacity, 30.0), 1.0);
    assert_eq!(sample(Property::RevealOpacity, 30.0), 1.0);
    assert!((sample(Property::Y, 30.0) - 350.0).abs() < 1e-9);
}

struct CapturingOpener(Arc<Mutex<Vec<String>>>);

impl LinkOpener for CapturingOpener {
    fn open(&mut self, url: &str) -> MasonryResult<()> {
        self.0.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[test]
fn test_click_prefers_callback_then_url() {
    let opened = Arc::new(Mutex::new(Vec::new()));
    let clicked = Arc::new(Mutex::new(Vec::new()));
    let items = vec![Item::new(1_u64, 600.0).with_url("https://example.com/a"), Item::new(2_u64, 700.0)];

    let mut engine = MasonryEngine::new(RecordingDriver::new(), &config())
        .unwrap()
        .with_link_opener(Box::new(CapturingOpener(Arc::clone(&opened))));
    engine.set_items(items).unwrap();

    assert_eq!(engine.on_click(&id(1)).unwrap(), ClickOutcome::OpenedUrl("https://example.com/a".into()));
    assert_eq!(engine.on_click(&id(2)).unwrap(), ClickOutcome::Ignored);
    assert_eq!(engine.on_click(&id(9)).unwrap(), ClickOutcome::Ignored);

    let sink = Arc::clone(&clicked);
    engine.set_click_callback(Some(Box::new(move |item: &Item| {
        sink.lock().unwrap().push(item.id.to_string());
    })));
    assert_eq!(engine.on_click(&id(1)).unwrap(), ClickOutcome::Callback);

    assert_eq!(*opened.lock().unwrap(), vec!["https://example.com/a".to_string()]);
    assert_eq!(*clicked.lock().unwrap(), vec!["1".to_string()]);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_unmount_releases_node_tweens() {
    let mut harness = Harness::laid_out(&config(), scenario_items(), 900.0);
    harness.engine.on_hover_enter(&id(1));
    let live = harness.engine.live_tweens();

    assert!(harness.engine.on_node_unmounted(&id(1)) >= 2);
    assert!(harness.engine.live_tweens() < live);
    assert!(!harness.engine.is_mounted(&id(1)));

    let before = harness.driver.calls().len();
    assert_eq!(harness.engine.on_hover_leave(&id(1)), 0);
    assert_eq!(harness.driver.calls().len(), before);
}

#[test]
fn test_teardown_leaves_nothing_behind() {
    let mut harness = Harness::laid_out(&config(), scenario_items(), 900.0);
    assert_eq!(harness.host.attached_count(), 5);

    let summary = harness.engine.teardown(&mut harness.host);
    assert_eq!(summary.listeners_removed, 5);
    assert!(summary.tweens_killed >= 5);
    assert_eq!(harness.host.attached_count(), 0);
    assert_eq!(harness.engine.live_tweens(), 0);
    assert!(harness.driver.live_handles().is_empty());

    // stale events after teardown
    let before = harness.driver.calls().len();
    let now = Instant::now();
    assert_eq!(harness.engine.on_container_resize(Size::new(600.0, 0.0)), 0);
    assert_eq!(harness.engine.on_viewport_resize(Size::new(400.0, 800.0), now), 0);
    assert_eq!(harness.engine.tick(now), 0);
    assert_eq!(harness.engine.on_scroll(-500.0), 0);
    assert_eq!(harness.engine.on_hover_enter(&id(0)), 0);
    assert_eq!(harness.engine.set_items(scenario_items()).unwrap(), 0);
    assert_eq!(harness.engine.on_node_mounted(id(0), nodes(0)), 0);
    assert_eq!(harness.driver.calls().len(), before);

    assert_eq!(harness.engine.teardown(&mut harness.host), Default::default());
}

//! `masonry simulate`.
//!
//! Runs the engine against a recording driver and host: mounts, renders a
//! node per item, lays out, optionally scrolls and hovers, then prints every
//! tween command and where each item would be at a chosen time.

use std::time::{Duration, Instant};

use clap::Args;
use serde::Serialize;
use tabled::{Table, Tabled};

use super::input::load_items;
use super::layout::{DEFAULT_CONTAINER_WIDTH, DEFAULT_VIEWPORT_WIDTH};
use crate::cli::output::{format_bool, format_px, format_sample, print_json, print_table};
use crate::config::MasonryConfig;
use crate::error::MasonryResult;
use crate::masonry::{
    DriverCall, Item, ItemId, ItemNodes, MasonryEngine, NodeId, Property, RecordingDriver,
    RecordingHost, Size, TeardownSummary, Timing,
};

/// Default viewport height.
const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// Overlay node ids start here so they never collide with wrapper ids.
const OVERLAY_NODE_BASE: u64 = 1_000_000;

/// Properties shown in the frame table, in column order.
const FRAME_PROPERTIES: [Property; 8] = [
    Property::X,
    Property::Y,
    Property::Width,
    Property::Height,
    Property::Opacity,
    Property::RevealOpacity,
    Property::Blur,
    Property::Scale,
];

/// Arguments for `masonry simulate`.
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Item file (JSONC array, or an object with an `items` array).
    #[arg(long, short, value_name = "FILE")]
    pub items: String,

    /// Container width in pixels.
    #[arg(long, short, default_value_t = DEFAULT_CONTAINER_WIDTH)]
    pub width: f64,

    /// Viewport width in pixels, used for breakpoints and entry origins.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub viewport_width: f64,

    /// Viewport height in pixels, used for entry origins and reveal.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    pub viewport_height: f64,

    /// Only simulate items of this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Report a scroll with the container top at this viewport offset.
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    pub scroll: Option<f64>,

    /// Hover this item.
    #[arg(long, value_name = "ID")]
    pub hover: Option<String>,

    /// Driver time in seconds at which scroll and hover happen.
    #[arg(long, value_name = "SECS", default_value_t = 2.0)]
    pub events_at: f64,

    /// Driver time in seconds at which item frames are sampled.
    #[arg(long, value_name = "SECS", default_value_t = 1.0)]
    pub at: f64,

    /// Output as JSON.
    #[arg(long, short)]
    pub json: bool,
}

/// Everything a simulation produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub columns: usize,
    pub total_height: f64,
    pub commands: Vec<DriverCall>,
    pub sampled_at: f64,
    pub frames: Vec<ItemFrame>,
    pub teardown: TeardownReport,
}

/// Sampled values of one item.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFrame {
    pub item: ItemId,
    pub revealed: bool,
    pub values: Vec<(Property, Option<f64>)>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeardownReport {
    pub tweens_killed: usize,
    pub listeners_removed: usize,
    pub listeners_left: usize,
}

fn wrapper_node(index: usize) -> NodeId { NodeId(index as u64 + 1) }

fn overlay_node(index: usize) -> NodeId { NodeId(OVERLAY_NODE_BASE + index as u64 + 1) }

/// Runs a full engine lifecycle over `items`.
///
/// # Errors
///
/// Returns an error if the engine rejects the configuration or the items.
pub fn simulate(items: Vec<Item>, args: &SimulateArgs, config: &MasonryConfig) -> MasonryResult<SimulationReport> {
    let driver = RecordingDriver::new();
    let mut host = RecordingHost::new();
    let mut engine = MasonryEngine::new(driver.clone(), config)?;
    engine.mount(&mut host);

    let now = Instant::now();
    engine.on_viewport_resize(Size::new(args.viewport_width, args.viewport_height), now);
    engine.tick(now + Duration::from_millis(config.layout.resize_debounce_ms));

    for (index, item) in items.iter().enumerate() {
        let nodes = ItemNodes {
            item: wrapper_node(index),
            overlay: Some(overlay_node(index)),
        };
        engine.on_node_mounted(item.id.clone(), nodes);
    }
    engine.set_items(items.clone())?;
    engine.on_container_resize(Size::new(args.width, 0.0));
    engine.mark_media_ready();

    driver.advance_to(args.events_at);
    if let Some(top) = args.scroll {
        engine.on_scroll(top);
    }
    if let Some(hover) = &args.hover {
        engine.on_hover_enter(&ItemId::from(hover.as_str()));
    }

    let frames = items
        .iter()
        .enumerate()
        .map(|(index, item)| ItemFrame {
            item: item.id.clone(),
            revealed: engine.is_revealed(&item.id),
            values: FRAME_PROPERTIES
                .iter()
                .map(|property| (*property, driver.sample(wrapper_node(index), *property, args.at)))
                .collect(),
        })
        .collect();

    let columns = engine.columns().get();
    let total_height = engine.layout().total_height;
    let commands = driver.calls();

    let TeardownSummary { tweens_killed, listeners_removed } = engine.teardown(&mut host);
    tracing::debug!(commands = commands.len(), tweens_killed, "masonry: simulation finished");

    Ok(SimulationReport {
        columns,
        total_height,
        commands,
        sampled_at: args.at,
        frames,
        teardown: TeardownReport {
            tweens_killed,
            listeners_removed,
            listeners_left: host.attached_count(),
        },
    })
}

/// Runs `masonry simulate`.
///
/// # Errors
///
/// Returns an error if the item file, configuration or items are invalid.
pub fn execute(args: &SimulateArgs, config: &MasonryConfig) -> MasonryResult<()> {
    let items = load_items(&args.items, args.category.as_deref())?;
    let report = simulate(items.clone(), args, config)?;

    if args.json {
        print_json(&report);
    } else {
        print_report(&items, &report);
    }
    Ok(())
}

// ============================================================================
// Table output
// ============================================================================

#[derive(Tabled)]
struct CommandRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "At")]
    at: String,
    #[tabled(rename = "Call")]
    call: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Values")]
    values: String,
    #[tabled(rename = "Timing")]
    timing: String,
}

#[derive(Tabled)]
struct FrameRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Revealed")]
    revealed: String,
    #[tabled(rename = "X")]
    x: String,
    #[tabled(rename = "Y")]
    y: String,
    #[tabled(rename = "Width")]
    width: String,
    #[tabled(rename = "Height")]
    height: String,
    #[tabled(rename = "Opacity")]
    opacity: String,
    #[tabled(rename = "Reveal")]
    reveal: String,
    #[tabled(rename = "Blur")]
    blur: String,
    #[tabled(rename = "Scale")]
    scale: String,
}

fn easing_name(timing: &Timing) -> String {
    serde_json::to_value(timing.easing)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn describe_timing(timing: &Timing) -> String {
    let mut text = format!("{}s {}", timing.duration, easing_name(timing));
    if timing.delay > 0.0 {
        text.push_str(&format!(" +{:.2}s", timing.delay));
    }
    text
}

fn describe_target(items: &[Item], node: NodeId) -> String {
    let (index, layer) = if node.0 > OVERLAY_NODE_BASE {
        (node.0 - OVERLAY_NODE_BASE - 1, "overlay")
    } else {
        (node.0.wrapping_sub(1), "item")
    };
    usize::try_from(index)
        .ok()
        .and_then(|index| items.get(index))
        .map_or_else(|| format!("node {}", node.0), |item| format!("{} ({layer})", item.id))
}

fn command_row(items: &[Item], index: usize, call: &DriverCall) -> CommandRow {
    let render = |vars: &crate::masonry::TweenVars| {
        vars.iter().map(|(p, v)| format!("{p}={}", format_px(v))).collect::<Vec<_>>().join(" ")
    };

    match call {
        DriverCall::FromTo { handle, node, from, to, timing, at } => CommandRow {
            index,
            at: format!("{at:.2}"),
            call: format!("fromTo #{}", handle.0),
            target: describe_target(items, *node),
            values: format!("{} → {}", render(from), render(to)),
            timing: describe_timing(timing),
        },
        DriverCall::To { handle, node, to, timing, at } => CommandRow {
            index,
            at: format!("{at:.2}"),
            call: format!("to #{}", handle.0),
            target: describe_target(items, *node),
            values: render(to),
            timing: describe_timing(timing),
        },
        DriverCall::Kill { handle, properties, at } => CommandRow {
            index,
            at: format!("{at:.2}"),
            call: format!("kill #{}", handle.0),
            target: String::new(),
            values: properties.as_ref().map_or_else(
                || "all".to_string(),
                |props| props.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "),
            ),
            timing: String::new(),
        },
    }
}

fn frame_row(frame: &ItemFrame) -> FrameRow {
    let value = |property: Property| {
        frame.values.iter().find(|(p, _)| *p == property).and_then(|(_, v)| *v)
    };
    let px = |property: Property| value(property).map_or_else(|| format_sample(None), format_px);

    FrameRow {
        item: frame.item.to_string(),
        revealed: format_bool(frame.revealed),
        x: px(Property::X),
        y: px(Property::Y),
        width: px(Property::Width),
        height: px(Property::Height),
        opacity: format_sample(value(Property::Opacity)),
        reveal: format_sample(value(Property::RevealOpacity)),
        blur: format_sample(value(Property::Blur)),
        scale: format_sample(value(Property::Scale)),
    }
}

fn print_report(items: &[Item], report: &SimulationReport) {
    let commands: Vec<CommandRow> = report
        .commands
        .iter()
        .enumerate()
        .map(|(index, call)| command_row(items, index, call))
        .collect();
    print_table("Commands", commands.len(), &mut Table::new(commands));

    println!();
    let frames: Vec<FrameRow> = report.frames.iter().map(frame_row).collect();
    let title = format!(
        "Frames at {}s: {} columns, container height {}px, items",
        report.sampled_at,
        report.columns,
        format_px(report.total_height)
    );
    print_table(&title, frames.len(), &mut Table::new(frames));

    println!(
        "\nTeardown: {} tweens killed, {} listeners removed, {} left attached",
        report.teardown.tweens_killed,
        report.teardown.listeners_removed,
        report.teardown.listeners_left
    );
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: SimulateArgs,
    }

    fn args(extra: &[&str]) -> SimulateArgs {
        let mut argv = vec!["simulate", "--items", "unused.jsonc"];
        argv.extend_from_slice(extra);
        Harness::try_parse_from(argv).unwrap().args
    }

    fn blog_items() -> Vec<Item> {
        [600.0, 700.0, 800.0, 650.0, 550.0, 520.0]
            .into_iter()
            .enumerate()
            .map(|(i, h)| Item::new(i as u64 + 1, h))
            .collect()
    }

    fn frame<'a>(report: &'a SimulationReport, id: &str) -> &'a ItemFrame {
        report.frames.iter().find(|f| f.item.as_str() == id).unwrap()
    }

    fn value(frame: &ItemFrame, property: Property) -> Option<f64> {
        frame.values.iter().find(|(p, _)| *p == property).and_then(|(_, v)| *v)
    }

    #[test]
    fn test_negative_scroll_parses() {
        let parsed = args(&["--scroll", "-400"]);
        assert_eq!(parsed.scroll, Some(-400.0));
    }

    #[test]
    fn test_simulation_enters_every_item_and_cleans_up() {
        let report = simulate(blog_items(), &args(&["--at", "10"]), &MasonryConfig::default()).unwrap();

        assert_eq!(report.columns, 3);
        let enters = report.commands.iter().filter(|c| matches!(c, DriverCall::FromTo { .. })).count();
        assert_eq!(enters, 6);

        // long after the staggered entry every item rests on its slot
        let first = frame(&report, "1");
        assert_eq!(value(first, Property::X), Some(0.0));
        assert_eq!(value(first, Property::Y), Some(0.0));
        assert_eq!(value(first, Property::Width), Some(300.0));
        assert_eq!(value(first, Property::Opacity), Some(1.0));

        assert_eq!(report.teardown.listeners_left, 0);
        assert!(report.teardown.listeners_removed >= 3);
    }

    #[test]
    fn test_simulation_hover_targets_wrapper_and_overlay() {
        let report =
            simulate(blog_items(), &args(&["--hover", "2", "--at", "10"]), &MasonryConfig::default()).unwrap();

        let hover_targets: Vec<NodeId> = report
            .commands
            .iter()
            .filter(|c| matches!(c, DriverCall::To { .. }))
            .filter_map(DriverCall::node)
            .collect();
        assert!(hover_targets.contains(&wrapper_node(1)));
        assert!(hover_targets.contains(&overlay_node(1)));
        assert_eq!(value(frame(&report, "2"), Property::Scale), Some(0.97));
    }

    #[test]
    fn test_describe_target_names_layers() {
        let items = blog_items();
        assert_eq!(describe_target(&items, wrapper_node(0)), "1 (item)");
        assert_eq!(describe_target(&items, overlay_node(2)), "3 (overlay)");
        assert_eq!(describe_target(&items, NodeId(99)), "node 99");
    }

    #[test]
    fn test_describe_timing_shows_delay() {
        let timing = Timing::new(1.4, crate::config::EasingType::Power2Out).delayed(0.3);
        assert_eq!(describe_timing(&timing), "1.4s power2.out +0.30s");
    }
}

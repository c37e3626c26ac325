//! `masonry layout` and `masonry categories`.
//!
//! Computes a layout for an item file without any animation and prints the
//! slots as a table or as JSON.

use std::num::NonZeroUsize;

use clap::Args;
use serde::Serialize;
use tabled::{Table, Tabled};

use super::input::load_items;
use crate::cli::output::{format_px, print_json, print_table, truncate};
use crate::config::MasonryConfig;
use crate::error::MasonryResult;
use crate::masonry::layout::categories;
use crate::masonry::{Breakpoints, Item, LayoutParams, LayoutResult, compute_layout};

/// Default container width when none is given.
pub const DEFAULT_CONTAINER_WIDTH: f64 = 900.0;

/// Default viewport width for breakpoint evaluation.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

/// Arguments for `masonry layout`.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Item file (JSONC array, or an object with an `items` array).
    #[arg(long, short, value_name = "FILE")]
    pub items: String,

    /// Container width in pixels.
    #[arg(long, short, default_value_t = DEFAULT_CONTAINER_WIDTH)]
    pub width: f64,

    /// Column count, bypassing breakpoints.
    #[arg(long, conflicts_with = "viewport_width")]
    pub columns: Option<NonZeroUsize>,

    /// Viewport width used to evaluate breakpoints.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub viewport_width: f64,

    /// Only lay out items of this category ("All" keeps everything).
    #[arg(long)]
    pub category: Option<String>,

    /// Output as JSON.
    #[arg(long, short)]
    pub json: bool,
}

impl LayoutArgs {
    /// Column count for these arguments under `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured breakpoint does not parse.
    pub fn resolve_columns(&self, config: &MasonryConfig) -> MasonryResult<NonZeroUsize> {
        if let Some(columns) = self.columns {
            return Ok(columns);
        }
        let breakpoints =
            Breakpoints::from_config(&config.layout.breakpoints, config.layout.default_columns)?;
        Ok(breakpoints.columns_for(self.viewport_width))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutReport<'a> {
    container_width: f64,
    columns: usize,
    #[serde(flatten)]
    layout: &'a LayoutResult,
}

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Item")]
    id: String,
    #[tabled(rename = "Col")]
    column: usize,
    #[tabled(rename = "X")]
    x: String,
    #[tabled(rename = "Y")]
    y: String,
    #[tabled(rename = "Width")]
    width: String,
    #[tabled(rename = "Height")]
    height: String,
    #[tabled(rename = "Title")]
    title: String,
}

/// Runs `masonry layout`.
///
/// # Errors
///
/// Returns an error if the item file or the breakpoints are invalid.
pub fn execute(args: &LayoutArgs, config: &MasonryConfig) -> MasonryResult<()> {
    let items = load_items(&args.items, args.category.as_deref())?;
    let columns = args.resolve_columns(config)?;
    let params = LayoutParams {
        height_scale: config.layout.height_scale,
        fallback_height: config.layout.fallback_height,
    };
    let layout = compute_layout(&items, args.width, columns, &params);

    if args.json {
        print_json(&LayoutReport {
            container_width: args.width,
            columns: columns.get(),
            layout: &layout,
        });
        return Ok(());
    }

    print_layout(&items, &layout, columns);
    Ok(())
}

fn print_layout(items: &[Item], layout: &LayoutResult, columns: NonZeroUsize) {
    let rows: Vec<SlotRow> = layout
        .slots
        .iter()
        .enumerate()
        .map(|(index, slot)| SlotRow {
            index,
            id: slot.id.to_string(),
            column: slot.column,
            x: format_px(slot.rect.x),
            y: format_px(slot.rect.y),
            width: format_px(slot.rect.width),
            height: format_px(slot.rect.height),
            title: items
                .iter()
                .find(|item| item.id == slot.id)
                .and_then(|item| item.title.as_deref())
                .map(|title| truncate(title, 32))
                .unwrap_or_default(),
        })
        .collect();

    let title = format!(
        "Layout: {} columns, container height {}px, items",
        columns,
        format_px(layout.total_height)
    );
    print_table(&title, rows.len(), &mut Table::new(rows));
}

/// Arguments for `masonry categories`.
#[derive(Args, Debug, Clone)]
pub struct CategoriesArgs {
    /// Item file (JSONC array, or an object with an `items` array).
    #[arg(long, short, value_name = "FILE")]
    pub items: String,

    /// Output as JSON.
    #[arg(long, short)]
    pub json: bool,
}

#[derive(Serialize, Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Items")]
    count: usize,
}

/// Runs `masonry categories`: lists filter choices with item counts.
///
/// # Errors
///
/// Returns an error if the item file is invalid.
pub fn execute_categories(args: &CategoriesArgs) -> MasonryResult<()> {
    let items = load_items(&args.items, None)?;
    let rows: Vec<CategoryRow> = categories(&items)
        .into_iter()
        .map(|category| CategoryRow {
            count: crate::masonry::filter_by_category(&items, &category).len(),
            category,
        })
        .collect();

    if args.json {
        print_json(&rows);
    } else {
        print_table("Categories", rows.len(), &mut Table::new(rows));
    }
    Ok(())
}

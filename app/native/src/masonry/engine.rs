//! The stateful masonry engine.
//!
//! [`MasonryEngine`] owns the current item list, container and viewport
//! sizes, column count and layout, and turns every change into tween commands
//! for its [`AnimationDriver`]. All operations are synchronous and return the
//! number of commands that reached the driver; playback is never awaited.
//!
//! # Lifecycle
//!
//! ```text
//! new ──► mount(host) ──► set_items / on_*_resize / on_scroll / hover ... ──► teardown(host)
//!                                                                               │
//!                        every later call is a no-op ◄──────────────────────────┘
//! ```

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use super::debouncer::Debouncer;
use super::effects::animation::{EntryPlanner, SlotTransition, entry_origin};
use super::effects::{AnimationDriver, EffectExecutor, Layer, MasonryEffect, Property, Timing, TweenVars};
use super::host::{HostEvents, ListenerKind, Registrations};
use super::layout::{Breakpoints, LayoutParams, compute_layout};
use super::navigation::{ClickCallback, ClickOutcome, LinkOpener, SystemLinkOpener, handle_click};
use super::nodes::{ItemNodes, NodeRegistry};
use super::reveal::RevealTracker;
use super::state::{Item, ItemId, LayoutResult, LayoutSlot, Size, validate_items};
use crate::config::{AnimationConfig, BlurConfig, HoverConfig, MasonryConfig, RevealConfig};
use crate::error::MasonryResult;

/// What [`MasonryEngine::teardown`] released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownSummary {
    pub tweens_killed: usize,
    pub listeners_removed: usize,
}

/// Masonry layout engine driving an [`AnimationDriver`].
pub struct MasonryEngine<D: AnimationDriver> {
    // Configuration
    params: LayoutParams,
    breakpoints: Breakpoints,
    animation: AnimationConfig,
    hover: HoverConfig,
    blur: BlurConfig,
    reveal_config: RevealConfig,

    // Inputs
    items: Vec<Item>,
    container: Size,
    viewport: Size,
    columns: NonZeroUsize,
    layout: LayoutResult,

    // Per-item state
    nodes: NodeRegistry,
    mounted: HashSet<ItemId>,
    hovered: HashSet<ItemId>,
    reveal: RevealTracker,
    entry: EntryPlanner,

    // Plumbing
    executor: EffectExecutor<D>,
    resize: Debouncer<Size>,
    registrations: Registrations,
    click_callback: Option<ClickCallback>,
    opener: Box<dyn LinkOpener + Send>,
    media_ready: bool,
    torn_down: bool,
}

impl<D: AnimationDriver> MasonryEngine<D> {
    /// Creates an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `MasonryError::InvalidMediaQuery` if a breakpoint query does not parse.
    pub fn new(driver: D, config: &MasonryConfig) -> MasonryResult<Self> {
        let layout = &config.layout;
        let breakpoints = Breakpoints::from_config(&layout.breakpoints, layout.default_columns)?;
        let params = LayoutParams {
            height_scale: layout.height_scale,
            fallback_height: layout.fallback_height,
        };

        Ok(Self {
            params,
            breakpoints,
            animation: config.animation.clone(),
            hover: config.hover.clone(),
            blur: config.blur.clone(),
            reveal_config: config.reveal.clone(),
            items: Vec::new(),
            container: Size::default(),
            viewport: Size::default(),
            columns: layout.default_columns,
            layout: LayoutResult::empty(params.fallback_height),
            nodes: NodeRegistry::new(),
            mounted: HashSet::new(),
            hovered: HashSet::new(),
            reveal: RevealTracker::new(),
            entry: EntryPlanner::new(config.animation.entry_direction, config.animation.random_seed),
            executor: EffectExecutor::new(driver),
            resize: Debouncer::new(Duration::from_millis(layout.resize_debounce_ms)),
            registrations: Registrations::new(),
            click_callback: None,
            opener: Box::new(SystemLinkOpener),
            media_ready: !layout.await_media,
            torn_down: false,
        })
    }

    /// Installs the click callback.
    #[must_use]
    pub fn with_click_callback(mut self, callback: ClickCallback) -> Self {
        self.click_callback = Some(callback);
        self
    }

    /// Replaces the default URL opener.
    #[must_use]
    pub fn with_link_opener(mut self, opener: Box<dyn LinkOpener + Send>) -> Self {
        self.opener = opener;
        self
    }

    /// Installs or removes the click callback.
    pub fn set_click_callback(&mut self, callback: Option<ClickCallback>) { self.click_callback = callback; }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Registers the engine's listeners with the host.
    ///
    /// Calling it again while mounted does nothing.
    pub fn mount(&mut self, host: &mut dyn HostEvents) {
        if self.torn_down || !self.registrations.is_empty() {
            return;
        }

        self.registrations.register(host, ListenerKind::ContainerResize);
        self.registrations.register(host, ListenerKind::ViewportResize);
        self.registrations.register(host, ListenerKind::Scroll);
        let queries: Vec<String> = self.breakpoints.queries().map(|q| q.as_str().to_string()).collect();
        for query in queries {
            self.registrations.register(host, ListenerKind::MediaQuery(query));
        }

        tracing::debug!(listeners = self.registrations.len(), "masonry: mounted");
    }

    /// Kills every live tween, detaches every listener and forgets all state.
    ///
    /// The engine is inert afterwards: every later call is a no-op.
    pub fn teardown(&mut self, host: &mut dyn HostEvents) -> TeardownSummary {
        if self.torn_down {
            return TeardownSummary::default();
        }

        let summary = TeardownSummary {
            tweens_killed: self.executor.kill_all(),
            listeners_removed: self.registrations.release_all(host),
        };

        self.items.clear();
        self.layout = LayoutResult::empty(self.params.fallback_height);
        self.nodes.clear();
        self.mounted.clear();
        self.hovered.clear();
        self.reveal.clear();
        self.entry.clear();
        self.resize.clear();
        self.click_callback = None;
        self.torn_down = true;

        tracing::debug!(
            tweens = summary.tweens_killed,
            listeners = summary.listeners_removed,
            "masonry: torn down"
        );
        summary
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    /// Replaces the item list.
    ///
    /// An identical list changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `MasonryError::InvalidItem` if the list fails validation; the
    /// previous list stays in place.
    pub fn set_items(&mut self, items: Vec<Item>) -> MasonryResult<usize> {
        if self.torn_down {
            return Ok(0);
        }
        validate_items(&items)?;
        if items == self.items {
            return Ok(0);
        }

        self.items = items;
        Ok(self.relayout("items"))
    }

    /// Reports a new container size. Only a width change triggers a relayout.
    pub fn on_container_resize(&mut self, size: Size) -> usize {
        if self.torn_down {
            return 0;
        }
        let width_changed = (size.width - self.container.width).abs() > f64::EPSILON;
        self.container = size;
        if !width_changed {
            return 0;
        }
        self.relayout("container")
    }

    /// Reports a viewport size. Breakpoints are re-evaluated once resizes
    /// settle (see [`Self::tick`]), or at once when debouncing is off.
    pub fn on_viewport_resize(&mut self, size: Size, now: Instant) -> usize {
        if self.torn_down {
            return 0;
        }
        if self.resize.settle_time().is_zero() {
            return self.apply_viewport(size);
        }
        self.resize.update(size, now);
        0
    }

    /// Applies viewport resizes that have settled by `now`.
    pub fn tick(&mut self, now: Instant) -> usize {
        if self.torn_down {
            return 0;
        }
        self.resize.take_settled(now).map_or(0, |size| self.apply_viewport(size))
    }

    /// When the next pending viewport resize settles, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> { self.resize.next_deadline() }

    /// Sets the column count directly, for hosts that match media queries themselves.
    pub fn set_column_count(&mut self, columns: NonZeroUsize) -> usize {
        if self.torn_down || columns == self.columns {
            return 0;
        }
        tracing::debug!(from = self.columns.get(), to = columns.get(), "masonry: column count changed");
        self.columns = columns;
        self.relayout("columns")
    }

    /// Marks item media as loaded and applies the current layout.
    pub fn mark_media_ready(&mut self) -> usize {
        if self.torn_down || self.media_ready {
            return 0;
        }
        self.media_ready = true;
        tracing::debug!("masonry: media ready");
        self.apply_layout(None)
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Records the rendered nodes of an item and places it if a slot exists.
    pub fn on_node_mounted(&mut self, item: ItemId, nodes: ItemNodes) -> usize {
        if self.torn_down {
            return 0;
        }
        if let Some(previous) = self.nodes.register(item.clone(), nodes)
            && previous != nodes
        {
            self.executor.release(&previous);
            self.mounted.remove(&item);
        }

        if !self.media_ready || self.mounted.contains(&item) {
            return 0;
        }
        let Some((index, slot)) = self
            .layout
            .slots
            .iter()
            .enumerate()
            .find(|(_, slot)| slot.id == item)
            .map(|(index, slot)| (index, slot.clone()))
        else {
            return 0;
        };

        let effect = self.enter_effect(index, &slot);
        usize::from(self.issue_enter(&effect))
    }

    /// Releases everything tied to an item's nodes.
    pub fn on_node_unmounted(&mut self, item: &ItemId) -> usize {
        if self.torn_down {
            return 0;
        }
        let Some(nodes) = self.nodes.unregister(item) else {
            return 0;
        };

        let killed = self.executor.release(&nodes);
        self.mounted.remove(item);
        self.hovered.remove(item);
        self.reveal.forget(item);
        self.entry.forget(item);
        tracing::trace!(%item, killed, "masonry: node unmounted");
        killed
    }

    // ========================================================================
    // Pointer and scroll
    // ========================================================================

    /// Pointer entered an item.
    pub fn on_hover_enter(&mut self, item: &ItemId) -> usize {
        if self.torn_down || !self.hovered.insert(item.clone()) {
            return 0;
        }
        self.issue_hover(item, self.hover.scale, self.hover.overlay_opacity)
    }

    /// Pointer left an item.
    pub fn on_hover_leave(&mut self, item: &ItemId) -> usize {
        if self.torn_down || !self.hovered.remove(item) {
            return 0;
        }
        self.issue_hover(item, 1.0, 0.0)
    }

    /// Reports the container's top edge in viewport coordinates after a scroll.
    ///
    /// Reveals every rendered item whose top crossed the trigger line.
    pub fn on_scroll(&mut self, container_top: f64) -> usize {
        if self.torn_down || !self.reveal_config.enabled || !self.media_ready {
            return 0;
        }
        let nodes = &self.nodes;
        let batch = self.reveal.crossing(
            &self.layout,
            container_top,
            self.viewport.height,
            self.reveal_config.trigger_ratio,
            |id| nodes.contains(id),
        );
        self.issue_reveal(&batch)
    }

    /// Reveals items the host found intersecting on its own.
    ///
    /// Items already revealed, or without a node, are skipped.
    pub fn on_scroll_into_view(&mut self, items: &[ItemId]) -> usize {
        if self.torn_down || !self.reveal_config.enabled {
            return 0;
        }
        let batch: Vec<ItemId> = items
            .iter()
            .filter(|id| self.nodes.contains(id))
            .filter(|id| self.reveal.mark(id))
            .cloned()
            .collect();
        self.issue_reveal(&batch)
    }

    /// Dispatches a click on an item.
    ///
    /// # Errors
    ///
    /// Returns the link opener's error when opening the item URL fails.
    pub fn on_click(&mut self, item: &ItemId) -> MasonryResult<ClickOutcome> {
        if self.torn_down {
            return Ok(ClickOutcome::Ignored);
        }
        let Some(item) = self.items.iter().find(|candidate| &candidate.id == item) else {
            tracing::debug!(%item, "masonry: click on unknown item");
            return Ok(ClickOutcome::Ignored);
        };
        handle_click(item, self.click_callback.as_mut(), self.opener.as_mut())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub const fn layout(&self) -> &LayoutResult { &self.layout }

    #[must_use]
    pub fn items(&self) -> &[Item] { &self.items }

    #[must_use]
    pub const fn columns(&self) -> NonZeroUsize { self.columns }

    #[must_use]
    pub const fn container(&self) -> Size { self.container }

    #[must_use]
    pub const fn viewport(&self) -> Size { self.viewport }

    /// Whether the item's initial mount was issued.
    #[must_use]
    pub fn is_mounted(&self, item: &ItemId) -> bool { self.mounted.contains(item) }

    #[must_use]
    pub fn is_revealed(&self, item: &ItemId) -> bool { self.reveal.is_revealed(item) }

    #[must_use]
    pub const fn is_media_ready(&self) -> bool { self.media_ready }

    #[must_use]
    pub const fn is_torn_down(&self) -> bool { self.torn_down }

    /// Tweens the engine still tracks.
    #[must_use]
    pub fn live_tweens(&self) -> usize { self.executor.live_count() }

    /// Listeners registered with the host.
    #[must_use]
    pub fn listener_count(&self) -> usize { self.registrations.len() }

    #[must_use]
    pub const fn driver(&self) -> &D { self.executor.driver() }

    // ========================================================================
    // Internals
    // ========================================================================

    fn apply_viewport(&mut self, size: Size) -> usize {
        self.viewport = size;
        let columns = self.breakpoints.columns_for(size.width);
        self.set_column_count(columns)
    }

    fn relayout(&mut self, reason: &'static str) -> usize {
        let next = compute_layout(&self.items, self.container.width, self.columns, &self.params);
        let previous = std::mem::replace(&mut self.layout, next);

        if !self.media_ready {
            tracing::debug!(reason, slots = self.layout.len(), "masonry: layout computed, awaiting media");
            return 0;
        }

        let issued = self.apply_layout(Some(&previous));
        tracing::debug!(
            reason,
            columns = self.columns.get(),
            width = self.container.width,
            slots = self.layout.len(),
            total_height = self.layout.total_height,
            issued,
            "masonry: relayout"
        );
        issued
    }

    /// Issues enter tweens for unmounted items and move tweens for mounted
    /// ones whose slot changed since `previous`.
    fn apply_layout(&mut self, previous: Option<&LayoutResult>) -> usize {
        let slots: Vec<(usize, LayoutSlot)> =
            self.layout.slots.iter().cloned().enumerate().collect();
        let mut issued = 0;

        for (index, slot) in slots {
            if !self.nodes.contains(&slot.id) {
                tracing::trace!(item = %slot.id, "masonry: no node yet, skipping");
                continue;
            }

            if !self.mounted.contains(&slot.id) {
                let effect = self.enter_effect(index, &slot);
                issued += usize::from(self.issue_enter(&effect));
                continue;
            }

            if let Some(old) = previous.and_then(|layout| layout.slot(&slot.id)) {
                let transition = SlotTransition::new(slot.id.clone(), old.rect, slot.rect);
                if transition.is_noop() {
                    continue;
                }
                tracing::trace!(
                    item = %slot.id,
                    distance = transition.max_distance(),
                    resize = transition.involves_resize(),
                    "masonry: moving"
                );
            }

            let effect = MasonryEffect::Move {
                item: slot.id.clone(),
                to: TweenVars::frame(&slot.rect),
                timing: Timing::new(self.animation.duration, self.animation.easing),
            };
            issued += usize::from(self.executor.execute(&self.nodes, &effect).is_some());
        }

        issued
    }

    #[allow(clippy::cast_precision_loss)]
    fn enter_effect(&mut self, index: usize, slot: &LayoutSlot) -> MasonryEffect {
        let direction = self.entry.direction_for(&slot.id);
        let container = Size::new(self.container.width, self.layout.total_height);
        let (x, y) = entry_origin(direction, &slot.rect, self.viewport, container);

        let mut from = TweenVars::new()
            .with(Property::X, x)
            .with(Property::Y, y)
            .with(Property::Width, slot.rect.width)
            .with(Property::Height, slot.rect.height)
            .with(Property::Opacity, 0.0);
        let mut to = TweenVars::frame(&slot.rect).with(Property::Opacity, 1.0);
        if self.blur.enabled {
            from.set(Property::Blur, self.blur.pixels);
            to.set(Property::Blur, 0.0);
        }

        MasonryEffect::Enter {
            item: slot.id.clone(),
            from,
            to,
            timing: Timing::new(self.animation.initial_duration, self.animation.initial_easing)
                .delayed(index as f64 * self.animation.stagger),
        }
    }

    fn issue_enter(&mut self, effect: &MasonryEffect) -> bool {
        if self.executor.execute(&self.nodes, effect).is_none() {
            return false;
        }
        self.mounted.insert(effect.item().clone());
        true
    }

    fn issue_hover(&mut self, item: &ItemId, scale: f64, overlay_opacity: f64) -> usize {
        let timing = Timing::new(self.hover.duration, self.hover.easing);
        let mut effects = Vec::with_capacity(2);
        if self.hover.scale_enabled {
            effects.push(MasonryEffect::Hover {
                item: item.clone(),
                layer: Layer::Item,
                to: TweenVars::new().with(Property::Scale, scale),
                timing,
            });
        }
        if self.hover.color_shift_enabled {
            effects.push(MasonryEffect::Hover {
                item: item.clone(),
                layer: Layer::Overlay,
                to: TweenVars::new().with(Property::OverlayOpacity, overlay_opacity),
                timing,
            });
        }
        self.executor.execute_batch(&self.nodes, &effects)
    }

    #[allow(clippy::cast_precision_loss)]
    fn issue_reveal(&mut self, batch: &[ItemId]) -> usize {
        if batch.is_empty() {
            return 0;
        }
        let config = &self.reveal_config;
        let timing = Timing::new(config.duration, config.easing);
        let effects: Vec<MasonryEffect> = batch
            .iter()
            .enumerate()
            .map(|(index, item)| MasonryEffect::Reveal {
                item: item.clone(),
                from: TweenVars::new()
                    .with(Property::RevealOpacity, 0.0)
                    .with(Property::OffsetY, config.offset),
                to: TweenVars::new()
                    .with(Property::RevealOpacity, 1.0)
                    .with(Property::OffsetY, 0.0),
                timing: timing.delayed(index as f64 * config.batch_stagger),
            })
            .collect();

        let issued = self.executor.execute_batch(&self.nodes, &effects);
        tracing::debug!(batch = batch.len(), issued, "masonry: reveal");
        issued
    }
}

impl<D: AnimationDriver> std::fmt::Debug for MasonryEngine<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasonryEngine")
            .field("items", &self.items.len())
            .field("container", &self.container)
            .field("viewport", &self.viewport)
            .field("columns", &self.columns)
            .field("mounted", &self.mounted.len())
            .field("media_ready", &self.media_ready)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

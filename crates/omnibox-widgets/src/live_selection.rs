#![forbid(unsafe_code)]

//! Selection over a live, virtualized item container.
//!
//! The container owns the item count and only realizes views for part of the
//! list at any time. An index is selectable only while its view is realized
//! and focusable, so navigation never lands on an item the container cannot
//! show.
//!
//! Because navigation stops at the first unrealized index, every selection
//! asks the container to realize a few items beyond it in the direction of
//! travel. That keeps repeated next/previous presses moving through a list
//! that scrolls as they go.
//!
//! # Invariants
//!
//! 1. Materialization requests stay inside `[0, item_count - 1]`.
//! 2. Requests are advisory; nothing is assumed about their effect.
//! 3. Deselection never requests materialization.
//! 4. The first selection after the list is parked counts as moving forward.

use omnibox_core::config::DEFAULT_PREFETCH_DISTANCE;
use omnibox_core::{SelectionConfig, SelectionController, SelectionHost, SelectionMode};

/// A container of item views, of which only some are realized at a time.
pub trait ItemContainer {
    /// Total number of items, realized or not.
    fn item_count(&self) -> usize;

    /// Whether a view currently exists for `index`.
    fn is_realized(&self, index: usize) -> bool;

    /// Whether the realized view at `index` accepts focus.
    fn is_focusable(&self, index: usize) -> bool;

    /// Apply the selected state to the realized view at `index`.
    fn set_item_selected(&mut self, index: usize, selected: bool);

    /// Ask the container to realize views up to (or down to) `index`.
    fn ensure_materialized(&mut self, index: usize);
}

/// [`SelectionHost`] adapter for an [`ItemContainer`].
#[derive(Debug)]
pub struct LiveContainerHost<C> {
    container: C,
    prefetch_distance: usize,
    /// Last index that held or lost the selection, for travel direction.
    /// Cleared when the selection parks.
    last_index: Option<usize>,
}

impl<C: ItemContainer> LiveContainerHost<C> {
    /// Wrap `container`, prefetching the default number of items.
    pub fn new(container: C) -> Self {
        Self {
            container,
            prefetch_distance: DEFAULT_PREFETCH_DISTANCE,
            last_index: None,
        }
    }

    /// Set how many items past the selection are realized (builder).
    #[must_use]
    pub fn with_prefetch_distance(mut self, prefetch_distance: usize) -> Self {
        self.prefetch_distance = prefetch_distance;
        self
    }

    /// Shared access to the container.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutable access to the container.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    fn expose_neighbours(&mut self, index: usize) {
        let count = self.container.item_count();
        if count == 0 {
            return;
        }
        let last = count - 1;
        let moving_backward = self.last_index.is_some_and(|previous| previous > index);
        let target = if moving_backward {
            index.saturating_sub(self.prefetch_distance)
        } else {
            index.saturating_add(self.prefetch_distance).min(last)
        };
        omnibox_core::trace!(index, target, moving_backward, "requesting materialization");
        self.container.ensure_materialized(target);
    }
}

impl<C: ItemContainer> SelectionHost for LiveContainerHost<C> {
    fn item_count(&self) -> usize {
        self.container.item_count()
    }

    fn is_selectable_item(&self, index: usize) -> bool {
        self.container.is_realized(index) && self.container.is_focusable(index)
    }

    fn set_item_state(&mut self, index: usize, selected: bool) {
        if self.container.is_realized(index) {
            self.container.set_item_selected(index, selected);
        }
        if selected {
            self.expose_neighbours(index);
        }
        self.last_index = Some(index);
    }

    fn on_parked(&mut self) {
        self.last_index = None;
    }
}

/// Selection controller for a live container.
pub type LiveSelection<C> = SelectionController<LiveContainerHost<C>>;

/// Create a parked [`LiveSelection`] over `container`.
pub fn live_selection<C: ItemContainer>(mode: SelectionMode, container: C) -> LiveSelection<C> {
    SelectionController::new(mode, LiveContainerHost::new(container))
}

/// Create a parked [`LiveSelection`] with mode, fallback position and
/// prefetch distance taken from `config`.
pub fn live_selection_from_config<C: ItemContainer>(
    config: &SelectionConfig,
    container: C,
) -> LiveSelection<C> {
    let host = LiveContainerHost::new(container).with_prefetch_distance(config.prefetch_distance);
    SelectionController::new(config.mode, host).with_default_position(config.default_position)
}

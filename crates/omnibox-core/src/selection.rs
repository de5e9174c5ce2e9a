#![forbid(unsafe_code)]

//! Selection tracking for bounded, resizable lists.
//!
//! [`SelectionController`] owns the selected position of a list whose length
//! can change at any time, and drives keyboard-style navigation over it. What
//! the list *is* stays outside: a [`SelectionHost`] supplies the item count,
//! decides which indices may be selected, and receives a notification for
//! every selection change.
//!
//! # Invariants
//!
//! 1. An empty list is always parked (no selection).
//! 2. A non-parked position is `< item_count` and selectable by the host.
//! 3. Every position change notifies `set_item_state(old, false)` (unless the
//!    old position was parked), then `set_item_state(new, true)` (unless the
//!    new position is parked). Nothing is notified when the position does not
//!    change.
//!
//! # Failure Modes
//!
//! - Navigation over a list with no selectable item returns `false` after a
//!   single bounded scan and leaves the selection parked.
//! - Out-of-range or unselectable direct positions are rejected without side
//!   effects; see [`SelectionController::try_set_position`].

use std::fmt;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Boundary policy applied when navigation runs off either end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectionMode {
    /// Stop at the first/last selectable item.
    #[default]
    Saturating,
    /// Wrap around to the first selectable item from the opposite end.
    Looping,
}

impl SelectionMode {
    /// Parse a mode name (`saturating` | `looping`), case-insensitive.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "saturating" | "saturate" | "clamp" => Some(Self::Saturating),
            "looping" | "loop" | "wrap" => Some(Self::Looping),
            _ => None,
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saturating => f.write_str("saturating"),
            Self::Looping => f.write_str("looping"),
        }
    }
}

/// Why a direct position request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// The index is not below the current item count.
    OutOfRange { index: usize, item_count: usize },
    /// The index is in range but the host reports it as not selectable.
    NotSelectable { index: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, item_count } => {
                write!(f, "index {index} out of range for {item_count} items")
            }
            Self::NotSelectable { index } => write!(f, "item {index} is not selectable"),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Hooks a list owner supplies to a [`SelectionController`].
pub trait SelectionHost {
    /// Current number of items. Source of truth for the valid index range.
    fn item_count(&self) -> usize;

    /// Whether the item at `index` may hold the selection.
    ///
    /// Only called for `index < item_count()`.
    fn is_selectable_item(&self, _index: usize) -> bool {
        true
    }

    /// Apply a selection change to the item at `index`.
    fn set_item_state(&mut self, index: usize, selected: bool);

    /// Record a new item count pushed by the list owner.
    ///
    /// Hosts that derive their count from a live container ignore this and
    /// keep reporting the container's count.
    fn store_item_count(&mut self, _count: usize) {}

    /// The selection was parked. Called after the deselect notification.
    fn on_parked(&mut self) {}
}

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

// ---------------------------------------------------------------------------
// SelectionController
// ---------------------------------------------------------------------------

/// Selection state machine over a host-defined list.
///
/// States are `Parked` (`position() == None`) and `SelectedAt(i)`. There is no
/// terminal state; the controller lives as long as its owner.
#[derive(Debug)]
pub struct SelectionController<H> {
    host: H,
    mode: SelectionMode,
    position: Option<usize>,
    item_count: usize,
    default_position: Option<usize>,
}

impl<H: SelectionHost> SelectionController<H> {
    /// Create a parked controller over `host`.
    #[must_use]
    pub fn new(mode: SelectionMode, host: H) -> Self {
        let item_count = host.item_count();
        Self {
            host,
            mode,
            position: None,
            item_count,
            default_position: None,
        }
    }

    /// Set where the selection snaps when its position becomes invalid and no
    /// nearby item can take it over (builder). `None` parks instead.
    #[must_use]
    pub fn with_default_position(mut self, default_position: Option<usize>) -> Self {
        self.default_position = default_position;
        self
    }

    /// Current position, `None` when parked.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Whether nothing is selected.
    #[inline]
    #[must_use]
    pub fn is_parked(&self) -> bool {
        self.position.is_none()
    }

    /// Item count as of the last reconciliation.
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Active boundary policy.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the boundary policy. The current position is unaffected.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// Fallback position used by [`set_item_count`](Self::set_item_count).
    #[must_use]
    pub fn default_position(&self) -> Option<usize> {
        self.default_position
    }

    /// Change the fallback position.
    pub fn set_default_position(&mut self, default_position: Option<usize>) {
        self.default_position = default_position;
    }

    /// Shared access to the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    ///
    /// Call [`sync_item_count`](Self::sync_item_count) afterwards if the
    /// mutation changed the count or selectability.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the controller and return its host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Update the number of items and reconcile the selection with it.
    ///
    /// The current index is kept while it is still valid and selectable. A
    /// position past the new end moves to the last selectable item at or
    /// before the end. Otherwise the selection snaps to the default position
    /// (clamped into range) when that item is selectable, and parks if not.
    /// An empty list always parks.
    pub fn set_item_count(&mut self, count: usize) {
        self.host.store_item_count(count);
        self.sync_item_count();
    }

    /// Re-read the host's item count and reconcile the selection with it.
    pub fn sync_item_count(&mut self) {
        self.item_count = self.host.item_count();
        let target = self.reconciled_position();
        self.move_to(target);
    }

    /// Select the next selectable item.
    ///
    /// A parked selection moves to the first selectable item. The host's count
    /// is re-read first: if the selected index fell off the end, the selection
    /// moves to the last selectable item instead, and if the selected item
    /// became unselectable, the scan still starts after it. Returns `true` iff
    /// the position changed.
    pub fn select_next_item(&mut self) -> bool {
        self.navigate(Direction::Forward)
    }

    /// Select the previous selectable item.
    ///
    /// A parked selection moves to the last selectable item. Out-of-band count
    /// and selectability changes are handled as in
    /// [`select_next_item`](Self::select_next_item). Returns `true` iff the
    /// position changed.
    pub fn select_previous_item(&mut self) -> bool {
        self.navigate(Direction::Backward)
    }

    /// Set the position directly; `None` parks.
    ///
    /// Returns `false` (and changes nothing) when the index is out of range or
    /// not selectable. Setting the current position again is accepted and
    /// notifies nothing.
    pub fn set_position(&mut self, index: Option<usize>) -> bool {
        self.try_set_position(index).is_ok()
    }

    /// Like [`set_position`](Self::set_position), reporting why a request was
    /// rejected.
    pub fn try_set_position(&mut self, index: Option<usize>) -> Result<(), SelectionError> {
        if let Some(index) = index {
            if index >= self.item_count {
                crate::trace!(index, item_count = self.item_count, "position rejected: out of range");
                return Err(SelectionError::OutOfRange {
                    index,
                    item_count: self.item_count,
                });
            }
            if !self.host.is_selectable_item(index) {
                crate::trace!(index, "position rejected: not selectable");
                return Err(SelectionError::NotSelectable { index });
            }
        }
        self.move_to(index);
        Ok(())
    }

    /// Park the selection unconditionally.
    ///
    /// Used when the owning list is torn down or rebuilt. The previously
    /// selected item, if any, is notified as deselected.
    pub fn reset(&mut self) {
        self.move_to(None);
    }

    // -- internals --------------------------------------------------------

    fn is_candidate(&self, index: usize) -> bool {
        index < self.item_count && self.host.is_selectable_item(index)
    }

    fn reconciled_position(&self) -> Option<usize> {
        let count = self.item_count;
        if count == 0 {
            return None;
        }
        let current = self.position?;
        if self.is_candidate(current) {
            return Some(current);
        }
        if current >= count
            && let Some(last) = self.scan_from(count - 1, Direction::Backward)
        {
            return Some(last);
        }
        self.default_position
            .map(|index| index.min(count - 1))
            .filter(|&index| self.host.is_selectable_item(index))
    }

    /// First selectable index starting at `start` (inclusive), moving in
    /// `direction`, without wrapping.
    fn scan_from(&self, start: usize, direction: Direction) -> Option<usize> {
        if start >= self.item_count {
            return None;
        }
        match direction {
            Direction::Forward => {
                (start..self.item_count).find(|&index| self.host.is_selectable_item(index))
            }
            Direction::Backward => (0..=start)
                .rev()
                .find(|&index| self.host.is_selectable_item(index)),
        }
    }

    fn navigate(&mut self, direction: Direction) -> bool {
        let before = self.position;
        self.item_count = self.host.item_count();

        let target = match before {
            // The list shrank under the selection: clamping back into range is
            // this step.
            Some(current) if current >= self.item_count => self.reconciled_position(),
            _ => match self.step(before, direction) {
                Some(index) => Some(index),
                None if before.is_some_and(|current| !self.is_candidate(current)) => {
                    self.reconciled_position()
                }
                None => before,
            },
        };

        self.move_to(target);
        self.position != before
    }

    /// Next selectable index after `anchor` in `direction`, honoring the
    /// boundary policy. `anchor` itself need not be selectable.
    fn step(&self, anchor: Option<usize>, direction: Direction) -> Option<usize> {
        let count = self.item_count;
        if count == 0 {
            return None;
        }
        let from_boundary = |controller: &Self| match direction {
            Direction::Forward => controller.scan_from(0, direction),
            Direction::Backward => controller.scan_from(count - 1, direction),
        };
        let Some(current) = anchor else {
            return from_boundary(self);
        };
        let ahead = match direction {
            Direction::Forward => current
                .checked_add(1)
                .and_then(|next| self.scan_from(next, direction)),
            Direction::Backward => current
                .checked_sub(1)
                .and_then(|prev| self.scan_from(prev, direction)),
        };
        match (ahead, self.mode) {
            (Some(index), _) => Some(index),
            (None, SelectionMode::Saturating) => None,
            (None, SelectionMode::Looping) => from_boundary(self).filter(|&index| index != current),
        }
    }

    fn move_to(&mut self, target: Option<usize>) {
        if target == self.position {
            return;
        }
        let previous = self.position;
        self.position = target;
        crate::debug!(?previous, position = ?target, item_count = self.item_count, "selection moved");
        if let Some(old) = previous {
            self.host.set_item_state(old, false);
        }
        match target {
            Some(new) => self.host.set_item_state(new, true),
            None => self.host.on_parked(),
        }
    }
}

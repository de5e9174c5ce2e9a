#![forbid(unsafe_code)]

//! Selection over a list with a caller-managed item count.
//!
//! The owner pushes the count through [`SelectionController::set_item_count`]
//! and receives every `(index, selected)` change through a plain callback.
//! Every index in range is selectable.

use std::fmt;

use omnibox_core::{SelectionConfig, SelectionController, SelectionHost, SelectionMode};

/// Host holding a cached item count and a selection-change callback.
pub struct FixedCountHost<F> {
    count: usize,
    on_item_state: F,
}

impl<F> fmt::Debug for FixedCountHost<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedCountHost")
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl<F: FnMut(usize, bool)> FixedCountHost<F> {
    /// Create a host with `count` items reporting changes to `on_item_state`.
    pub fn new(count: usize, on_item_state: F) -> Self {
        Self {
            count,
            on_item_state,
        }
    }
}

impl<F: FnMut(usize, bool)> SelectionHost for FixedCountHost<F> {
    fn item_count(&self) -> usize {
        self.count
    }

    fn set_item_state(&mut self, index: usize, selected: bool) {
        (self.on_item_state)(index, selected);
    }

    fn store_item_count(&mut self, count: usize) {
        self.count = count;
    }
}

/// Selection controller for a caller-sized list.
pub type ListSelection<F> = SelectionController<FixedCountHost<F>>;

/// Create a parked [`ListSelection`] over `count` items.
pub fn list_selection<F: FnMut(usize, bool)>(
    mode: SelectionMode,
    count: usize,
    on_item_state: F,
) -> ListSelection<F> {
    SelectionController::new(mode, FixedCountHost::new(count, on_item_state))
}

/// Create a parked [`ListSelection`] with mode and fallback position taken
/// from `config`.
pub fn list_selection_from_config<F: FnMut(usize, bool)>(
    config: &SelectionConfig,
    count: usize,
    on_item_state: F,
) -> ListSelection<F> {
    list_selection(config.mode, count, on_item_state).with_default_position(config.default_position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(usize, bool)>>>;

    fn recording(mode: SelectionMode, count: usize) -> (ListSelection<impl FnMut(usize, bool)>, Log) {
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        let selection = list_selection(mode, count, move |index, selected| {
            sink.borrow_mut().push((index, selected));
        });
        (selection, log)
    }

    #[test]
    fn callback_receives_transitions_in_order() {
        let (mut selection, log) = recording(SelectionMode::Saturating, 3);
        selection.select_next_item();
        selection.select_next_item();
        selection.select_previous_item();
        assert_eq!(
            *log.borrow(),
            vec![(0, true), (0, false), (1, true), (1, false), (0, true)]
        );
    }

    #[test]
    fn zero_items_parks_without_error() {
        let (mut selection, log) = recording(SelectionMode::Saturating, 0);
        selection.set_item_count(0);
        assert!(selection.is_parked());
        assert!(!selection.select_next_item());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn growing_from_empty_enables_navigation() {
        let (mut selection, _log) = recording(SelectionMode::Saturating, 0);
        selection.set_item_count(2);
        assert!(selection.select_next_item());
        assert_eq!(selection.position(), Some(0));
        assert_eq!(selection.item_count(), 2);
    }

    #[test]
    fn shrink_reset_notifies_once_each() {
        let (mut selection, log) = recording(SelectionMode::Saturating, 5);
        assert!(selection.set_position(Some(4)));
        log.borrow_mut().clear();
        selection.set_item_count(2);
        assert_eq!(selection.position(), Some(1));
        assert_eq!(*log.borrow(), vec![(4, false), (1, true)]);
    }

    #[test]
    fn looping_list_wraps() {
        let (mut selection, _log) = recording(SelectionMode::Looping, 2);
        selection.select_next_item();
        selection.select_next_item();
        assert!(selection.select_next_item());
        assert_eq!(selection.position(), Some(0));
    }

    #[test]
    fn config_sets_mode_and_fallback() {
        let config = SelectionConfig {
            mode: SelectionMode::Looping,
            default_position: Some(1),
            ..SelectionConfig::default()
        };
        let mut selection = list_selection_from_config(&config, 3, |_, _| {});
        assert_eq!(selection.mode(), SelectionMode::Looping);
        assert!(selection.select_previous_item());
        assert_eq!(selection.position(), Some(2));
        assert_eq!(selection.default_position(), Some(1));
    }

    #[test]
    fn debug_output_hides_callback() {
        let host = FixedCountHost::new(4, |_, _| {});
        assert!(format!("{host:?}").contains("count: 4"));
    }
}

//! End-to-end scenarios for the suggestion dropdown: selection over a fixed
//! list, selection over a virtualized container, and keyboard-synced entry.

use std::cell::RefCell;
use std::rc::Rc;

use std::time::Duration;

use omnibox_core::{AnimationConfig, AnimationMode, OmniboxConfig, SelectionMode};
use omnibox_widgets::{
    AnimationHost, AnimationOutput, EntryAnimation, ImeSyncedAnimationDriver, InsetAnimation,
    InsetTypes, ItemContainer, RunningAnimation, SuggestionsListAnimationDriver, list_selection,
    list_selection_from_config, live_selection_from_config,
};

type Log = Rc<RefCell<Vec<(usize, bool)>>>;

fn recorder() -> (Log, impl FnMut(usize, bool)) {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    (log, move |index, selected| {
        sink.borrow_mut().push((index, selected))
    })
}

// ============================================================================
// Fixed-count selection
// ============================================================================

#[test]
fn saturation_sequence() {
    let (_log, callback) = recorder();
    let mut selection = list_selection(SelectionMode::Saturating, 3, callback);
    let results: Vec<_> = (0..4)
        .map(|_| (selection.select_next_item(), selection.position()))
        .collect();
    assert_eq!(
        results,
        vec![
            (true, Some(0)),
            (true, Some(1)),
            (true, Some(2)),
            (false, Some(2))
        ]
    );
}

#[test]
fn shrink_reset_and_grow_preserve() {
    let (log, callback) = recorder();
    let mut selection = list_selection(SelectionMode::Saturating, 5, callback);
    assert!(selection.set_position(Some(4)));
    log.borrow_mut().clear();

    selection.set_item_count(2);
    assert_eq!(selection.position(), Some(1));
    assert_eq!(*log.borrow(), vec![(4, false), (1, true)]);

    assert!(selection.set_position(Some(0)));
    log.borrow_mut().clear();
    selection.set_item_count(5);
    assert_eq!(selection.position(), Some(0));
    assert!(log.borrow().is_empty());
}

#[test]
fn config_drives_selection_mode_and_fallback() {
    let mut config = OmniboxConfig::default();
    config.selection.mode = SelectionMode::Looping;
    config.selection.default_position = Some(0);

    let (_log, callback) = recorder();
    let mut selection = list_selection_from_config(&config.selection, 3, callback);
    selection.select_previous_item();
    assert_eq!(selection.position(), Some(2));
    selection.select_next_item();
    assert_eq!(selection.position(), Some(0));
    assert_eq!(selection.default_position(), Some(0));
}

// ============================================================================
// Live container selection
// ============================================================================

/// Virtualized list realizing `window` items at a time, growing on request.
#[derive(Debug)]
struct Recycler {
    count: usize,
    realized_end: usize,
    selected: Option<usize>,
}

impl ItemContainer for Recycler {
    fn item_count(&self) -> usize {
        self.count
    }

    fn is_realized(&self, index: usize) -> bool {
        index < self.realized_end
    }

    fn is_focusable(&self, _index: usize) -> bool {
        true
    }

    fn set_item_selected(&mut self, index: usize, selected: bool) {
        if selected {
            self.selected = Some(index);
        } else if self.selected == Some(index) {
            self.selected = None;
        }
    }

    fn ensure_materialized(&mut self, index: usize) {
        self.realized_end = self.realized_end.max(index + 1).min(self.count);
    }
}

#[test]
fn live_selection_walks_whole_virtualized_list() {
    let config = OmniboxConfig::default();
    let recycler = Recycler {
        count: 12,
        realized_end: 2,
        selected: None,
    };
    let mut selection = live_selection_from_config(&config.selection, recycler);

    let mut steps = 0;
    while selection.select_next_item() {
        steps += 1;
    }
    assert_eq!(steps, 12);
    assert_eq!(selection.position(), Some(11));
    assert_eq!(selection.host().container().selected, Some(11));

    while selection.select_previous_item() {}
    assert_eq!(selection.position(), Some(0));
}

// ============================================================================
// Keyboard-synced entry animation
// ============================================================================

#[derive(Debug, Default)]
struct ListView {
    visible: bool,
    listening: bool,
    anchor_translation: f32,
    output: Option<AnimationOutput>,
}

impl AnimationHost for ListView {
    fn register_progress_listener(&mut self) {
        self.listening = true;
    }

    fn unregister_progress_listener(&mut self) {
        self.listening = false;
    }

    fn reveal(&mut self) {
        self.visible = true;
    }

    fn external_translation(&self) -> f32 {
        self.anchor_translation
    }

    fn apply(&mut self, output: AnimationOutput) {
        self.output = Some(output);
    }
}

#[test]
fn keyboard_synced_entry() {
    let config = AnimationConfig {
        starting_offset: 20.0,
        ..AnimationConfig::default()
    };
    let mut driver = ImeSyncedAnimationDriver::new(ListView::default(), &config);
    driver.on_controllable_insets_changed(InsetTypes::IME);
    driver.host_mut().anchor_translation = 200.0;

    let keyboard = InsetAnimation::new(1, InsetTypes::IME);
    let bars = InsetAnimation::new(2, InsetTypes::NAVIGATION_BARS);

    driver.on_session_state_change(true);
    assert!(driver.host().listening);
    assert!(!driver.host().visible);

    driver.on_prepare(bars);
    driver.on_prepare(keyboard);
    assert!(driver.host().visible);

    driver.on_progress(&[
        RunningAnimation {
            animation: bars,
            fraction: 0.9,
        },
        RunningAnimation {
            animation: keyboard,
            fraction: 0.4,
        },
    ]);
    let output = driver.host().output.unwrap();
    assert!((output.alpha - 0.4).abs() < 1e-5);
    assert!((output.translation - 212.0).abs() < 1e-4);

    driver.on_end(bars);
    assert!(driver.is_active());

    driver.host_mut().anchor_translation = 55.0;
    driver.on_end(keyboard);
    assert_eq!(driver.host().output, Some(AnimationOutput::RESTING));
    assert!(!driver.host().listening);

    driver.on_progress(&[RunningAnimation {
        animation: keyboard,
        fraction: 0.8,
    }]);
    assert_eq!(driver.host().output, Some(AnimationOutput::RESTING));
}

#[test]
fn configured_unsynced_entry_runs_on_frame_ticks() {
    let mut config = OmniboxConfig::default();
    config.animation.mode = AnimationMode::Unsynced;
    config.animation.duration_ms = 120;

    let mut animation = EntryAnimation::from_config(ListView::default(), &config.animation);
    assert!(animation.is_animation_enabled());
    animation.on_session_state_change(true);
    assert!(animation.host().unwrap().visible);

    let mut frames = 0;
    while animation.is_active() {
        animation.tick(Duration::from_millis(16));
        frames += 1;
    }
    assert_eq!(frames, 8);
    assert_eq!(animation.host().unwrap().output, Some(AnimationOutput::RESTING));
}

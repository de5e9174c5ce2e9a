#![forbid(unsafe_code)]

//! Omnibox suggestion-list widgets: selection variants and entry animation
//! drivers built on `omnibox-core`.

pub mod animation_driver;
pub mod entry_animation;
pub mod list_selection;
pub mod live_selection;
pub mod unsynced_animation;

pub use animation_driver::{
    AnimationHost, AnimationId, AnimationOutput, ImeSyncedAnimationDriver, InsetAnimation,
    InsetTypes, RunningAnimation, SuggestionsListAnimationDriver,
};
pub use entry_animation::EntryAnimation;
pub use list_selection::{FixedCountHost, ListSelection, list_selection, list_selection_from_config};
pub use live_selection::{
    ItemContainer, LiveContainerHost, LiveSelection, live_selection, live_selection_from_config,
};
pub use unsynced_animation::{DisabledAnimationDriver, UnsyncedAnimationDriver};

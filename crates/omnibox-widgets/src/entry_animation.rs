#![forbid(unsafe_code)]

//! Entry animation chosen by configuration.
//!
//! [`EntryAnimation`] holds whichever driver [`AnimationConfig::mode`] names, so
//! the list owner can route every platform callback to one value. Callbacks
//! that do not apply to the held driver are ignored: keyboard inset events
//! only reach the IME-synced driver, frame ticks only reach the unsynced one.

use std::time::Duration;

use omnibox_core::{AnimationConfig, AnimationMode};

use crate::animation_driver::{
    AnimationHost, ImeSyncedAnimationDriver, InsetAnimation, InsetTypes, RunningAnimation,
    SuggestionsListAnimationDriver,
};
use crate::unsynced_animation::{DisabledAnimationDriver, UnsyncedAnimationDriver};

/// One of the suggestion-list animation drivers.
#[derive(Debug)]
pub enum EntryAnimation<H> {
    Disabled(DisabledAnimationDriver),
    ImeSynced(ImeSyncedAnimationDriver<H>),
    Unsynced(UnsyncedAnimationDriver<H>),
}

impl<H: AnimationHost> EntryAnimation<H> {
    /// Build the driver `config.mode` selects.
    ///
    /// A disabled animation drops `host`; the owner reveals the list itself
    /// whenever [`is_animation_enabled`] is `false`.
    ///
    /// [`is_animation_enabled`]: SuggestionsListAnimationDriver::is_animation_enabled
    pub fn from_config(host: H, config: &AnimationConfig) -> Self {
        omnibox_core::debug!(mode = %config.mode, "entry animation selected");
        match config.mode {
            AnimationMode::Disabled => Self::Disabled(DisabledAnimationDriver),
            AnimationMode::ImeSynced => Self::ImeSynced(ImeSyncedAnimationDriver::new(host, config)),
            AnimationMode::Unsynced => Self::Unsynced(UnsyncedAnimationDriver::new(host, config)),
        }
    }

    /// Mode of the held driver.
    #[must_use]
    pub fn mode(&self) -> AnimationMode {
        match self {
            Self::Disabled(_) => AnimationMode::Disabled,
            Self::ImeSynced(_) => AnimationMode::ImeSynced,
            Self::Unsynced(_) => AnimationMode::Unsynced,
        }
    }

    /// Shared access to the host, unless the animation is disabled.
    pub fn host(&self) -> Option<&H> {
        match self {
            Self::Disabled(_) => None,
            Self::ImeSynced(driver) => Some(driver.host()),
            Self::Unsynced(driver) => Some(driver.host()),
        }
    }

    /// Mutable access to the host, unless the animation is disabled.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        match self {
            Self::Disabled(_) => None,
            Self::ImeSynced(driver) => Some(driver.host_mut()),
            Self::Unsynced(driver) => Some(driver.host_mut()),
        }
    }

    pub fn on_controllable_insets_changed(&mut self, types: InsetTypes) {
        if let Self::ImeSynced(driver) = self {
            driver.on_controllable_insets_changed(types);
        }
    }

    pub fn on_prepare(&mut self, animation: InsetAnimation) {
        if let Self::ImeSynced(driver) = self {
            driver.on_prepare(animation);
        }
    }

    pub fn on_progress(&mut self, running: &[RunningAnimation]) {
        if let Self::ImeSynced(driver) = self {
            driver.on_progress(running);
        }
    }

    pub fn on_end(&mut self, animation: InsetAnimation) {
        if let Self::ImeSynced(driver) = self {
            driver.on_end(animation);
        }
    }

    /// Frame tick.
    pub fn tick(&mut self, dt: Duration) {
        if let Self::Unsynced(driver) = self {
            driver.tick(dt);
        }
    }
}

impl<H: AnimationHost> SuggestionsListAnimationDriver for EntryAnimation<H> {
    fn on_session_state_change(&mut self, active: bool) {
        match self {
            Self::Disabled(driver) => driver.on_session_state_change(active),
            Self::ImeSynced(driver) => driver.on_session_state_change(active),
            Self::Unsynced(driver) => driver.on_session_state_change(active),
        }
    }

    fn is_animation_enabled(&self) -> bool {
        match self {
            Self::Disabled(driver) => driver.is_animation_enabled(),
            Self::ImeSynced(driver) => driver.is_animation_enabled(),
            Self::Unsynced(driver) => driver.is_animation_enabled(),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Self::Disabled(driver) => driver.is_active(),
            Self::ImeSynced(driver) => driver.is_active(),
            Self::Unsynced(driver) => driver.is_active(),
        }
    }
}

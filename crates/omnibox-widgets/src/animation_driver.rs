#![forbid(unsafe_code)]

//! Suggestion-list entry animation synchronized with the keyboard.
//!
//! When an omnibox session starts, the on-screen keyboard (IME) slides in and
//! the suggestion list fades and slides in with it. The platform reports the
//! keyboard's motion as a stream of inset-animation callbacks, possibly
//! interleaved with unrelated system-bar animations. [`ImeSyncedAnimationDriver`]
//! picks the first IME animation prepared during the session and maps its
//! fraction onto a single `(alpha, translation)` pair.
//!
//! # State Machine
//!
//! ```text
//! Idle --session(true)--> Preparing --progress(tag)--> Animating
//!  ^                          |                            |
//!  +------ end(tag) / session(false) ----------------------+
//! ```
//!
//! # Invariants
//!
//! 1. Only the first IME animation prepared in a session drives output.
//! 2. The reveal hook runs once per session, before any progress is applied.
//! 3. `alpha` and `translation` are always written together.
//! 4. Once the session ends or is cancelled, progress is ignored until the
//!    next session starts, even for the animation that used to drive it.
//! 5. Terminal output is always `(1.0, 0.0)`.

use bitflags::bitflags;

use omnibox_core::AnimationConfig;

bitflags! {
    /// Window inset categories reported by the platform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InsetTypes: u8 {
        const STATUS_BARS = 0b0001;
        const NAVIGATION_BARS = 0b0010;
        const IME = 0b0100;
        const SYSTEM_BARS = Self::STATUS_BARS.bits() | Self::NAVIGATION_BARS.bits();
    }
}

/// Platform-assigned identity of one inset animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(pub u64);

/// An inset animation as announced by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsetAnimation {
    pub id: AnimationId,
    pub types: InsetTypes,
}

impl InsetAnimation {
    #[must_use]
    pub fn new(id: u64, types: InsetTypes) -> Self {
        Self {
            id: AnimationId(id),
            types,
        }
    }

    /// Whether this animation moves the keyboard.
    #[must_use]
    pub fn is_ime(&self) -> bool {
        self.types.contains(InsetTypes::IME)
    }
}

/// One entry of a progress callback: an animation and its current fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningAnimation {
    pub animation: InsetAnimation,
    pub fraction: f32,
}

/// Visual output written to the list on every animation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationOutput {
    pub alpha: f32,
    pub translation: f32,
}

impl AnimationOutput {
    /// Fully visible, at rest.
    pub const RESTING: Self = Self {
        alpha: 1.0,
        translation: 0.0,
    };

    /// Output at `fraction` of the entry animation.
    ///
    /// `external` is the anchor's own translation at this instant; the list's
    /// offset shrinks to zero on top of it as `fraction` reaches 1.
    #[must_use]
    pub fn entering(fraction: f32, starting_offset: f32, external: f32) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        Self {
            alpha: fraction,
            translation: external + starting_offset * (1.0 - fraction),
        }
    }
}

/// Host bindings of an animation driver.
pub trait AnimationHost {
    /// Start receiving inset animation callbacks.
    fn register_progress_listener(&mut self);

    /// Stop receiving inset animation callbacks.
    fn unregister_progress_listener(&mut self);

    /// Make the list visible. Called once per session.
    fn reveal(&mut self);

    /// Current translation of the element the list is anchored to.
    fn external_translation(&self) -> f32;

    /// Write the list's alpha and translation.
    fn apply(&mut self, output: AnimationOutput);

    /// Whether the toolbar sits at the bottom of the screen, in which case the
    /// list slides in from below.
    fn is_bottom_anchored(&self) -> bool {
        false
    }
}

/// Common surface of every suggestion-list animation driver.
pub trait SuggestionsListAnimationDriver {
    /// The omnibox session started (`true`) or ended (`false`).
    fn on_session_state_change(&mut self, active: bool);

    /// Whether this driver animates at all. Owners that see `false` must
    /// reveal the list themselves.
    fn is_animation_enabled(&self) -> bool;

    /// Whether a session animation is in flight.
    fn is_active(&self) -> bool;
}

/// Starting offset for `host`, mirrored for bottom-anchored toolbars.
pub(crate) fn starting_offset_for<H: AnimationHost>(host: &H, magnitude: f32) -> f32 {
    if host.is_bottom_anchored() {
        -magnitude
    } else {
        magnitude
    }
}

// ---------------------------------------------------------------------------
// ImeSyncedAnimationDriver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    Idle,
    /// Session started; `tag` is fixed by the first IME `on_prepare`.
    Preparing { tag: Option<AnimationId> },
    Animating { tag: AnimationId },
}

/// Drives the list's entry animation from keyboard inset progress.
#[derive(Debug)]
pub struct ImeSyncedAnimationDriver<H> {
    host: H,
    offset_magnitude: f32,
    starting_offset: f32,
    state: DriverState,
    ime_controllable: bool,
    /// Incremented per session; diagnostic only.
    session: u64,
}

impl<H: AnimationHost> ImeSyncedAnimationDriver<H> {
    /// Create an idle driver using `config.starting_offset`.
    pub fn new(host: H, config: &AnimationConfig) -> Self {
        Self {
            host,
            offset_magnitude: config.starting_offset,
            starting_offset: config.starting_offset,
            state: DriverState::Idle,
            ime_controllable: false,
            session: 0,
        }
    }

    /// Shared access to the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The animation currently driving output, if one has been prepared.
    #[must_use]
    pub fn active_tag(&self) -> Option<AnimationId> {
        match self.state {
            DriverState::Idle => None,
            DriverState::Preparing { tag } => tag,
            DriverState::Animating { tag } => Some(tag),
        }
    }

    /// Number of sessions started so far.
    #[must_use]
    pub fn session_count(&self) -> u64 {
        self.session
    }

    /// The set of insets the app may control changed.
    ///
    /// The driver is only enabled once IME insets are controllable; before
    /// that the keyboard would never report progress.
    pub fn on_controllable_insets_changed(&mut self, types: InsetTypes) {
        self.ime_controllable = types.contains(InsetTypes::IME);
        omnibox_core::debug!(enabled = self.ime_controllable, "controllable insets changed");
    }

    /// An inset animation is about to start.
    pub fn on_prepare(&mut self, animation: InsetAnimation) {
        let DriverState::Preparing { tag: None } = self.state else {
            return;
        };
        if !animation.is_ime() {
            omnibox_core::trace!(id = animation.id.0, "ignoring non-IME animation");
            return;
        }
        self.state = DriverState::Preparing {
            tag: Some(animation.id),
        };
        omnibox_core::debug!(session = self.session, id = animation.id.0, "driving animation chosen");
        self.host.reveal();
    }

    /// Progress callback carrying every running inset animation.
    pub fn on_progress(&mut self, running: &[RunningAnimation]) {
        let Some(tag) = self.active_tag() else {
            return;
        };
        let Some(entry) = running.iter().find(|entry| entry.animation.id == tag) else {
            return;
        };
        if !entry.fraction.is_finite() {
            omnibox_core::trace!(id = tag.0, "ignoring non-finite fraction");
            return;
        }
        self.state = DriverState::Animating { tag };
        let output = AnimationOutput::entering(
            entry.fraction,
            self.starting_offset,
            self.host.external_translation(),
        );
        self.host.apply(output);
    }

    /// An inset animation finished or was cancelled.
    pub fn on_end(&mut self, animation: InsetAnimation) {
        if self.active_tag() != Some(animation.id) {
            return;
        }
        omnibox_core::debug!(session = self.session, id = animation.id.0, "driving animation ended");
        self.finish();
    }

    fn start(&mut self) {
        self.session += 1;
        self.starting_offset = starting_offset_for(&self.host, self.offset_magnitude);
        self.state = DriverState::Preparing { tag: None };
        omnibox_core::debug!(session = self.session, offset = self.starting_offset, "session started");
        self.host.register_progress_listener();
        self.host.apply(AnimationOutput {
            alpha: 0.0,
            translation: self.starting_offset,
        });
    }

    fn finish(&mut self) {
        self.state = DriverState::Idle;
        self.host.apply(AnimationOutput::RESTING);
        self.host.unregister_progress_listener();
    }
}

impl<H: AnimationHost> SuggestionsListAnimationDriver for ImeSyncedAnimationDriver<H> {
    fn on_session_state_change(&mut self, active: bool) {
        match (active, self.is_active()) {
            (true, false) => {
                if self.ime_controllable {
                    self.start();
                } else {
                    omnibox_core::trace!("session start ignored: IME insets not controllable");
                }
            }
            (false, true) => {
                omnibox_core::debug!(session = self.session, "session cancelled");
                self.finish();
            }
            _ => {}
        }
    }

    fn is_animation_enabled(&self) -> bool {
        self.ime_controllable
    }

    fn is_active(&self) -> bool {
        self.state != DriverState::Idle
    }
}

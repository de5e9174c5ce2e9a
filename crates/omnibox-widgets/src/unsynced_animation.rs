#![forbid(unsafe_code)]

//! Entry animations that do not follow the keyboard.
//!
//! [`UnsyncedAnimationDriver`] plays a fixed-duration fade/slide whenever a
//! session starts, for layouts where the list is not attached to the
//! keyboard (for example a bottom-anchored toolbar). [`DisabledAnimationDriver`]
//! stands in when the entry animation is turned off.

use std::time::Duration;

use omnibox_core::AnimationConfig;
use omnibox_core::animation::{Animation, Fade, ease_out_cubic};

use crate::animation_driver::{
    AnimationHost, AnimationOutput, SuggestionsListAnimationDriver, starting_offset_for,
};

/// Time-driven entry animation.
///
/// Call [`tick`](Self::tick) once per frame while [`is_active`] is `true`.
/// A tick longer than the remaining duration completes the animation at
/// once, even the first tick after the session starts.
///
/// [`is_active`]: SuggestionsListAnimationDriver::is_active
#[derive(Debug)]
pub struct UnsyncedAnimationDriver<H> {
    host: H,
    fade: Fade,
    offset_magnitude: f32,
    starting_offset: f32,
    active: bool,
}

impl<H: AnimationHost> UnsyncedAnimationDriver<H> {
    /// Create an idle driver from `config`'s offset and duration.
    pub fn new(host: H, config: &AnimationConfig) -> Self {
        Self {
            host,
            fade: Fade::new(config.duration()).easing(ease_out_cubic),
            offset_magnitude: config.starting_offset,
            starting_offset: config.starting_offset,
            active: false,
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

    /// Advance the animation by `dt` and write the new output.
    pub fn tick(&mut self, dt: Duration) {
        if !self.active {
            return;
        }
        self.fade.tick(dt);
        if self.fade.is_complete() {
            omnibox_core::debug!("unsynced animation complete");
            self.finish();
            return;
        }
        let output = AnimationOutput::entering(
            self.fade.value(),
            self.starting_offset,
            self.host.external_translation(),
        );
        self.host.apply(output);
    }

    fn finish(&mut self) {
        self.active = false;
        self.host.apply(AnimationOutput::RESTING);
    }
}

impl<H: AnimationHost> SuggestionsListAnimationDriver for UnsyncedAnimationDriver<H> {
    fn on_session_state_change(&mut self, active: bool) {
        match (active, self.active) {
            (true, false) => {
                self.fade.reset();
                self.starting_offset = starting_offset_for(&self.host, self.offset_magnitude);
                self.active = true;
                omnibox_core::debug!(offset = self.starting_offset, "unsynced animation started");
                self.host.reveal();
                self.host.apply(AnimationOutput {
                    alpha: 0.0,
                    translation: self.starting_offset,
                });
            }
            (false, true) => {
                omnibox_core::debug!("unsynced animation cancelled");
                self.finish();
            }
            _ => {}
        }
    }

    fn is_animation_enabled(&self) -> bool {
        true
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Driver used when the entry animation is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAnimationDriver;

impl SuggestionsListAnimationDriver for DisabledAnimationDriver {
    fn on_session_state_change(&mut self, _active: bool) {}

    fn is_animation_enabled(&self) -> bool {
        false
    }

    fn is_active(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Sink {
        reveals: usize,
        external: f32,
        bottom: bool,
        outputs: Vec<AnimationOutput>,
    }

    impl AnimationHost for Sink {
        fn register_progress_listener(&mut self) {}

        fn unregister_progress_listener(&mut self) {}

        fn reveal(&mut self) {
            self.reveals += 1;
        }

        fn external_translation(&self) -> f32 {
            self.external
        }

        fn apply(&mut self, output: AnimationOutput) {
            self.outputs.push(output);
        }

        fn is_bottom_anchored(&self) -> bool {
            self.bottom
        }
    }

    fn driver() -> UnsyncedAnimationDriver<Sink> {
        let config = AnimationConfig {
            starting_offset: 30.0,
            duration_ms: 100,
            ..AnimationConfig::default()
        };
        UnsyncedAnimationDriver::new(Sink::default(), &config)
    }

    fn last(driver: &UnsyncedAnimationDriver<Sink>) -> AnimationOutput {
        *driver.host().outputs.last().unwrap()
    }

    #[test]
    fn start_reveals_and_hides() {
        let mut driver = driver();
        assert!(driver.is_animation_enabled());
        driver.on_session_state_change(true);
        assert!(driver.is_active());
        assert_eq!(driver.host().reveals, 1);
        assert_eq!(
            last(&driver),
            AnimationOutput {
                alpha: 0.0,
                translation: 30.0
            }
        );
    }

    #[test]
    fn ticks_progress_monotonically_to_rest() {
        let mut driver = driver();
        driver.host_mut().external = 10.0;
        driver.on_session_state_change(true);
        let mut previous_alpha = 0.0;
        for _ in 0..9 {
            driver.tick(Duration::from_millis(10));
            let output = last(&driver);
            assert!(output.alpha >= previous_alpha);
            assert!(output.translation >= 10.0 && output.translation <= 40.0);
            previous_alpha = output.alpha;
        }
        assert!(driver.is_active());
        driver.tick(Duration::from_millis(10));
        assert!(!driver.is_active());
        assert_eq!(last(&driver), AnimationOutput::RESTING);
    }

    #[test]
    fn long_first_tick_completes_immediately() {
        let mut driver = driver();
        driver.on_session_state_change(true);
        driver.tick(Duration::from_secs(3));
        assert!(!driver.is_active());
        assert_eq!(driver.host().reveals, 1);
        assert_eq!(driver.host().outputs.len(), 2);
        assert_eq!(last(&driver), AnimationOutput::RESTING);
    }

    #[test]
    fn tick_while_idle_is_noop() {
        let mut driver = driver();
        driver.tick(Duration::from_millis(50));
        assert!(driver.host().outputs.is_empty());
    }

    #[test]
    fn session_end_cancels() {
        let mut driver = driver();
        driver.on_session_state_change(true);
        driver.tick(Duration::from_millis(30));
        driver.on_session_state_change(false);
        assert!(!driver.is_active());
        assert_eq!(last(&driver), AnimationOutput::RESTING);
        let count = driver.host().outputs.len();
        driver.tick(Duration::from_millis(30));
        assert_eq!(driver.host().outputs.len(), count);
    }

    #[test]
    fn restart_replays_from_zero() {
        let mut driver = driver();
        driver.on_session_state_change(true);
        driver.tick(Duration::from_millis(200));
        driver.on_session_state_change(true);
        assert_eq!(driver.host().reveals, 2);
        driver.tick(Duration::from_millis(10));
        assert!(last(&driver).alpha < 1.0);
    }

    #[test]
    fn bottom_anchor_mirrors_offset() {
        let mut driver = driver();
        driver.host_mut().bottom = true;
        driver.on_session_state_change(true);
        assert!((last(&driver).translation + 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn disabled_driver_does_nothing() {
        let mut driver = DisabledAnimationDriver;
        driver.on_session_state_change(true);
        assert!(!driver.is_animation_enabled());
        assert!(!driver.is_active());
    }
}

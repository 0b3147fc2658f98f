//! # Debounced push-button
//!
//! [`Button`] turns the raw level of an input pin into a stable
//! pressed/released state. Each call to [`Button::refresh_state`] takes one
//! sample. The committed state only changes after [`DEBOUNCE_THRESHOLD`]
//! consecutive samples agree.
//!
//! The button does no timing itself. Call [`Button::refresh_state`] from a
//! periodic task, every [`POLL_PERIOD_MS`] milliseconds for the usual
//! tactile switch.
//!
//! ```no_run
//! use tm4c123_port::board::{SW1, SW1_CONFIG};
//! use tm4c123_port::button::{Button, ButtonState};
//! use tm4c123_port::gpio::{Channel, Mmio};
//! use tm4c123_port::port::{NoopSink, Port};
//!
//! let mut port = Port::new(Mmio::take().unwrap(), NoopSink);
//! let mut sw1 = Button::new(Channel::new(SW1), &SW1_CONFIG);
//! sw1.init(&mut port).unwrap();
//! loop {
//!     sw1.refresh_state();
//!     if sw1.state() == ButtonState::Pressed {
//!         // ...
//!     }
//! }
//! ```

use crate::gpio::{Level, PinId, Pull, RegisterBus};
use crate::port::{ErrorSink, InitSummary, PinConfig, Port, PortError, ServiceId};
use embedded_hal::digital::v2::InputPin;

/// Consecutive identical samples needed to commit a state change
pub const DEBOUNCE_THRESHOLD: u8 = 3;

/// Suggested sampling period
pub const POLL_PERIOD_MS: u32 = 20;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    Released,
    Pressed,
}

/// Pin configuration of a push-button: pull-up input, fixed direction and mode
pub const fn button_config(id: PinId) -> PinConfig {
    PinConfig::input(id, Pull::PullUp)
}

/// Run-length debounced button on any input pin
pub struct Button<'cfg, P: InputPin> {
    pin: P,
    config: &'cfg PinConfig,
    pressed_level: Level,
    stable: ButtonState,
    press_run: u8,
    release_run: u8,
}

impl<'cfg, P: InputPin> Button<'cfg, P> {
    /// Button that reads low while pressed, i.e. a switch to ground with
    /// the internal pull-up enabled
    #[inline]
    pub fn new(pin: P, config: &'cfg PinConfig) -> Self {
        Self::with_pressed_level(pin, config, Level::Low)
    }

    /// Button that reads high while pressed
    #[inline]
    pub fn new_active_high(pin: P, config: &'cfg PinConfig) -> Self {
        Self::with_pressed_level(pin, config, Level::High)
    }

    fn with_pressed_level(pin: P, config: &'cfg PinConfig, pressed_level: Level) -> Self {
        Button {
            pin,
            config,
            pressed_level,
            stable: ButtonState::Released,
            press_run: 0,
            release_run: 0,
        }
    }

    /// Program the button pin through `port` and start over as released
    ///
    /// The button's configuration becomes the only active entry of `port`.
    /// A configuration other than [`button_config`] of its pin is refused
    /// with [`PortError::ParamConfig`] and nothing is programmed.
    pub fn init<B: RegisterBus, S: ErrorSink>(
        &mut self,
        port: &mut Port<'cfg, B, S>,
    ) -> Result<InitSummary, PortError> {
        if *self.config != button_config(self.config.id) {
            return Err(port.fail(ServiceId::Init, PortError::ParamConfig));
        }
        self.reset();
        port.init(Some(core::slice::from_ref(self.config)))
    }

    fn reset(&mut self) {
        self.stable = ButtonState::Released;
        self.press_run = 0;
        self.release_run = 0;
    }

    /// Take one sample of the pin
    ///
    /// A failed read is ignored and leaves the run counters as they are.
    pub fn refresh_state(&mut self) {
        let level = match self.pin.is_high() {
            Ok(high) => Level::from(high),
            Err(_) => return,
        };
        if level == self.pressed_level {
            self.press_run = self.press_run.saturating_add(1);
            self.release_run = 0;
        } else {
            self.release_run = self.release_run.saturating_add(1);
            self.press_run = 0;
        }

        if self.press_run >= DEBOUNCE_THRESHOLD {
            self.stable = ButtonState::Pressed;
            self.press_run = 0;
            self.release_run = 0;
        } else if self.release_run >= DEBOUNCE_THRESHOLD {
            self.stable = ButtonState::Released;
            self.press_run = 0;
            self.release_run = 0;
        }
    }

    /// Last committed state
    #[inline]
    pub fn state(&self) -> ButtonState {
        self.stable
    }

    #[inline]
    pub fn config(&self) -> &'cfg PinConfig {
        self.config
    }

    /// Consumes the button and returns the pin
    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::{Direction, PinMode, PF4};
    use core::cell::Cell;

    /// Replays a fixed list of levels, `true` meaning high
    struct Samples {
        levels: Vec<bool>,
        next: Cell<usize>,
    }

    impl Samples {
        fn new(levels: &[bool]) -> Self {
            Samples {
                levels: levels.to_vec(),
                next: Cell::new(0),
            }
        }
    }

    impl InputPin for Samples {
        type Error = ();

        fn is_high(&self) -> Result<bool, Self::Error> {
            let idx = self.next.get();
            self.next.set(idx + 1);
            self.levels.get(idx).copied().ok_or(())
        }

        fn is_low(&self) -> Result<bool, Self::Error> {
            self.is_high().map(|v| !v)
        }
    }

    const L: bool = false;
    const H: bool = true;

    static CONFIG: PinConfig = button_config(PF4);

    fn states(button: &mut Button<'_, Samples>, count: usize) -> Vec<ButtonState> {
        (0..count)
            .map(|_| {
                button.refresh_state();
                button.state()
            })
            .collect()
    }

    #[test]
    fn press_then_noisy_release() {
        use ButtonState::*;
        let mut button = Button::new(Samples::new(&[L, L, L, H, L, H, H, H]), &CONFIG);
        assert_eq!(button.state(), Released);
        assert_eq!(states(&mut button, 3), [Released, Released, Pressed]);
        let release = states(&mut button, 5);
        assert_eq!(release, [Pressed, Pressed, Pressed, Pressed, Released]);
    }

    #[test]
    fn short_glitch_is_filtered() {
        let mut button = Button::new(Samples::new(&[L, L, H, L, L, H]), &CONFIG);
        assert!(states(&mut button, 6)
            .iter()
            .all(|s| *s == ButtonState::Released));
    }

    #[test]
    fn active_high() {
        let mut button = Button::new_active_high(Samples::new(&[H, H, H]), &CONFIG);
        button.refresh_state();
        button.refresh_state();
        button.refresh_state();
        assert_eq!(button.state(), ButtonState::Pressed);
    }

    #[test]
    fn failed_reads_keep_the_run() {
        // Two lows, then the script runs out: reads fail from here on
        let mut button = Button::new(Samples::new(&[L, L]), &CONFIG);
        assert_eq!(states(&mut button, 6), [ButtonState::Released; 6]);
        assert_eq!(button.press_run, 2);
        assert_eq!(button.release_run, 0);
    }

    #[test]
    fn config_is_a_fixed_pull_up_input() {
        assert_eq!(CONFIG.direction, Direction::Input);
        assert_eq!(CONFIG.pull, Pull::PullUp);
        assert_eq!(CONFIG.mode, PinMode::Gpio);
        assert!(!CONFIG.direction_mutable);
        assert!(!CONFIG.mode_mutable);
    }
}

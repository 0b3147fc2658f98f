//! # EK-TM4C123GXL LaunchPad
//!
//! Pin assignment of the LaunchPad evaluation board and a configuration set
//! covering all 43 pins of the package.
//!
//! - The RGB LED is wired to PF1 (red), PF2 (blue) and PF3 (green). These
//!   pins start as low outputs and may be switched to a timer function at
//!   runtime.
//! - The user switches SW1 (PF4) and SW2 (PF0) connect to ground and need the
//!   internal pull-up. PF0 is lock-protected.
//! - Every other pin is a floating GPIO input whose direction and mode may be
//!   changed at runtime. PC0 to PC3 carry JTAG and are skipped by
//!   [`Port::init`](crate::port::Port::init).

use crate::button::button_config;
use crate::gpio::{Level, PinId, Pull, ALL_PINS, PA0, PF0, PF1, PF2, PF3, PF4, PIN_COUNT};
use crate::port::PinConfig;

pub const LED_RED: PinId = PF1;
pub const LED_BLUE: PinId = PF2;
pub const LED_GREEN: PinId = PF3;
pub const SW1: PinId = PF4;
pub const SW2: PinId = PF0;

pub static SW1_CONFIG: PinConfig = button_config(SW1);
pub static SW2_CONFIG: PinConfig = button_config(SW2);

/// Configuration set for the whole board, in [`ALL_PINS`] order
pub static LAUNCHPAD_CONFIG: [PinConfig; PIN_COUNT] = launchpad_config();

const fn is_led(id: PinId) -> bool {
    let key = id.key();
    key == LED_RED.key() || key == LED_BLUE.key() || key == LED_GREEN.key()
}

const fn is_switch(id: PinId) -> bool {
    let key = id.key();
    key == SW1.key() || key == SW2.key()
}

const fn launchpad_config() -> [PinConfig; PIN_COUNT] {
    let mut config = [PinConfig::input(PA0, Pull::None); PIN_COUNT];
    let mut idx = 0;
    while idx < PIN_COUNT {
        let id = ALL_PINS[idx];
        config[idx] = if is_led(id) {
            PinConfig::output(id, Level::Low).mode_changeable(true)
        } else if is_switch(id) {
            button_config(id)
        } else {
            PinConfig::input(id, Pull::None)
                .direction_changeable(true)
                .mode_changeable(true)
        };
        idx += 1;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::{is_mode_allowed, Direction, PinMode};

    #[test]
    fn covers_every_pin_once_in_order() {
        for (cfg, id) in LAUNCHPAD_CONFIG.iter().zip(ALL_PINS) {
            assert_eq!(cfg.id, id);
            assert!(is_mode_allowed(cfg.id, cfg.mode));
        }
    }

    #[test]
    fn leds_and_switches() {
        let by_id = |id: PinId| LAUNCHPAD_CONFIG.iter().find(|c| c.id == id).unwrap();
        for led in [LED_RED, LED_BLUE, LED_GREEN] {
            let cfg = by_id(led);
            assert_eq!(cfg.direction, Direction::Output);
            assert_eq!(cfg.initial_level, Level::Low);
            assert!(cfg.mode_mutable && !cfg.direction_mutable);
        }
        assert_eq!(*by_id(SW1), SW1_CONFIG);
        assert_eq!(*by_id(SW2), SW2_CONFIG);
        assert_eq!(SW2_CONFIG.pull, Pull::PullUp);
        assert_eq!(by_id(PA0).mode, PinMode::Gpio);
        assert!(by_id(PA0).direction_mutable);
    }
}

//! Configuration records consumed by [`Port::init`](super::Port::init)

use crate::gpio::{Direction, Level, PinId, PinMode, Pull};

/// Configuration of one managed pin
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pub id: PinId,
    pub direction: Direction,
    /// Only applied to inputs
    pub pull: Pull,
    pub mode: PinMode,
    /// Only applied to outputs
    pub initial_level: Level,
    /// Whether [`Port::set_pin_direction`](super::Port::set_pin_direction) may change this pin
    pub direction_mutable: bool,
    /// Whether [`Port::set_pin_mode`](super::Port::set_pin_mode) may change this pin
    pub mode_mutable: bool,
}

impl PinConfig {
    /// Digital input with neither direction nor mode changeable at runtime
    #[inline]
    pub const fn input(id: PinId, pull: Pull) -> Self {
        PinConfig {
            id,
            direction: Direction::Input,
            pull,
            mode: PinMode::Gpio,
            initial_level: Level::Low,
            direction_mutable: false,
            mode_mutable: false,
        }
    }

    /// Digital output with neither direction nor mode changeable at runtime
    #[inline]
    pub const fn output(id: PinId, initial_level: Level) -> Self {
        PinConfig {
            id,
            direction: Direction::Output,
            pull: Pull::None,
            mode: PinMode::Gpio,
            initial_level,
            direction_mutable: false,
            mode_mutable: false,
        }
    }

    #[inline]
    pub const fn with_mode(mut self, mode: PinMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub const fn direction_changeable(mut self, changeable: bool) -> Self {
        self.direction_mutable = changeable;
        self
    }

    #[inline]
    pub const fn mode_changeable(mut self, changeable: bool) -> Self {
        self.mode_mutable = changeable;
        self
    }
}

/// What [`Port::init`](super::Port::init) does with an entry whose mode the
/// pin does not support
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidModePolicy {
    /// Report the entry, leave its mode registers alone and keep going
    #[default]
    Skip,
    /// Check the whole set first and refuse it without touching hardware
    Abort,
}

/// Runtime settings of a [`Port`](super::Port)
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortSettings {
    /// Forward failed precondition checks to the error sink
    pub report_errors: bool,
    pub invalid_mode: InvalidModePolicy,
}

impl PortSettings {
    pub const DEFAULT: PortSettings = PortSettings {
        report_errors: true,
        invalid_mode: InvalidModePolicy::Skip,
    };
}

impl Default for PortSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

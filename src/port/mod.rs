//! # Port configurator
//!
//! [`Port`] programs a set of [`PinConfig`]s into the GPIO registers and then
//! guards runtime changes to them. It owns the register bus and the error
//! sink and borrows the configuration set for as long as it is active.
//!
//! ```no_run
//! use tm4c123_port::board::LAUNCHPAD_CONFIG;
//! use tm4c123_port::gpio::Mmio;
//! use tm4c123_port::port::{NoopSink, Port};
//!
//! let bus = Mmio::take().unwrap();
//! let mut port = Port::new(bus, NoopSink);
//! port.init(Some(&LAUNCHPAD_CONFIG[..])).unwrap();
//! // Put back the direction of every pin whose direction is fixed
//! port.refresh_port_direction().unwrap();
//! ```
//!
//! Every failed check returns a [`PortError`] and, unless disabled through
//! [`PortSettings::report_errors`], also hands an [`ErrorReport`] to the sink.
//! Pins reserved for the debug interface are never written. Requests for them
//! succeed without doing anything.

use crate::clock::enable_port_clock;
use crate::gpio::reg::{PinRegisters, RegisterBus};
use crate::gpio::{is_lock_protected, is_mode_allowed, is_permanently_reserved, Direction};

#[cfg(feature = "set-pin-mode")]
use crate::gpio::PinMode;

pub mod config;
pub use config::*;

pub mod error;
pub use error::*;

//==================================================================================================
//  Version info
//==================================================================================================

/// Identification of the driver
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VersionInfo {
    pub module_id: u16,
    pub vendor_id: u16,
    pub sw_major: u8,
    pub sw_minor: u8,
    pub sw_patch: u8,
}

pub const VERSION_INFO: VersionInfo = VersionInfo {
    module_id: MODULE_ID,
    vendor_id: VENDOR_ID,
    sw_major: 1,
    sw_minor: 0,
    sw_patch: 0,
};

//==================================================================================================
//  Port
//==================================================================================================

/// Outcome of a successful [`Port::init`]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitSummary {
    /// Pins programmed completely
    pub configured: usize,
    /// Pins skipped because they belong to the debug interface
    pub reserved: usize,
    /// Pins whose mode was refused. Their direction was still programmed.
    pub rejected: usize,
}

/// GPIO port configurator
pub struct Port<'cfg, B: RegisterBus, S: ErrorSink = NoopSink> {
    bus: B,
    sink: S,
    settings: PortSettings,
    config: Option<&'cfg [PinConfig]>,
}

impl<'cfg, B: RegisterBus, S: ErrorSink> Port<'cfg, B, S> {
    /// Create an uninitialized configurator with the default settings
    #[inline]
    pub fn new(bus: B, sink: S) -> Self {
        Self::with_settings(bus, sink, PortSettings::default())
    }

    #[inline]
    pub fn with_settings(bus: B, sink: S, settings: PortSettings) -> Self {
        Port {
            bus,
            sink,
            settings,
            config: None,
        }
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    /// Active configuration set, if [`Port::init`] succeeded
    #[inline]
    pub fn config(&self) -> Option<&'cfg [PinConfig]> {
        self.config
    }

    #[inline]
    pub fn settings(&self) -> &PortSettings {
        &self.settings
    }

    /// Consumes the configurator and returns the register bus and the sink
    pub fn release(self) -> (B, S) {
        (self.bus, self.sink)
    }

    pub(crate) fn fail(&mut self, service: ServiceId, error: PortError) -> PortError {
        if self.settings.report_errors {
            self.sink.report(ErrorReport::new(service, error));
        }
        error
    }

    fn active(&mut self, service: ServiceId) -> Result<&'cfg [PinConfig], PortError> {
        match self.config {
            Some(config) => Ok(config),
            None => Err(self.fail(service, PortError::Uninit)),
        }
    }

    #[cfg(any(feature = "set-pin-direction", feature = "set-pin-mode"))]
    fn lookup(&mut self, service: ServiceId, pin: usize) -> Result<&'cfg PinConfig, PortError> {
        let config = self.active(service)?;
        match config.get(pin) {
            Some(cfg) => Ok(cfg),
            None => Err(self.fail(service, PortError::ParamPin)),
        }
    }

    /// Program every pin of `configs` and make it the active configuration
    ///
    /// Entries are applied in order. For each pin the port clock is opened,
    /// the commit register is unlocked if the pin is lock-protected, and the
    /// mode and then the direction are written.
    ///
    /// A missing or empty set, or one naming a pin twice, is refused with
    /// [`PortError::ParamConfig`] before any register is touched. What happens
    /// to entries whose mode the pin does not support depends on
    /// [`PortSettings::invalid_mode`].
    ///
    /// Calling `init` again replaces the active set. Pins that the new set
    /// does not name keep their current hardware state.
    pub fn init(&mut self, configs: Option<&'cfg [PinConfig]>) -> Result<InitSummary, PortError> {
        let configs = match configs {
            Some(configs) if !configs.is_empty() => configs,
            _ => return Err(self.fail(ServiceId::Init, PortError::ParamConfig)),
        };
        if has_duplicates(configs) {
            return Err(self.fail(ServiceId::Init, PortError::ParamConfig));
        }
        if self.settings.invalid_mode == InvalidModePolicy::Abort
            && configs
                .iter()
                .any(|cfg| !is_permanently_reserved(cfg.id) && !is_mode_allowed(cfg.id, cfg.mode))
        {
            return Err(self.fail(ServiceId::Init, PortError::ParamInvalidMode));
        }

        let mut summary = InitSummary::default();
        for cfg in configs {
            if is_permanently_reserved(cfg.id) {
                summary.reserved += 1;
                continue;
            }
            enable_port_clock(&mut self.bus, cfg.id.port());

            let mode_allowed = is_mode_allowed(cfg.id, cfg.mode);
            if mode_allowed {
                summary.configured += 1;
            } else {
                self.fail(ServiceId::Init, PortError::ParamInvalidMode);
                summary.rejected += 1;
            }

            let mut pin = PinRegisters::new(cfg.id, &mut self.bus);
            if is_lock_protected(cfg.id) {
                pin.unlock();
            }
            if mode_allowed {
                pin.change_mode(cfg.mode);
            }
            match cfg.direction {
                Direction::Output => {
                    pin.set_dir(true);
                    pin.write_pin(cfg.initial_level);
                }
                Direction::Input => {
                    pin.set_dir(false);
                    pin.set_pull(cfg.pull);
                }
            }
        }
        self.config = Some(configs);
        Ok(summary)
    }

    /// Change the direction of the pin at index `pin` of the active set
    ///
    /// Only the direction bit is written. Output level and pull resistors
    /// keep their current state.
    #[cfg(feature = "set-pin-direction")]
    pub fn set_pin_direction(&mut self, pin: usize, direction: Direction) -> Result<(), PortError> {
        let cfg = self.lookup(ServiceId::SetPinDirection, pin)?;
        if is_permanently_reserved(cfg.id) {
            return Ok(());
        }
        if !cfg.direction_mutable {
            return Err(self.fail(ServiceId::SetPinDirection, PortError::DirectionUnchangeable));
        }
        PinRegisters::new(cfg.id, &mut self.bus).set_dir(direction == Direction::Output);
        Ok(())
    }

    /// Change the mode of the pin at index `pin` of the active set
    #[cfg(feature = "set-pin-mode")]
    pub fn set_pin_mode(&mut self, pin: usize, mode: PinMode) -> Result<(), PortError> {
        let cfg = self.lookup(ServiceId::SetPinMode, pin)?;
        if is_permanently_reserved(cfg.id) {
            return Ok(());
        }
        if !cfg.mode_mutable {
            return Err(self.fail(ServiceId::SetPinMode, PortError::ModeUnchangeable));
        }
        if !is_mode_allowed(cfg.id, mode) {
            return Err(self.fail(ServiceId::SetPinMode, PortError::ParamInvalidMode));
        }
        PinRegisters::new(cfg.id, &mut self.bus).change_mode(mode);
        Ok(())
    }

    /// Rewrite the configured direction of every pin whose direction is not
    /// changeable
    pub fn refresh_port_direction(&mut self) -> Result<(), PortError> {
        let config = self.active(ServiceId::RefreshPortDirection)?;
        for cfg in config
            .iter()
            .filter(|cfg| !cfg.direction_mutable && !is_permanently_reserved(cfg.id))
        {
            PinRegisters::new(cfg.id, &mut self.bus).set_dir(cfg.direction == Direction::Output);
        }
        Ok(())
    }

    /// Copy [`VERSION_INFO`] into `dest`
    #[cfg(feature = "version-info")]
    pub fn get_version_info(&mut self, dest: Option<&mut VersionInfo>) -> Result<(), PortError> {
        let dest = match dest {
            Some(dest) => dest,
            None => return Err(self.fail(ServiceId::GetVersionInfo, PortError::ParamPointer)),
        };
        self.active(ServiceId::GetVersionInfo)?;
        *dest = VERSION_INFO;
        Ok(())
    }
}

fn has_duplicates(configs: &[PinConfig]) -> bool {
    let mut seen: u64 = 0;
    for cfg in configs {
        let bit = 1u64 << cfg.id.key();
        if seen & bit != 0 {
            return true;
        }
        seen |= bit;
    }
    false
}

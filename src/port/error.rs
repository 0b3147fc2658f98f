//! Error codes and the error-reporting sink

use core::fmt;

/// Module id reported with every error
pub const MODULE_ID: u16 = 124;
/// Vendor id reported by the version info
pub const VENDOR_ID: u16 = 1234;
/// Instance id reported with every error
pub const INSTANCE_ID: u8 = 0;

/// AUTOSAR release the driver's interface follows (4.0.3)
pub const AR_RELEASE_MAJOR_VERSION: u8 = 4;
pub const AR_RELEASE_MINOR_VERSION: u8 = 0;
pub const AR_RELEASE_PATCH_VERSION: u8 = 3;

/// Operation that detected an error
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ServiceId {
    Init = 0x00,
    SetPinDirection = 0x01,
    RefreshPortDirection = 0x02,
    GetVersionInfo = 0x03,
    SetPinMode = 0x04,
}

/// Port driver error type
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PortError {
    /// Pin index outside the active configuration
    ParamPin = 0x0A,
    /// Pin is not configured as direction changeable
    DirectionUnchangeable = 0x0B,
    /// Configuration set missing, empty or naming a pin twice
    ParamConfig = 0x0C,
    /// Mode not supported by the pin
    ParamInvalidMode = 0x0D,
    /// Pin is not configured as mode changeable
    ModeUnchangeable = 0x0E,
    /// Driver used before [`Port::init`](super::Port::init) succeeded
    Uninit = 0x0F,
    /// Output destination missing
    ParamPointer = 0x10,
}

impl PortError {
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PortError::ParamPin => "pin index out of range",
            PortError::DirectionUnchangeable => "pin direction is not changeable",
            PortError::ParamConfig => "invalid configuration set",
            PortError::ParamInvalidMode => "mode not supported by pin",
            PortError::ModeUnchangeable => "pin mode is not changeable",
            PortError::Uninit => "port driver not initialized",
            PortError::ParamPointer => "missing output destination",
        };
        f.write_str(msg)
    }
}

/// One failed precondition check, as handed to an [`ErrorSink`]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorReport {
    pub module_id: u16,
    pub instance_id: u8,
    pub service: ServiceId,
    pub error: PortError,
}

impl ErrorReport {
    #[inline]
    pub const fn new(service: ServiceId, error: PortError) -> Self {
        ErrorReport {
            module_id: MODULE_ID,
            instance_id: INSTANCE_ID,
            service,
            error,
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "module {} instance {} service {:#04x}: {} ({:#04x})",
            self.module_id,
            self.instance_id,
            self.service as u8,
            self.error,
            self.error.code()
        )
    }
}

/// Destination for error reports
///
/// Reporting is fire-and-forget. The driver does not look at anything the
/// sink does.
pub trait ErrorSink {
    fn report(&mut self, report: ErrorReport);
}

impl<S: ErrorSink + ?Sized> ErrorSink for &mut S {
    #[inline]
    fn report(&mut self, report: ErrorReport) {
        (**self).report(report)
    }
}

/// Sink that drops every report
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ErrorSink for NoopSink {
    #[inline]
    fn report(&mut self, _report: ErrorReport) {}
}

/// Sink printing every report over RTT
///
/// The RTT channel must have been set up with `rtt_init_print!` first.
#[cfg(feature = "rtt")]
#[derive(Debug, Default, Clone, Copy)]
pub struct RttSink;

#[cfg(feature = "rtt")]
impl ErrorSink for RttSink {
    fn report(&mut self, report: ErrorReport) {
        rtt_target::rprintln!("port error: {}", report);
    }
}

//! # Value-level input channel
//!
//! A [`Channel`] reads the raw logic level of one pin from its port's data
//! register. It implements the embedded HAL [`InputPin`] trait, so it can
//! feed anything that consumes a generic input, such as the debounced
//! [`Button`](crate::button::Button).
//!
//! ```no_run
//! use embedded_hal::digital::v2::InputPin;
//! use tm4c123_port::gpio::{Channel, PF4};
//!
//! let sw1 = Channel::new(PF4);
//! let pressed = sw1.is_low().unwrap();
//! ```
//!
//! The channel does not configure the pin. Reading an unconfigured pin or a
//! pin whose digital enable bit is clear returns whatever the data register
//! holds, which is 0 on this hardware.

use super::pins::{Level, PinId};
use super::reg::{MmioReader, PortReg, Reg, RegisterRead};
use core::convert::Infallible;
use embedded_hal::digital::v2::InputPin;

/// A value-level input, parameterized by the register reader
pub struct Channel<R: RegisterRead = MmioReader> {
    id: PinId,
    regs: R,
}

impl Channel<MmioReader> {
    /// Channel reading the memory-mapped data register of `id`
    #[inline]
    pub fn new(id: PinId) -> Self {
        Channel {
            id,
            regs: MmioReader,
        }
    }
}

impl<R: RegisterRead> Channel<R> {
    #[inline]
    pub fn with_reader(id: PinId, regs: R) -> Self {
        Channel { id, regs }
    }

    /// Return a copy of the pin ID
    #[inline]
    pub fn id(&self) -> PinId {
        self.id
    }

    /// Read the logic level of the pin
    #[inline]
    pub fn level(&self) -> Level {
        let data = self.regs.read(Reg::Port(self.id.port(), PortReg::Data));
        Level::from(data & self.id.mask() != 0)
    }

    /// Consumes the channel and returns the reader
    pub fn release(self) -> R {
        self.regs
    }
}

impl<R: RegisterRead> InputPin for Channel<R> {
    type Error = Infallible;

    #[inline]
    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.level().is_high())
    }

    #[inline]
    fn is_low(&self) -> Result<bool, Self::Error> {
        self.is_high().map(|v| !v)
    }
}

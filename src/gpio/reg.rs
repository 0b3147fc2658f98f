//! # Register interface
//!
//! The configurator never touches a peripheral itself. All register traffic
//! goes through the [`RegisterRead`] and [`RegisterBus`] traits, which form
//! the raw read/write primitive of the crate. [`Mmio`] implements them on top
//! of the `tm4c123x` peripheral access crate. Any other implementation, such
//! as a recording fake in a test, sees exactly the same sequence of accesses.

use super::capability::PinMode;
use super::pins::{Level, PinId, PortId, Pull};
use tm4c123x::{
    gpio_porta, sysctl, GPIO_PORTA, GPIO_PORTB, GPIO_PORTC, GPIO_PORTD, GPIO_PORTE, GPIO_PORTF,
    SYSCTL,
};

/// Key that unlocks the commit register of a port
pub const GPIO_LOCK_KEY: u32 = 0x4C4F_434B;

//==================================================================================================
//  Register map
//==================================================================================================

/// Registers of one GPIO port block
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortReg {
    /// GPIODATA, through the all-bits address mask
    Data,
    Dir,
    Afsel,
    Pur,
    Pdr,
    Den,
    Lock,
    Cr,
    Amsel,
    Pctl,
}

/// Any register the crate touches
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    /// Legacy run mode clock gating control register 2
    Rcgc2,
    Port(PortId, PortReg),
}

//==================================================================================================
//  Bus traits
//==================================================================================================

/// Read side of the register primitive
pub trait RegisterRead {
    fn read(&self, reg: Reg) -> u32;
}

/// Full register primitive. Writes always succeed.
pub trait RegisterBus: RegisterRead {
    fn write(&mut self, reg: Reg, value: u32);

    /// Read-modify-write of a single register
    #[inline]
    fn modify<F: FnOnce(u32) -> u32>(&mut self, reg: Reg, f: F) {
        let value = f(self.read(reg));
        self.write(reg, value);
    }

    #[inline]
    fn set_bits(&mut self, reg: Reg, mask: u32) {
        self.modify(reg, |r| r | mask);
    }

    #[inline]
    fn clear_bits(&mut self, reg: Reg, mask: u32) {
        self.modify(reg, |r| r & !mask);
    }
}

impl<R: RegisterRead> RegisterRead for &R {
    #[inline]
    fn read(&self, reg: Reg) -> u32 {
        (**self).read(reg)
    }
}

impl<R: RegisterRead> RegisterRead for &mut R {
    #[inline]
    fn read(&self, reg: Reg) -> u32 {
        (**self).read(reg)
    }
}

impl<B: RegisterBus> RegisterBus for &mut B {
    #[inline]
    fn write(&mut self, reg: Reg, value: u32) {
        (**self).write(reg, value)
    }

    #[inline]
    fn modify<F: FnOnce(u32) -> u32>(&mut self, reg: Reg, f: F) {
        (**self).modify(reg, f)
    }
}

//==================================================================================================
//  Memory-mapped implementation
//==================================================================================================

#[inline]
fn port_block(port: PortId) -> &'static gpio_porta::RegisterBlock {
    let ptr = match port {
        PortId::A => GPIO_PORTA::ptr(),
        PortId::B => GPIO_PORTB::ptr(),
        PortId::C => GPIO_PORTC::ptr(),
        PortId::D => GPIO_PORTD::ptr(),
        PortId::E => GPIO_PORTE::ptr(),
        PortId::F => GPIO_PORTF::ptr(),
    };
    // Safety: the PAC pointers refer to always-mapped register blocks
    unsafe { &*ptr }
}

#[inline]
fn sysctl_block() -> &'static sysctl::RegisterBlock {
    // Safety: see `port_block`
    unsafe { &*SYSCTL::ptr() }
}

/// Run `$body` with `$r` bound to the PAC register selected by `$reg`
macro_rules! port_register {
    ($block:expr, $reg:expr, |$r:ident| $body:expr) => {{
        let block = $block;
        match $reg {
            PortReg::Data => {
                let $r = &block.data;
                $body
            }
            PortReg::Dir => {
                let $r = &block.dir;
                $body
            }
            PortReg::Afsel => {
                let $r = &block.afsel;
                $body
            }
            PortReg::Pur => {
                let $r = &block.pur;
                $body
            }
            PortReg::Pdr => {
                let $r = &block.pdr;
                $body
            }
            PortReg::Den => {
                let $r = &block.den;
                $body
            }
            PortReg::Lock => {
                let $r = &block.lock;
                $body
            }
            PortReg::Cr => {
                let $r = &block.cr;
                $body
            }
            PortReg::Amsel => {
                let $r = &block.amsel;
                $body
            }
            PortReg::Pctl => {
                let $r = &block.pctl;
                $body
            }
        }
    }};
}

#[inline]
fn pac_read(reg: Reg) -> u32 {
    match reg {
        Reg::Rcgc2 => sysctl_block().rcgc2.read().bits(),
        Reg::Port(port, reg) => port_register!(port_block(port), reg, |r| r.read().bits()),
    }
}

#[inline]
fn pac_write(reg: Reg, value: u32) {
    match reg {
        // The PAC exposes RCGC2 as read-only, so store through its address
        Reg::Rcgc2 => unsafe {
            core::ptr::write_volatile(
                core::ptr::addr_of!(sysctl_block().rcgc2) as *mut u32,
                value,
            )
        },
        Reg::Port(port, reg) => {
            port_register!(port_block(port), reg, |r| r.write(|w| unsafe { w.bits(value) }))
        }
    }
}

/// GPIO and system control registers, reached through the PAC
///
/// Read-modify-write sequences run inside a critical section, so an interrupt
/// handler touching another pin of the same port cannot interleave with them.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Returns the register bus. Only returns `Some` on the first call.
    pub fn take() -> Option<Self> {
        let _: &'static mut bool = cortex_m::singleton!(: bool = false)?;
        Some(Mmio { _private: () })
    }

    /// Create a register bus without the singleton check
    ///
    /// # Safety
    ///
    /// Two [`Mmio`] instances must not write the same pin's registers
    /// concurrently.
    #[inline]
    pub unsafe fn steal() -> Self {
        Mmio { _private: () }
    }
}

impl RegisterRead for Mmio {
    #[inline]
    fn read(&self, reg: Reg) -> u32 {
        pac_read(reg)
    }
}

impl RegisterBus for Mmio {
    #[inline]
    fn write(&mut self, reg: Reg, value: u32) {
        pac_write(reg, value)
    }

    #[inline]
    fn modify<F: FnOnce(u32) -> u32>(&mut self, reg: Reg, f: F) {
        cortex_m::interrupt::free(|_| pac_write(reg, f(pac_read(reg))))
    }
}

/// Read-only view of the GPIO registers
///
/// Reading GPIODATA has no side effects, so any number of readers may exist
/// next to the [`Mmio`] bus.
#[derive(Debug, Default, Clone, Copy)]
pub struct MmioReader;

impl RegisterRead for MmioReader {
    #[inline]
    fn read(&self, reg: Reg) -> u32 {
        pac_read(reg)
    }
}

//==================================================================================================
//  ModeFields
//==================================================================================================

/// Collect all fields needed to set a [`PinMode`]
#[derive(Debug, Default, PartialEq, Eq)]
struct ModeFields {
    analog: bool,
    alternate: bool,
    pctl: u8,
}

impl From<PinMode> for ModeFields {
    #[inline]
    fn from(mode: PinMode) -> Self {
        match mode {
            PinMode::Gpio => ModeFields::default(),
            PinMode::Analog => ModeFields {
                analog: true,
                ..Default::default()
            },
            alt => ModeFields {
                alternate: true,
                pctl: alt.pctl(),
                ..Default::default()
            },
        }
    }
}

//==================================================================================================
//  Per-pin register access
//==================================================================================================

/// Register interface scoped to a single pin
///
/// Every method touches only the bits that belong to `id`, so two
/// [`PinRegisters`] for different pins never disturb each other.
pub(crate) struct PinRegisters<'a, B: RegisterBus> {
    id: PinId,
    bus: &'a mut B,
}

impl<'a, B: RegisterBus> PinRegisters<'a, B> {
    #[inline]
    pub(crate) fn new(id: PinId, bus: &'a mut B) -> Self {
        PinRegisters { id, bus }
    }

    #[inline]
    fn reg(&self, reg: PortReg) -> Reg {
        Reg::Port(self.id.port(), reg)
    }

    #[inline]
    fn mask(&self) -> u32 {
        self.id.mask()
    }

    #[inline]
    fn write_bit(&mut self, reg: PortReg, bit: bool) {
        let (reg, mask) = (self.reg(reg), self.mask());
        if bit {
            self.bus.set_bits(reg, mask);
        } else {
            self.bus.clear_bits(reg, mask);
        }
    }

    /// Open the commit register for this pin
    pub(crate) fn unlock(&mut self) {
        let lock = self.reg(PortReg::Lock);
        self.bus.write(lock, GPIO_LOCK_KEY);
        self.write_bit(PortReg::Cr, true);
    }

    /// Change the pin mode
    ///
    /// The digital enable bit is cleared first when going analog and set last
    /// otherwise, so the pin is never driven digitally while the analog
    /// path is selected.
    pub(crate) fn change_mode(&mut self, mode: PinMode) {
        let ModeFields {
            analog,
            alternate,
            pctl,
        } = mode.into();
        if analog {
            self.write_bit(PortReg::Den, false);
            self.write_bit(PortReg::Afsel, false);
            self.write_pctl(0);
            self.write_bit(PortReg::Amsel, true);
        } else {
            self.write_bit(PortReg::Amsel, false);
            self.write_bit(PortReg::Afsel, alternate);
            self.write_pctl(pctl);
            self.write_bit(PortReg::Den, true);
        }
    }

    #[inline]
    fn write_pctl(&mut self, code: u8) {
        let shift = u32::from(self.id.num()) * 4;
        let reg = self.reg(PortReg::Pctl);
        self.bus
            .modify(reg, |r| (r & !(0xF << shift)) | (u32::from(code & 0xF) << shift));
    }

    /// Set the direction of a pin
    #[inline]
    pub(crate) fn set_dir(&mut self, output: bool) {
        self.write_bit(PortReg::Dir, output);
    }

    /// Write the logic level of an output pin
    #[inline]
    pub(crate) fn write_pin(&mut self, level: Level) {
        self.write_bit(PortReg::Data, level.is_high());
    }

    pub(crate) fn set_pull(&mut self, pull: Pull) {
        let (up, down) = match pull {
            Pull::None => (false, false),
            Pull::PullUp => (true, false),
            Pull::PullDown => (false, true),
        };
        self.write_bit(PortReg::Pur, up);
        self.write_bit(PortReg::Pdr, down);
    }
}

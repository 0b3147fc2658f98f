//! # Port clock gating
//!
//! A port's registers can only be accessed after its clock gate in RCGC2 has
//! been opened. The hardware needs a few cycles before the port responds.
//! Reading the gating register back once covers that delay.
use crate::gpio::reg::{Reg, RegisterBus, RegisterRead};
use crate::gpio::PortId;

#[inline]
pub fn is_port_clock_enabled<R: RegisterRead>(regs: &R, port: PortId) -> bool {
    regs.read(Reg::Rcgc2) & (1 << port.index()) != 0
}

/// Open the clock gate of `port` unless it is already open
///
/// Returns `true` if the gate had to be opened.
pub fn enable_port_clock<B: RegisterBus>(bus: &mut B, port: PortId) -> bool {
    if is_port_clock_enabled(&*bus, port) {
        return false;
    }
    bus.set_bits(Reg::Rcgc2, 1 << port.index());
    // Settle delay
    let _ = bus.read(Reg::Rcgc2);
    true
}

//! # GPIO module
//!
//! Building blocks for the [`Port`](crate::port::Port) driver:
//!
//! - [`pins`] names the pins of the package ([`PinId`], [`PA0`] … [`PF4`]) and
//!   the pin-level values ([`Level`], [`Direction`], [`Pull`]).
//! - [`capability`] is the static pin-mux table. It says which [`PinMode`]s a
//!   pin accepts and which pins are lock-protected or reserved for the debug
//!   interface.
//! - [`reg`] is the register map and the [`RegisterBus`] primitive that every
//!   hardware access goes through.
//! - [`channel`] provides [`Channel`], a value-level input implementing the
//!   embedded HAL `InputPin` trait.
pub mod capability;
pub use capability::*;

pub mod channel;
pub use channel::Channel;

pub mod pins;
pub use pins::*;

pub mod reg;
pub use reg::{Mmio, MmioReader, RegisterBus, RegisterRead};

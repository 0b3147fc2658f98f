//! Port driver and debounced push-button for the TM4C123GH6PM
//!
//! - [`gpio`]: pin identifiers, the pin capability table and the register
//!   interface
//! - [`port`]: the [`Port`](port::Port) configurator
//! - [`button`]: a run-length debounced [`Button`](button::Button)
//! - [`board`]: pin assignment of the EK-TM4C123GXL LaunchPad
#![cfg_attr(not(test), no_std)]

pub use tm4c123x;
pub use tm4c123x as pac;

pub mod board;
pub mod button;
pub mod clock;
pub mod gpio;
pub mod port;
pub mod prelude;

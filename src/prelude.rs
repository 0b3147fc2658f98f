//! Prelude

// embedded-hal doesn’t yet have v2 in its prelude, so we need to
// export it ourselves
pub use embedded_hal::digital::v2::InputPin as _embedded_hal_gpio_InputPin;

pub use crate::gpio::reg::RegisterBus as _tm4c123_port_RegisterBus;
pub use crate::gpio::reg::RegisterRead as _tm4c123_port_RegisterRead;
pub use crate::port::ErrorSink as _tm4c123_port_ErrorSink;

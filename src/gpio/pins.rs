//! # Pin identifiers and pin-level values
//!
//! A [`PinId`] names one physical I/O line by its port group and its number
//! within that group. The TM4C123GH6PM bonds out 43 GPIO lines: ports A to D
//! carry eight pins each, port E carries six and port F carries five. A
//! [`PinId`] can only be created for a pin that exists on the package, so
//! every lookup keyed by a [`PinId`] is total.
//!
//! Each pin is also available as a named constant, e.g. [`PF4`].
//!
//! ```
//! use tm4c123_port::gpio::{PinId, PortId, PF4};
//!
//! assert_eq!(PinId::new(PortId::F, 4), Some(PF4));
//! assert_eq!(PinId::new(PortId::F, 5), None);
//! ```

use paste::paste;

//==================================================================================================
//  Pin-level values
//==================================================================================================

/// Logic level of a pin
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low = 0,
    High = 1,
}

impl Level {
    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    #[inline]
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Data direction of a pin
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Internal resistor attached to an input pin
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    PullUp,
    PullDown,
}

//==================================================================================================
//  PortId & PinId
//==================================================================================================

/// Value-level `enum` for the port groups
///
/// The discriminant is the bit position of the port in the clock gating
/// register.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortId {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
}

impl PortId {
    pub const ALL: [PortId; 6] = [
        PortId::A,
        PortId::B,
        PortId::C,
        PortId::D,
        PortId::E,
        PortId::F,
    ];

    /// Number of pins bonded out on this port
    #[inline]
    pub const fn pin_count(self) -> u8 {
        match self {
            PortId::E => 6,
            PortId::F => 5,
            _ => 8,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Number of GPIO pins on the package
pub const PIN_COUNT: usize = 43;

/// Maximum number of pins in one port group
pub const PINS_PER_PORT: usize = 8;

/// Value-level `struct` representing pin IDs
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    port: PortId,
    num: u8,
}

impl PinId {
    /// Returns `None` if the port does not bond out pin `num`
    #[inline]
    pub const fn new(port: PortId, num: u8) -> Option<Self> {
        if num < port.pin_count() {
            Some(PinId { port, num })
        } else {
            None
        }
    }

    #[inline]
    pub const fn port(self) -> PortId {
        self.port
    }

    #[inline]
    pub const fn num(self) -> u8 {
        self.num
    }

    /// Single-bit mask of this pin in the 8-bit port registers
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << self.num
    }

    /// Flattened `port * 8 + num` key, used to index per-pin tables
    #[inline]
    pub const fn key(self) -> usize {
        self.port.index() * PINS_PER_PORT + self.num as usize
    }
}

//==================================================================================================
//  Pin definitions
//==================================================================================================

macro_rules! declare_pins {
    (
        $($Port:ident: [$($NUM:literal),+],)+
    ) => {
        paste! {
            $($(
                #[doc = "Pin ID representing pin P" $Port $NUM]
                pub const [<P $Port $NUM>]: PinId = PinId {
                    port: PortId::$Port,
                    num: $NUM,
                };
            )+)+

            /// Every pin on the package, in port order
            pub const ALL_PINS: [PinId; PIN_COUNT] = [
                $($([<P $Port $NUM>],)+)+
            ];
        }
    };
}

declare_pins!(
    A: [0, 1, 2, 3, 4, 5, 6, 7],
    B: [0, 1, 2, 3, 4, 5, 6, 7],
    C: [0, 1, 2, 3, 4, 5, 6, 7],
    D: [0, 1, 2, 3, 4, 5, 6, 7],
    E: [0, 1, 2, 3, 4, 5],
    F: [0, 1, 2, 3, 4],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_declared_pin_is_constructible() {
        for id in ALL_PINS {
            assert_eq!(PinId::new(id.port(), id.num()), Some(id));
        }
    }

    #[test]
    fn missing_pins_are_rejected() {
        assert_eq!(PinId::new(PortId::E, 6), None);
        assert_eq!(PinId::new(PortId::E, 7), None);
        assert_eq!(PinId::new(PortId::F, 5), None);
        assert_eq!(PinId::new(PortId::A, 8), None);
    }

    #[test]
    fn keys_are_unique() {
        let mut seen = 0u64;
        for id in ALL_PINS {
            assert_eq!(seen & (1 << id.key()), 0, "{:?} shares a key", id);
            seen |= 1 << id.key();
        }
        assert_eq!(seen.count_ones() as usize, PIN_COUNT);
    }
}

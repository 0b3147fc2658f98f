//! # Pin capability table
//!
//! Static description of what each pin may be configured as. The table is
//! indexed by [`PinId::key`] and built at compile time, so every query is a
//! single array access.
//!
//! Two sets of pins get special treatment:
//!
//! - *Lock-protected* pins (PD7 and PF0) have their alternate function,
//!   pull and digital enable bits locked by hardware. The lock register must
//!   be written with [`GPIO_LOCK_KEY`](super::reg::GPIO_LOCK_KEY) and the
//!   pin's commit bit set before they can be reprogrammed.
//! - *Permanently reserved* pins (PC0 to PC3) carry the JTAG/SWD debug
//!   interface and are never reprogrammed by this crate.

use super::pins::{PinId, PINS_PER_PORT};

//==================================================================================================
//  PinMode
//==================================================================================================

/// Functional mode of a pin
///
/// The discriminant of an alternate function is the PMCx value written into
/// the port control register. Analog has no port control encoding and uses
/// 16 so that every mode fits in a [`ModeSet`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinMode {
    /// Plain digital input/output
    Gpio = 0,
    Af1 = 1,
    Af2 = 2,
    Af3 = 3,
    Af4 = 4,
    Af5 = 5,
    Af6 = 6,
    Af7 = 7,
    Af8 = 8,
    Af9 = 9,
    Af14 = 14,
    Af15 = 15,
    /// Analog input, digital path disabled
    Analog = 16,
}

impl PinMode {
    pub const ALL: [PinMode; 13] = [
        PinMode::Gpio,
        PinMode::Af1,
        PinMode::Af2,
        PinMode::Af3,
        PinMode::Af4,
        PinMode::Af5,
        PinMode::Af6,
        PinMode::Af7,
        PinMode::Af8,
        PinMode::Af9,
        PinMode::Af14,
        PinMode::Af15,
        PinMode::Analog,
    ];

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Value for the pin's 4-bit field in the port control register
    #[inline]
    pub const fn pctl(self) -> u8 {
        match self {
            PinMode::Gpio | PinMode::Analog => 0,
            other => other as u8,
        }
    }
}

//==================================================================================================
//  ModeSet
//==================================================================================================

/// Set of [`PinMode`]s, stored as a bitmask over the mode codes
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeSet(u32);

impl ModeSet {
    pub const EMPTY: ModeSet = ModeSet(0);

    /// The set every pin starts from
    pub const GPIO: ModeSet = ModeSet::EMPTY.with(PinMode::Gpio);

    #[inline]
    pub const fn with(self, mode: PinMode) -> Self {
        ModeSet(self.0 | (1 << mode.code()))
    }

    #[inline]
    pub const fn contains(self, mode: PinMode) -> bool {
        self.0 & (1 << mode.code()) != 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the members in ascending mode code order
    pub fn iter(self) -> impl Iterator<Item = PinMode> {
        PinMode::ALL.into_iter().filter(move |mode| self.contains(*mode))
    }
}

impl FromIterator<PinMode> for ModeSet {
    fn from_iter<T: IntoIterator<Item = PinMode>>(iter: T) -> Self {
        iter.into_iter().fold(ModeSet::EMPTY, ModeSet::with)
    }
}

//==================================================================================================
//  Capability table
//==================================================================================================

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Protection {
    None,
    /// Commit register must be unlocked before the pin is reprogrammed
    Locked,
    /// Debug interface pin, never reprogrammed
    Reserved,
}

#[derive(Clone, Copy)]
struct Capability {
    modes: ModeSet,
    protection: Protection,
}

impl Capability {
    const fn open(modes: ModeSet) -> Self {
        Capability {
            modes,
            protection: Protection::None,
        }
    }

    const fn locked(modes: ModeSet) -> Self {
        Capability {
            modes,
            protection: Protection::Locked,
        }
    }

    const fn reserved() -> Self {
        Capability {
            modes: ModeSet::GPIO,
            protection: Protection::Reserved,
        }
    }
}

/// GPIO plus the listed modes
macro_rules! modes {
    ($($Mode:ident),*) => {
        ModeSet::GPIO $(.with(PinMode::$Mode))*
    };
}

/// Filler for keys that no [`PinId`] maps to (PE6, PE7, PF5 to PF7)
const ABSENT: Capability = Capability::open(ModeSet::EMPTY);

const TABLE_LEN: usize = 6 * PINS_PER_PORT;

#[rustfmt::skip]
const CAPABILITIES: [Capability; TABLE_LEN] = [
    // Port A
    Capability::open(modes![Af1, Af8]),
    Capability::open(modes![Af1, Af8]),
    Capability::open(modes![Af2]),
    Capability::open(modes![Af2]),
    Capability::open(modes![Af2]),
    Capability::open(modes![Af2]),
    Capability::open(modes![Af3, Af5]),
    Capability::open(modes![Af3, Af5]),
    // Port B
    Capability::open(modes![Af1, Af7, Analog]),
    Capability::open(modes![Af1, Af7, Analog]),
    Capability::open(modes![Af3, Af7]),
    Capability::open(modes![Af3, Af7]),
    Capability::open(modes![Af2, Af4, Af7, Af8, Analog]),
    Capability::open(modes![Af2, Af4, Af7, Af8, Analog]),
    Capability::open(modes![Af2, Af4, Af7]),
    Capability::open(modes![Af2, Af4, Af7]),
    // Port C, PC0 to PC3 are JTAG/SWD
    Capability::reserved(),
    Capability::reserved(),
    Capability::reserved(),
    Capability::reserved(),
    Capability::open(modes![Af1, Af2, Af4, Af6, Af7, Af8, Analog]),
    Capability::open(modes![Af1, Af2, Af4, Af6, Af7, Af8, Analog]),
    Capability::open(modes![Af1, Af6, Af7, Af8, Analog]),
    Capability::open(modes![Af1, Af7, Af8, Analog]),
    // Port D
    Capability::open(modes![Af1, Af2, Af3, Af4, Af5, Af7, Analog]),
    Capability::open(modes![Af1, Af2, Af3, Af4, Af5, Af7, Analog]),
    Capability::open(modes![Af1, Af2, Af4, Af7, Af8, Analog]),
    Capability::open(modes![Af1, Af2, Af6, Af7, Af8, Analog]),
    Capability::open(modes![Af1, Af7, Analog]),
    Capability::open(modes![Af1, Af7, Analog]),
    Capability::open(modes![Af1, Af4, Af6, Af7]),
    Capability::locked(modes![Af1, Af6, Af7, Af8]),
    // Port E
    Capability::open(modes![Af1, Analog]),
    Capability::open(modes![Af1, Analog]),
    Capability::open(modes![Analog]),
    Capability::open(modes![Analog]),
    Capability::open(modes![Af1, Af3, Af4, Af5, Af8, Analog]),
    Capability::open(modes![Af1, Af3, Af4, Af5, Af8, Analog]),
    ABSENT,
    ABSENT,
    // Port F
    Capability::locked(modes![Af1, Af2, Af3, Af5, Af6, Af7, Af8, Af9]),
    Capability::open(modes![Af1, Af2, Af5, Af6, Af7, Af9, Af14]),
    Capability::open(modes![Af2, Af4, Af5, Af7, Af14]),
    Capability::open(modes![Af2, Af3, Af5, Af7, Af14]),
    Capability::open(modes![Af5, Af6, Af7, Af8]),
    ABSENT,
    ABSENT,
    ABSENT,
];

#[inline]
const fn capability(id: PinId) -> Capability {
    CAPABILITIES[id.key()]
}

/// Modes the hardware allows on `id`. Always contains [`PinMode::Gpio`].
#[inline]
pub const fn allowed_modes(id: PinId) -> ModeSet {
    capability(id).modes
}

#[inline]
pub const fn is_mode_allowed(id: PinId, mode: PinMode) -> bool {
    allowed_modes(id).contains(mode)
}

/// `true` if the pin must be unlocked through the commit register first
#[inline]
pub const fn is_lock_protected(id: PinId) -> bool {
    matches!(capability(id).protection, Protection::Locked)
}

/// `true` for the debug interface pins, which are never reprogrammed
#[inline]
pub const fn is_permanently_reserved(id: PinId) -> bool {
    matches!(capability(id).protection, Protection::Reserved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::pins::*;

    #[test]
    fn gpio_is_always_allowed() {
        for id in ALL_PINS {
            assert!(is_mode_allowed(id, PinMode::Gpio), "{:?}", id);
            let len = allowed_modes(id).len();
            assert!((1..=9).contains(&len), "{:?} has {} modes", id, len);
        }
    }

    #[test]
    fn protected_pins() {
        let locked: Vec<_> = ALL_PINS.into_iter().filter(|id| is_lock_protected(*id)).collect();
        assert_eq!(locked, [PD7, PF0]);
        let reserved: Vec<_> = ALL_PINS
            .into_iter()
            .filter(|id| is_permanently_reserved(*id))
            .collect();
        assert_eq!(reserved, [PC0, PC1, PC2, PC3]);
    }

    #[test]
    fn reserved_pins_only_know_gpio() {
        for id in [PC0, PC1, PC2, PC3] {
            assert_eq!(allowed_modes(id), ModeSet::GPIO);
        }
    }

    #[test]
    fn spot_checks_against_pin_mux_table() {
        let pf0: Vec<_> = allowed_modes(PF0).iter().collect();
        assert_eq!(
            pf0,
            [
                PinMode::Gpio,
                PinMode::Af1,
                PinMode::Af2,
                PinMode::Af3,
                PinMode::Af5,
                PinMode::Af6,
                PinMode::Af7,
                PinMode::Af8,
                PinMode::Af9
            ]
        );
        assert!(is_mode_allowed(PF1, PinMode::Af14));
        assert!(!is_mode_allowed(PF4, PinMode::Af1));
        assert!(is_mode_allowed(PE2, PinMode::Analog));
        assert!(!is_mode_allowed(PA0, PinMode::Analog));
        assert!(!is_mode_allowed(PD7, PinMode::Analog));
        assert!(is_mode_allowed(PB4, PinMode::Af8));
    }

    #[test]
    fn no_pin_allows_af15() {
        assert!(ALL_PINS
            .into_iter()
            .all(|id| !is_mode_allowed(id, PinMode::Af15)));
    }

    #[test]
    fn mode_set_collects_and_iterates() {
        let set: ModeSet = [PinMode::Analog, PinMode::Af3].into_iter().collect();
        assert!(set.contains(PinMode::Af3));
        assert!(!set.contains(PinMode::Gpio));
        assert_eq!(set.iter().collect::<Vec<_>>(), [PinMode::Af3, PinMode::Analog]);
        assert!(ModeSet::EMPTY.is_empty());
    }

    #[test]
    fn pctl_encoding() {
        assert_eq!(PinMode::Gpio.pctl(), 0);
        assert_eq!(PinMode::Analog.pctl(), 0);
        assert_eq!(PinMode::Af14.pctl(), 14);
    }
}

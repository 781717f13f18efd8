//! SAM D21 peripheral instance handles and clock-gating selectors.
//!
//! These are the "device handles" an external driver resolves to register
//! blocks. They carry no state; the base addresses are hardware constants
//! from the SAM D21 memory map (DS40001882 §10.2, Table 10-1).

use crate::vector::Irq;

// ── SERCOM ───────────────────────────────────────────────────────────────────

/// Serial communication interface instance (UART, SPI or I2C master).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sercom {
    /// SERCOM0
    Sercom0,
    /// SERCOM1
    Sercom1,
    /// SERCOM2
    Sercom2,
    /// SERCOM3
    Sercom3,
    /// SERCOM4
    Sercom4,
    /// SERCOM5
    Sercom5,
}

impl Sercom {
    /// Instance number.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Register block base address.
    #[must_use]
    pub const fn base_address(self) -> u32 {
        match self {
            Self::Sercom0 => 0x4200_0800,
            Self::Sercom1 => 0x4200_0C00,
            Self::Sercom2 => 0x4200_1000,
            Self::Sercom3 => 0x4200_1400,
            Self::Sercom4 => 0x4200_1800,
            Self::Sercom5 => 0x4200_1C00,
        }
    }

    /// Interrupt line.
    #[must_use]
    pub const fn irq(self) -> Irq {
        match self {
            Self::Sercom0 => Irq::Sercom0,
            Self::Sercom1 => Irq::Sercom1,
            Self::Sercom2 => Irq::Sercom2,
            Self::Sercom3 => Irq::Sercom3,
            Self::Sercom4 => Irq::Sercom4,
            Self::Sercom5 => Irq::Sercom5,
        }
    }

    /// APBC clock-gating bit.
    #[must_use]
    pub const fn apbc_mask(self) -> ApbcMask {
        match self {
            Self::Sercom0 => ApbcMask::SERCOM0,
            Self::Sercom1 => ApbcMask::SERCOM1,
            Self::Sercom2 => ApbcMask::SERCOM2,
            Self::Sercom3 => ApbcMask::SERCOM3,
            Self::Sercom4 => ApbcMask::SERCOM4,
            Self::Sercom5 => ApbcMask::SERCOM5,
        }
    }

    /// Core clock channel in `GCLK_CLKCTRL.ID`.
    #[must_use]
    pub const fn gclk_id(self) -> GclkId {
        match self {
            Self::Sercom0 => GclkId::Sercom0Core,
            Self::Sercom1 => GclkId::Sercom1Core,
            Self::Sercom2 => GclkId::Sercom2Core,
            Self::Sercom3 => GclkId::Sercom3Core,
            Self::Sercom4 => GclkId::Sercom4Core,
            Self::Sercom5 => GclkId::Sercom5Core,
        }
    }
}

// ── TC ───────────────────────────────────────────────────────────────────────

/// Timer/counter instance. TC3..TC7 on the J-variant packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tc {
    /// TC3
    Tc3,
    /// TC4
    Tc4,
    /// TC5
    Tc5,
    /// TC6
    Tc6,
    /// TC7
    Tc7,
}

impl Tc {
    /// Instance number (3..=7).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Tc3 => 3,
            Self::Tc4 => 4,
            Self::Tc5 => 5,
            Self::Tc6 => 6,
            Self::Tc7 => 7,
        }
    }

    /// Register block base address.
    #[must_use]
    pub const fn base_address(self) -> u32 {
        match self {
            Self::Tc3 => 0x4200_2C00,
            Self::Tc4 => 0x4200_3000,
            Self::Tc5 => 0x4200_3400,
            Self::Tc6 => 0x4200_3800,
            Self::Tc7 => 0x4200_3C00,
        }
    }

    /// Interrupt line.
    #[must_use]
    pub const fn irq(self) -> Irq {
        match self {
            Self::Tc3 => Irq::Tc3,
            Self::Tc4 => Irq::Tc4,
            Self::Tc5 => Irq::Tc5,
            Self::Tc6 => Irq::Tc6,
            Self::Tc7 => Irq::Tc7,
        }
    }

    /// APBC clock-gating bit.
    #[must_use]
    pub const fn apbc_mask(self) -> ApbcMask {
        match self {
            Self::Tc3 => ApbcMask::TC3,
            Self::Tc4 => ApbcMask::TC4,
            Self::Tc5 => ApbcMask::TC5,
            Self::Tc6 => ApbcMask::TC6,
            Self::Tc7 => ApbcMask::TC7,
        }
    }

    /// Shared generic-clock channel. Channels are wired to TC pairs, and
    /// TC3 shares its channel with TCC2.
    #[must_use]
    pub const fn gclk_id(self) -> GclkId {
        match self {
            Self::Tc3 => GclkId::Tcc2Tc3,
            Self::Tc4 | Self::Tc5 => GclkId::Tc4Tc5,
            Self::Tc6 | Self::Tc7 => GclkId::Tc6Tc7,
        }
    }

    /// The slave counter this instance pairs with in 32-bit mode.
    ///
    /// Only even-numbered TCs can act as 32-bit masters.
    #[must_use]
    pub const fn count32_slave(self) -> Option<Self> {
        match self {
            Self::Tc4 => Some(Self::Tc5),
            Self::Tc6 => Some(Self::Tc7),
            Self::Tc3 | Self::Tc5 | Self::Tc7 => None,
        }
    }
}

// ── PM APBC mask ─────────────────────────────────────────────────────────────

/// Power-manager APBC clock-gating bits (`PM_APBCMASK_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ApbcMask(u32);

impl ApbcMask {
    /// PAC2
    pub const PAC2: Self = Self(1 << 0);
    /// EVSYS
    pub const EVSYS: Self = Self(1 << 1);
    /// SERCOM0
    pub const SERCOM0: Self = Self(1 << 2);
    /// SERCOM1
    pub const SERCOM1: Self = Self(1 << 3);
    /// SERCOM2
    pub const SERCOM2: Self = Self(1 << 4);
    /// SERCOM3
    pub const SERCOM3: Self = Self(1 << 5);
    /// SERCOM4
    pub const SERCOM4: Self = Self(1 << 6);
    /// SERCOM5
    pub const SERCOM5: Self = Self(1 << 7);
    /// TCC0
    pub const TCC0: Self = Self(1 << 8);
    /// TCC1
    pub const TCC1: Self = Self(1 << 9);
    /// TCC2
    pub const TCC2: Self = Self(1 << 10);
    /// TC3
    pub const TC3: Self = Self(1 << 11);
    /// TC4
    pub const TC4: Self = Self(1 << 12);
    /// TC5
    pub const TC5: Self = Self(1 << 13);
    /// TC6
    pub const TC6: Self = Self(1 << 14);
    /// TC7
    pub const TC7: Self = Self(1 << 15);
    /// ADC
    pub const ADC: Self = Self(1 << 16);

    /// Raw register bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Bitwise union, usable in `static` tables.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// `true` if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for ApbcMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

// ── GCLK channel ids ─────────────────────────────────────────────────────────

/// Generic clock multiplexer channel (`GCLK_CLKCTRL_ID_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GclkId {
    /// DFLL48M reference
    Dfll48 = 0x00,
    /// FDPLL96M input clock
    Fdpll = 0x01,
    /// FDPLL96M 32 kHz clock
    Fdpll32k = 0x02,
    /// WDT
    Wdt = 0x03,
    /// RTC
    Rtc = 0x04,
    /// EIC
    Eic = 0x05,
    /// USB
    Usb = 0x06,
    /// SERCOMx slow clock
    SercomSlow = 0x13,
    /// SERCOM0 core
    Sercom0Core = 0x14,
    /// SERCOM1 core
    Sercom1Core = 0x15,
    /// SERCOM2 core
    Sercom2Core = 0x16,
    /// SERCOM3 core
    Sercom3Core = 0x17,
    /// SERCOM4 core
    Sercom4Core = 0x18,
    /// SERCOM5 core
    Sercom5Core = 0x19,
    /// TCC0 and TCC1
    Tcc0Tcc1 = 0x1A,
    /// TCC2 and TC3
    Tcc2Tc3 = 0x1B,
    /// TC4 and TC5
    Tc4Tc5 = 0x1C,
    /// TC6 and TC7
    Tc6Tc7 = 0x1D,
    /// ADC
    Adc = 0x1E,
}

impl GclkId {
    /// Raw `CLKCTRL.ID` value.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tc_pairs_for_count32() {
        assert_eq!(Tc::Tc4.count32_slave(), Some(Tc::Tc5));
        assert_eq!(Tc::Tc6.count32_slave(), Some(Tc::Tc7));
        assert_eq!(Tc::Tc3.count32_slave(), None);
        assert_eq!(Tc::Tc5.count32_slave(), None);
    }

    #[test]
    fn paired_tcs_share_a_gclk_channel() {
        assert_eq!(Tc::Tc4.gclk_id(), Tc::Tc5.gclk_id());
        assert_eq!(Tc::Tc6.gclk_id(), Tc::Tc7.gclk_id());
        assert_eq!(Tc::Tc3.gclk_id().id(), 0x1B);
    }

    #[test]
    fn apbc_union_contains_both_units() {
        let mask = ApbcMask::TC4 | ApbcMask::TC5;
        assert!(mask.contains(ApbcMask::TC4));
        assert!(mask.contains(ApbcMask::TC5));
        assert!(!mask.contains(ApbcMask::TC3));
        assert_eq!(mask.bits(), 0x3000);
    }

    #[test]
    fn sercom_lookups_are_consistent() {
        assert_eq!(Sercom::Sercom5.index(), 5);
        assert_eq!(Sercom::Sercom5.irq(), Irq::Sercom5);
        assert_eq!(Sercom::Sercom5.apbc_mask(), ApbcMask::SERCOM5);
        assert_eq!(Sercom::Sercom0.gclk_id().id(), 0x14);
    }
}

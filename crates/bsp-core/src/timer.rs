//! TC timer descriptors.
//!
//! A logical 32-bit timer on the SAM D21 is two 16-bit TCs chained together:
//! the even-numbered master (TC4, TC6) and its odd slave (TC5, TC7). The
//! descriptor names only the master, so its clock-gating mask has to cover
//! both units and its generic-clock channel has to be the pair's shared one.

use crate::clock::GeneratorId;
use crate::descriptor::{Descriptor, PeripheralClass, Routes};
use crate::device::{ApbcMask, GclkId, Tc};
use crate::vector::Irq;

/// `TC_CTRLA.PRESCALER` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TcPrescaler {
    /// GCLK_TC / 1
    Div1,
    /// GCLK_TC / 2
    Div2,
    /// GCLK_TC / 4
    Div4,
    /// GCLK_TC / 8
    Div8,
    /// GCLK_TC / 16
    Div16,
    /// GCLK_TC / 64
    Div64,
    /// GCLK_TC / 256
    Div256,
    /// GCLK_TC / 1024
    Div1024,
}

impl TcPrescaler {
    /// Division factor.
    #[must_use]
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Div1 => 1,
            Self::Div2 => 2,
            Self::Div4 => 4,
            Self::Div8 => 8,
            Self::Div16 => 16,
            Self::Div64 => 64,
            Self::Div256 => 256,
            Self::Div1024 => 1024,
        }
    }

    /// Field value (bits 10:8 of CTRLA).
    #[must_use]
    pub const fn field(self) -> u16 {
        self as u16
    }
}

/// `TC_CTRLA.MODE`: counter width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterWidth {
    /// Single TC, 16-bit.
    Count16,
    /// Master/slave TC pair, 32-bit.
    Count32,
}

impl CounterWidth {
    /// `TIMER_n_MAX_VALUE`.
    #[must_use]
    pub const fn max_value(self) -> u32 {
        match self {
            Self::Count16 => 0xFFFF,
            Self::Count32 => 0xFFFF_FFFF,
        }
    }
}

/// One entry of a board's timer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timer {
    /// TC instance (the master for 32-bit timers).
    pub dev: Tc,
    /// Interrupt line.
    pub irq: Irq,
    /// APBC units gated on by the driver.
    pub pm_mask: ApbcMask,
    /// Generic clock channel.
    pub gclk_ctrl: GclkId,
    /// Generator feeding the channel.
    pub gclk_src: GeneratorId,
    /// Prescaler applied inside the TC.
    pub prescaler: TcPrescaler,
    /// Counter width.
    pub width: CounterWidth,
}

impl Timer {
    /// Count frequency once the generator and prescaler are applied, `None`
    /// if `gclk_src` is not running under `clock`.
    #[must_use]
    pub const fn tick_hz(&self, clock: &crate::clock::ClockConfig) -> Option<u32> {
        match clock.generator_hz(self.gclk_src) {
            Some(hz) => hz.checked_div(self.prescaler.divisor()),
            None => None,
        }
    }

    /// Largest counter value.
    #[must_use]
    pub const fn max_value(&self) -> u32 {
        self.width.max_value()
    }

    /// APBC bits this timer has to gate on: its own unit, plus the slave for
    /// a 32-bit pair. `None` if `dev` cannot master a 32-bit pair.
    #[must_use]
    pub const fn required_pm_mask(&self) -> Option<ApbcMask> {
        match self.width {
            CounterWidth::Count16 => Some(self.dev.apbc_mask()),
            CounterWidth::Count32 => match self.dev.count32_slave() {
                Some(slave) => Some(self.dev.apbc_mask().union(slave.apbc_mask())),
                None => None,
            },
        }
    }

    /// The TC consumed as a slave, for 32-bit timers.
    #[must_use]
    pub const fn slave(&self) -> Option<Tc> {
        match self.width {
            CounterWidth::Count16 => None,
            CounterWidth::Count32 => self.dev.count32_slave(),
        }
    }
}

impl Descriptor for Timer {
    const CLASS: PeripheralClass = PeripheralClass::Timer;

    fn routes(&self) -> Routes {
        Routes::new()
    }

    fn clock_source(&self) -> Option<GeneratorId> {
        Some(self.gclk_src)
    }

    fn irq(&self) -> Option<Irq> {
        Some(self.irq)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clock::ClockConfig;

    fn tc4_count32() -> Timer {
        Timer {
            dev: Tc::Tc4,
            irq: Irq::Tc4,
            pm_mask: ApbcMask::TC4.union(ApbcMask::TC5),
            gclk_ctrl: GclkId::Tc4Tc5,
            gclk_src: GeneratorId::PLL_REF,
            prescaler: TcPrescaler::Div1,
            width: CounterWidth::Count32,
        }
    }

    #[test]
    fn count32_requires_both_halves_gated() {
        let timer = tc4_count32();
        assert_eq!(timer.required_pm_mask(), Some(timer.pm_mask));
        assert_eq!(timer.slave(), Some(Tc::Tc5));
        assert_eq!(timer.max_value(), 0xFFFF_FFFF);
    }

    #[test]
    fn odd_tc_cannot_master_count32() {
        let timer = Timer {
            dev: Tc::Tc5,
            ..tc4_count32()
        };
        assert_eq!(timer.required_pm_mask(), None);
    }

    #[test]
    fn tick_rate_follows_clock_strategy() {
        let timer = tc4_count32();
        assert_eq!(timer.tick_hz(&ClockConfig::pll(47, 1)), Some(1_000_000));
        // GCLK1 is not configured without the PLL.
        assert_eq!(timer.tick_hz(&ClockConfig::direct(1)), None);
    }

    #[test]
    fn prescaler_fields_are_sequential() {
        assert_eq!(TcPrescaler::Div1.field(), 0);
        assert_eq!(TcPrescaler::Div8.field(), 3);
        assert_eq!(TcPrescaler::Div1024.field(), 7);
        assert_eq!(TcPrescaler::Div1024.divisor(), 1024);
    }
}

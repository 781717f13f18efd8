//! Core clock derivation for SAM D21 boards.
//!
//! Every SODAQ board picks one of two strategies at build time:
//!
//! - **PLL**: the internal 8 MHz oscillator divided by 8 (1 MHz, routed through
//!   GCLK1) feeds the FDPLL96M, which multiplies it by `mul + 1`. GCLK0 then
//!   divides the PLL output by `div`.
//! - **Direct**: the internal 8 MHz oscillator drives GCLK0 directly, divided
//!   by `div`.
//!
//! ```text
//! PLL:    CORECLOCK = ((mul + 1) * 1 MHz) / div      31 <= mul <= 95
//! Direct: CORECLOCK = 8 MHz / div                    div > 0
//! ```
//!
//! The derived value is the single source of truth for every consumer on a
//! board: timer tick rate, I2C/UART baud generators, RTT scaling.
//!
//! # Sources
//!
//! - SAM D21 datasheet (DS40001882) §17 GCLK, §17.6.2.7 FDPLL96M, Table 37-7
//!   (FDPLL96M output range 48–96 MHz; lock reached from 32 MHz in practice)

use crate::timer::TcPrescaler;

/// Internal OSC8M oscillator frequency.
pub const OSC8M_HZ: u32 = 8_000_000;

/// FDPLL96M reference: OSC8M / 8 through GCLK1.
pub const PLL_REFERENCE_HZ: u32 = 1_000_000;

/// Smallest PLL multiplier that keeps the loop above its 32 MHz lock floor.
pub const PLL_MUL_MIN: u32 = 31;

/// Largest PLL multiplier that keeps the loop below its 96 MHz ceiling.
pub const PLL_MUL_MAX: u32 = 95;

/// Core clocks below this are accepted but not recommended.
pub const RECOMMENDED_MIN_HZ: u32 = 1_000_000;

/// GCLK2 frequency (OSCULP32K / XOSC32K), used by RTC and RTT.
pub const LOW_POWER_CLOCK_HZ: u32 = 32_768;

/// Number of generic clock generators on the SAM D21 (GCLK0..GCLK8).
pub const GENERATOR_COUNT: u8 = 9;

// ── Generators ───────────────────────────────────────────────────────────────

/// A generic clock generator selector (`GCLK_CLKCTRL_GEN(n)`).
///
/// Construction is unchecked on purpose so board tables read like the
/// datasheet; [`GeneratorId::is_present`] and the board linter reject ids the
/// family does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GeneratorId(u8);

impl GeneratorId {
    /// GCLK0: main clock, always equal to the derived core clock.
    pub const CORE: Self = Self(0);
    /// GCLK1: 1 MHz PLL reference (only running with the PLL strategy).
    pub const PLL_REF: Self = Self(1);
    /// GCLK2: 32.768 kHz low-power clock.
    pub const LOW_POWER: Self = Self(2);

    /// Select generator `n`.
    #[must_use]
    pub const fn gen(n: u8) -> Self {
        Self(n)
    }

    /// Generator index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// `true` if the SAM D21 implements this generator.
    #[must_use]
    pub const fn is_present(self) -> bool {
        self.0 < GENERATOR_COUNT
    }
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// Invalid clock configuration. Always a board-authoring defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// PLL multiplier outside `PLL_MUL_MIN..=PLL_MUL_MAX`.
    PllMultiplierOutOfRange {
        /// The configured multiplier.
        mul: u32,
    },
    /// Divisor of zero.
    ZeroDivisor,
    /// Divisor so large the integer result truncates to 0 Hz.
    ZeroFrequency,
}

#[cfg(feature = "std")]
impl std::error::Error for ClockError {}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PllMultiplierOutOfRange { mul } => write!(
                f,
                "PLL multiplier {mul} outside {PLL_MUL_MIN}..={PLL_MUL_MAX} (lock range 32-96 MHz)"
            ),
            Self::ZeroDivisor => write!(f, "clock divisor must be non-zero"),
            Self::ZeroFrequency => write!(f, "clock divisor truncates core clock to 0 Hz"),
        }
    }
}

// ── ClockConfig ──────────────────────────────────────────────────────────────

/// Build-time clock strategy for one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockConfig {
    /// FDPLL96M fed by the 1 MHz reference, output divided by `div`.
    Pll {
        /// `CLOCK_PLL_MUL`: loop multiplies the reference by `mul + 1`.
        mul: u32,
        /// `CLOCK_PLL_DIV`: GCLK0 divider applied to the PLL output.
        div: u32,
    },
    /// OSC8M straight into GCLK0, divided by `div`.
    Direct {
        /// `CLOCK_DIV`
        div: u32,
    },
}

impl ClockConfig {
    /// PLL strategy.
    #[must_use]
    pub const fn pll(mul: u32, div: u32) -> Self {
        Self::Pll { mul, div }
    }

    /// Direct-division strategy.
    #[must_use]
    pub const fn direct(div: u32) -> Self {
        Self::Direct { div }
    }

    /// Derive the core clock, rejecting out-of-range parameters.
    ///
    /// Integer division truncates, matching the hardware's own quantisation.
    ///
    /// # Errors
    ///
    /// [`ClockError`] naming the first violated constraint.
    pub const fn validate(&self) -> Result<u32, ClockError> {
        match *self {
            Self::Pll { mul, div } => {
                if mul < PLL_MUL_MIN || mul > PLL_MUL_MAX {
                    return Err(ClockError::PllMultiplierOutOfRange { mul });
                }
                let Some(vco) = Self::pll_vco_hz(mul) else {
                    return Err(ClockError::PllMultiplierOutOfRange { mul });
                };
                Self::divide(vco, div)
            }
            Self::Direct { div } => Self::divide(OSC8M_HZ, div),
        }
    }

    /// The derived core clock in Hz, or 0 for an invalid configuration.
    ///
    /// Board crates pair this with a `const` assertion on [`Self::validate`],
    /// so a 0 can never reach firmware.
    #[must_use]
    pub const fn core_clock_hz(&self) -> u32 {
        match self.validate() {
            Ok(hz) => hz,
            Err(_) => 0,
        }
    }

    /// `true` for the PLL strategy.
    #[must_use]
    pub const fn uses_pll(&self) -> bool {
        matches!(self, Self::Pll { .. })
    }

    /// FDPLL96M output before the GCLK0 divider, if the PLL is used.
    #[must_use]
    pub const fn pll_output_hz(&self) -> Option<u32> {
        match *self {
            Self::Pll { mul, .. } => Self::pll_vco_hz(mul),
            Self::Direct { .. } => None,
        }
    }

    /// Core clock below 1 MHz: legal, but flagged for review.
    #[must_use]
    pub const fn is_below_recommended(&self) -> bool {
        match self.validate() {
            Ok(hz) => hz < RECOMMENDED_MIN_HZ,
            Err(_) => false,
        }
    }

    /// Frequency of generator `gen` under this strategy, `None` if the
    /// generator is not configured by bring-up.
    #[must_use]
    pub const fn generator_hz(&self, gen: GeneratorId) -> Option<u32> {
        match gen.index() {
            0 => match self.validate() {
                Ok(hz) => Some(hz),
                Err(_) => None,
            },
            1 if self.uses_pll() => Some(PLL_REFERENCE_HZ),
            2 => Some(LOW_POWER_CLOCK_HZ),
            _ => None,
        }
    }

    /// Clock source and prescaler for TC timers.
    ///
    /// With the PLL running, GCLK1 already provides 1 MHz; otherwise GCLK0
    /// (8 MHz at `div == 1`) is prescaled by 8.
    #[must_use]
    pub const fn timer_source(&self) -> (GeneratorId, TcPrescaler) {
        if self.uses_pll() {
            (GeneratorId::PLL_REF, TcPrescaler::Div1)
        } else {
            (GeneratorId::CORE, TcPrescaler::Div8)
        }
    }

    /// Flash wait states needed at this core clock (one above 24 MHz).
    #[must_use]
    pub const fn flash_wait_states(&self) -> u8 {
        if self.core_clock_hz() > 24_000_000 {
            1
        } else {
            0
        }
    }

    const fn pll_vco_hz(mul: u32) -> Option<u32> {
        match mul.checked_add(1) {
            Some(steps) => steps.checked_mul(PLL_REFERENCE_HZ),
            None => None,
        }
    }

    const fn divide(hz: u32, div: u32) -> Result<u32, ClockError> {
        match hz.checked_div(div) {
            None => Err(ClockError::ZeroDivisor),
            Some(0) => Err(ClockError::ZeroFrequency),
            Some(out) => Ok(out),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn pll_47_div_1_is_48_mhz() {
        assert_eq!(ClockConfig::pll(47, 1).core_clock_hz(), 48_000_000);
    }

    #[test]
    fn pll_boundary_multipliers() {
        assert_eq!(ClockConfig::pll(31, 1).validate(), Ok(32_000_000));
        assert_eq!(ClockConfig::pll(95, 1).validate(), Ok(96_000_000));
    }

    #[test]
    fn pll_multiplier_outside_lock_range_is_rejected() {
        assert_eq!(
            ClockConfig::pll(30, 1).validate(),
            Err(ClockError::PllMultiplierOutOfRange { mul: 30 })
        );
        assert_eq!(
            ClockConfig::pll(96, 1).validate(),
            Err(ClockError::PllMultiplierOutOfRange { mul: 96 })
        );
    }

    #[test]
    fn pll_division_truncates() {
        // 48 MHz / 7 = 6_857_142.857...
        assert_eq!(ClockConfig::pll(47, 7).core_clock_hz(), 6_857_142);
    }

    #[test]
    fn direct_div_1_is_8_mhz() {
        assert_eq!(ClockConfig::direct(1).validate(), Ok(8_000_000));
    }

    #[test]
    fn zero_divisor_is_rejected() {
        assert_eq!(ClockConfig::direct(0).validate(), Err(ClockError::ZeroDivisor));
        assert_eq!(ClockConfig::pll(47, 0).validate(), Err(ClockError::ZeroDivisor));
        assert_eq!(ClockConfig::direct(0).core_clock_hz(), 0);
    }

    #[test]
    fn huge_divisor_truncating_to_zero_is_rejected() {
        assert_eq!(
            ClockConfig::direct(8_000_001).validate(),
            Err(ClockError::ZeroFrequency)
        );
    }

    #[test]
    fn sub_megahertz_is_accepted_but_flagged() {
        let slow = ClockConfig::direct(16);
        assert_eq!(slow.validate(), Ok(500_000));
        assert!(slow.is_below_recommended());
        assert!(!ClockConfig::direct(8).is_below_recommended());
    }

    #[test]
    fn pll_reference_generator_only_runs_with_pll() {
        let pll = ClockConfig::pll(47, 1);
        let direct = ClockConfig::direct(1);
        assert_eq!(pll.generator_hz(GeneratorId::PLL_REF), Some(1_000_000));
        assert_eq!(direct.generator_hz(GeneratorId::PLL_REF), None);
        assert_eq!(pll.generator_hz(GeneratorId::CORE), Some(48_000_000));
        assert_eq!(direct.generator_hz(GeneratorId::LOW_POWER), Some(32_768));
        assert_eq!(pll.generator_hz(GeneratorId::gen(5)), None);
    }

    #[test]
    fn timer_tick_is_one_megahertz_for_both_strategies() {
        for cfg in [ClockConfig::pll(47, 1), ClockConfig::direct(1)] {
            let (gen, presc) = cfg.timer_source();
            let hz = cfg.generator_hz(gen).unwrap();
            assert_eq!(hz / presc.divisor(), 1_000_000);
        }
    }

    #[test]
    fn generator_presence() {
        assert!(GeneratorId::gen(8).is_present());
        assert!(!GeneratorId::gen(9).is_present());
    }

    #[test]
    fn wait_states_follow_core_clock() {
        assert_eq!(ClockConfig::pll(47, 1).flash_wait_states(), 1);
        assert_eq!(ClockConfig::direct(1).flash_wait_states(), 0);
    }
}

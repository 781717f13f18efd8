//! Peripheral configuration for SODAQ SAM D21 boards
//!
//! One module per board. Each module is pure data: the clock strategy, an
//! immutable `static` table per peripheral class with its `*_NUMOF`, the
//! vector bindings, and the aggregate [`Board`] the linter and the firmware
//! read. The tables are typed `[T; *_NUMOF]`, so an advertised count that
//! disagrees with the entries does not compile.
//!
//! # Board selection
//!
//! | Feature | `active` |
//! |---|---|
//! | `sodaq-explorer` | [`sodaq_explorer`] |
//! | otherwise (`sodaq-one`, default) | [`sodaq_one`] |
//!
//! # Clock selection
//!
//! Both boards run the PLL at 48 MHz. `clock-direct` switches GCLK0 to the
//! undivided 8 MHz oscillator; timers follow automatically.

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)]

use bsp_core::{ApbcMask, Board, ClockConfig, CounterWidth, GclkId, Irq, Tc, Timer};

pub mod sodaq_explorer;
pub mod sodaq_one;

#[cfg(feature = "sodaq-explorer")]
pub use sodaq_explorer as active;

#[cfg(not(feature = "sodaq-explorer"))]
pub use sodaq_one as active;

/// Every board this crate describes, for tooling that checks them all.
pub static ALL_BOARDS: [&Board; 2] = [&sodaq_explorer::BOARD, &sodaq_one::BOARD];

/// Pick the board's PLL or direct clock according to `clock-direct`.
pub(crate) const fn select_clock(pll: ClockConfig, direct: ClockConfig) -> ClockConfig {
    if cfg!(feature = "clock-direct") {
        direct
    } else {
        pll
    }
}

/// TC3 as a 16-bit system timer and TC4/TC5 as a 32-bit timer, both ticking
/// from the clock-strategy timer source.
pub(crate) const fn sodaq_timers(clock: &ClockConfig) -> [Timer; 2] {
    let (gclk_src, prescaler) = clock.timer_source();
    [
        // Timer 0: system clock
        Timer {
            dev: Tc::Tc3,
            irq: Irq::Tc3,
            pm_mask: ApbcMask::TC3,
            gclk_ctrl: GclkId::Tcc2Tc3,
            gclk_src,
            prescaler,
            width: CounterWidth::Count16,
        },
        Timer {
            dev: Tc::Tc4,
            irq: Irq::Tc4,
            pm_mask: ApbcMask::TC4.union(ApbcMask::TC5),
            gclk_ctrl: GclkId::Tc4Tc5,
            gclk_src,
            prescaler,
            width: CounterWidth::Count32,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_source_follows_clock_strategy() {
        let [pll0, _] = sodaq_timers(&ClockConfig::pll(47, 1));
        let [direct0, _] = sodaq_timers(&ClockConfig::direct(1));
        assert_eq!(pll0.gclk_src, bsp_core::GeneratorId::PLL_REF);
        assert_eq!(direct0.gclk_src, bsp_core::GeneratorId::CORE);
        assert_eq!(direct0.prescaler, bsp_core::TcPrescaler::Div8);
    }

    #[test]
    fn every_board_is_listed_once() {
        assert_eq!(ALL_BOARDS[0].name, "sodaq-explorer");
        assert_eq!(ALL_BOARDS[1].name, "sodaq-one");
    }

    #[test]
    fn active_board_matches_features() {
        let expected = if cfg!(feature = "sodaq-explorer") {
            "sodaq-explorer"
        } else {
            "sodaq-one"
        };
        assert_eq!(active::BOARD.name, expected);
    }
}

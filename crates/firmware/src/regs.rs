//! SAM D21 register map and field encoders used by bring-up.
//!
//! Pure data: addresses and `const fn` encoders that turn a [`ClockConfig`]
//! into the exact words the hardware collaborator writes. Host tests check
//! the encodings; only `hardware` dereferences the addresses.
//!
//! # Sources
//!
//! - SAM D21 datasheet (DS40001882): §16 PM, §17 SYSCTRL, §15 GCLK,
//!   §22 NVMCTRL, §23 PORT, §32 USB

use bsp_core::{ClockConfig, GeneratorId};

// ── Base addresses ───────────────────────────────────────────────────────────

/// Power manager.
pub const PM_BASE: usize = 0x4000_0400;
/// System controller (oscillators, FDPLL96M).
pub const SYSCTRL_BASE: usize = 0x4000_0800;
/// Generic clock controller.
pub const GCLK_BASE: usize = 0x4000_0C00;
/// NVM controller.
pub const NVMCTRL_BASE: usize = 0x4100_4000;
/// PORT (GPIO) controller, group A. Group B follows at [`PORT_GROUP_STRIDE`].
pub const PORT_BASE: usize = 0x4100_4400;
/// USB controller.
pub const USB_BASE: usize = 0x4100_5000;

// ── Register offsets ────────────────────────────────────────────────────────

/// `PM.APBBMASK` (32 bit).
pub const PM_APBBMASK: usize = PM_BASE + 0x1C;
/// USB bus clock in `APBBMASK`.
pub const PM_APBBMASK_USB: u32 = 1 << 5;

/// `SYSCTRL.OSC8M` (32 bit).
pub const SYSCTRL_OSC8M: usize = SYSCTRL_BASE + 0x20;
/// `SYSCTRL.DPLLCTRLA` (8 bit).
pub const SYSCTRL_DPLLCTRLA: usize = SYSCTRL_BASE + 0x44;
/// `SYSCTRL.DPLLRATIO` (32 bit).
pub const SYSCTRL_DPLLRATIO: usize = SYSCTRL_BASE + 0x48;
/// `SYSCTRL.DPLLCTRLB` (32 bit).
pub const SYSCTRL_DPLLCTRLB: usize = SYSCTRL_BASE + 0x4C;
/// `SYSCTRL.DPLLSTATUS` (8 bit).
pub const SYSCTRL_DPLLSTATUS: usize = SYSCTRL_BASE + 0x50;

/// `GCLK.CTRL` (8 bit).
pub const GCLK_CTRL: usize = GCLK_BASE;
/// `GCLK.STATUS` (8 bit).
pub const GCLK_STATUS: usize = GCLK_BASE + 0x01;
/// `GCLK.CLKCTRL` (16 bit).
pub const GCLK_CLKCTRL: usize = GCLK_BASE + 0x02;
/// `GCLK.GENCTRL` (32 bit).
pub const GCLK_GENCTRL: usize = GCLK_BASE + 0x04;
/// `GCLK.GENDIV` (32 bit).
pub const GCLK_GENDIV: usize = GCLK_BASE + 0x08;

/// `NVMCTRL.CTRLB` (32 bit).
pub const NVMCTRL_CTRLB: usize = NVMCTRL_BASE + 0x04;

/// Distance between PORT groups.
pub const PORT_GROUP_STRIDE: usize = 0x80;
/// `PORT.DIRSET` (32 bit), relative to the group.
pub const PORT_DIRSET: usize = 0x08;
/// `PORT.OUTSET` (32 bit), relative to the group.
pub const PORT_OUTSET: usize = 0x18;

/// `USB.CTRLA` (8 bit).
pub const USB_CTRLA: usize = USB_BASE;
/// `USB.SYNCBUSY` (8 bit).
pub const USB_SYNCBUSY: usize = USB_BASE + 0x02;

// ── Field values ────────────────────────────────────────────────────────────

/// `GCLK.CTRL.SWRST`
pub const GCLK_CTRL_SWRST: u8 = 1 << 0;
/// `GCLK.STATUS.SYNCBUSY`
pub const GCLK_STATUS_SYNCBUSY: u8 = 1 << 7;

/// `SYSCTRL.OSC8M.ENABLE`
pub const OSC8M_ENABLE: u32 = 1 << 1;
/// `SYSCTRL.OSC8M.ONDEMAND`
pub const OSC8M_ONDEMAND: u32 = 1 << 7;
/// `SYSCTRL.OSC8M.PRESC` field.
pub const OSC8M_PRESC_MASK: u32 = 0b11 << 8;

/// `SYSCTRL.DPLLCTRLA.ENABLE`
pub const DPLLCTRLA_ENABLE: u8 = 1 << 1;
/// `SYSCTRL.DPLLCTRLB.REFCLK = GCLK_DPLL`
pub const DPLLCTRLB_REFCLK_GCLK: u32 = 0x2 << 4;
/// `SYSCTRL.DPLLSTATUS`: locked and output ready.
pub const DPLLSTATUS_READY: u8 = (1 << 0) | (1 << 1);

/// `USB.CTRLA.ENABLE`, also the matching `USB.SYNCBUSY` bit.
pub const USB_CTRLA_ENABLE: u8 = 1 << 1;

/// Clock source field of `GCLK.GENCTRL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum GenSource {
    /// Ultra-low-power 32 kHz oscillator.
    OscUlp32k = 0x03,
    /// Internal 8 MHz oscillator.
    Osc8m = 0x06,
    /// FDPLL96M output.
    Fdpll = 0x08,
}

/// `GCLK.CLKCTRL.ID` of the FDPLL96M reference input.
pub const CLKCTRL_ID_FDPLL: u16 = 0x01;

/// OSC8M divider that yields the 1 MHz PLL reference on GCLK1.
pub const PLL_REF_DIV: u32 = 8;

// ── Encoders ────────────────────────────────────────────────────────────────

/// `GCLK.GENDIV` word: generator `gen` divides its source by `div`.
#[must_use]
pub const fn gendiv(gen: GeneratorId, div: u32) -> u32 {
    ((div & 0xFFFF) << 8) | (gen.index() as u32 & 0xF)
}

/// `GCLK.GENCTRL` word: enable generator `gen` on `src`.
///
/// `IDC` (improved duty cycle) is always set; it only matters for odd
/// divisors. `run_standby` keeps the generator alive in standby.
#[must_use]
pub const fn genctrl(gen: GeneratorId, src: GenSource, run_standby: bool) -> u32 {
    const GENEN: u32 = 1 << 16;
    const IDC: u32 = 1 << 17;
    const RUNSTDBY: u32 = 1 << 21;
    let standby = if run_standby { RUNSTDBY } else { 0 };
    (gen.index() as u32 & 0xF) | ((src as u32) << 8) | GENEN | IDC | standby
}

/// `GCLK.CLKCTRL` halfword: route generator `gen` to clock channel `id`.
#[must_use]
pub const fn clkctrl(id: u16, gen: GeneratorId) -> u16 {
    const CLKEN: u16 = 1 << 14;
    (id & 0x3F) | ((gen.index() as u16 & 0xF) << 8) | CLKEN
}

/// `SYSCTRL.DPLLRATIO` word for loop multiplier `mul` (output = ref × (mul + 1)).
#[must_use]
pub const fn dpllratio(mul: u32) -> u32 {
    mul & 0xFFF
}

/// `NVMCTRL.CTRLB` with the read wait states for `clock`, other fields at
/// their reset value (manual write, normal power mode).
#[must_use]
pub const fn nvm_ctrlb(clock: &ClockConfig) -> u32 {
    (clock.flash_wait_states() as u32 & 0xF) << 1
}

/// Divider GCLK0 applies to its source under `clock`.
#[must_use]
pub const fn core_divider(clock: &ClockConfig) -> u32 {
    match *clock {
        ClockConfig::Pll { div, .. } | ClockConfig::Direct { div } => div,
    }
}

/// Source GCLK0 runs from under `clock`.
#[must_use]
pub const fn core_source(clock: &ClockConfig) -> GenSource {
    match clock {
        ClockConfig::Pll { .. } => GenSource::Fdpll,
        ClockConfig::Direct { .. } => GenSource::Osc8m,
    }
}

/// Address of register `offset` in PORT group `group` (0 = PA, 1 = PB).
#[must_use]
#[allow(clippy::arithmetic_side_effects)] // group is 0 or 1
pub const fn port_reg(group: u8, offset: usize) -> usize {
    PORT_BASE + (group as usize) * PORT_GROUP_STRIDE + offset
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gclk1_reference_divides_osc8m_by_eight() {
        assert_eq!(gendiv(GeneratorId::PLL_REF, PLL_REF_DIV), 0x0000_0801);
        assert_eq!(
            genctrl(GeneratorId::PLL_REF, GenSource::Osc8m, false),
            0x0003_0601
        );
    }

    #[test]
    fn core_generator_runs_from_pll_or_osc8m() {
        let pll = ClockConfig::pll(47, 1);
        let direct = ClockConfig::direct(2);
        assert_eq!(core_source(&pll), GenSource::Fdpll);
        assert_eq!(core_source(&direct), GenSource::Osc8m);
        assert_eq!(core_divider(&direct), 2);
        assert_eq!(
            genctrl(GeneratorId::CORE, core_source(&pll), false),
            0x0003_0800
        );
    }

    #[test]
    fn low_power_generator_keeps_running_in_standby() {
        let word = genctrl(GeneratorId::LOW_POWER, GenSource::OscUlp32k, true);
        assert_eq!(word & 0xF, 2);
        assert_ne!(word & (1 << 21), 0);
    }

    #[test]
    fn pll_reference_channel_uses_gclk1() {
        assert_eq!(clkctrl(CLKCTRL_ID_FDPLL, GeneratorId::PLL_REF), 0x4101);
    }

    #[test]
    fn dpll_ratio_is_the_raw_multiplier() {
        assert_eq!(dpllratio(47), 47);
    }

    #[test]
    fn one_wait_state_above_24_mhz() {
        assert_eq!(nvm_ctrlb(&ClockConfig::pll(47, 1)), 1 << 1);
        assert_eq!(nvm_ctrlb(&ClockConfig::direct(1)), 0);
    }

    #[test]
    fn port_groups_are_0x80_apart() {
        assert_eq!(port_reg(0, PORT_DIRSET), 0x4100_4408);
        assert_eq!(port_reg(1, PORT_OUTSET), 0x4100_4498);
    }
}

//! SAM D21 register-level bring-up collaborator.
//!
//! Only compiled with `--features hardware`. Every register access goes
//! through the volatile helpers below; the words written come from
//! [`crate::regs`], which host tests cover.

use core::ptr;

use bsp_core::{ClockConfig, CpuHal, GeneratorId, Irq, Port};
use cortex_m::interrupt::InterruptNumber;
use cortex_m::peripheral::NVIC;

use crate::boot;
use crate::indicators::PortWriter;
use crate::regs::{
    clkctrl, core_divider, core_source, dpllratio, gendiv, genctrl, nvm_ctrlb, port_reg,
    GenSource, CLKCTRL_ID_FDPLL, DPLLCTRLA_ENABLE, DPLLCTRLB_REFCLK_GCLK, DPLLSTATUS_READY,
    GCLK_CLKCTRL, GCLK_CTRL, GCLK_CTRL_SWRST, GCLK_GENCTRL, GCLK_GENDIV, GCLK_STATUS,
    GCLK_STATUS_SYNCBUSY, NVMCTRL_CTRLB, OSC8M_ENABLE, OSC8M_ONDEMAND, OSC8M_PRESC_MASK,
    PLL_REF_DIV, PM_APBBMASK, PM_APBBMASK_USB, PORT_DIRSET, PORT_OUTSET, SYSCTRL_DPLLCTRLA,
    SYSCTRL_DPLLCTRLB, SYSCTRL_DPLLRATIO, SYSCTRL_DPLLSTATUS, SYSCTRL_OSC8M, USB_CTRLA,
    USB_CTRLA_ENABLE, USB_SYNCBUSY,
};

/// Priority every external interrupt starts at. The Cortex-M0+ implements
/// the top two priority bits only.
pub const DEFAULT_IRQ_PRIO: u8 = 1 << 6;

// ── Register access ─────────────────────────────────────────────────────────

/// # Safety
/// `addr` must be a readable, aligned SAM D21 8-bit register.
unsafe fn read8(addr: usize) -> u8 {
    // SAFETY: guaranteed by the caller.
    unsafe { ptr::read_volatile(addr as *const u8) }
}

/// # Safety
/// `addr` must be a writable, aligned SAM D21 8-bit register.
unsafe fn write8(addr: usize, value: u8) {
    // SAFETY: guaranteed by the caller.
    unsafe { ptr::write_volatile(addr as *mut u8, value) }
}

/// # Safety
/// `addr` must be a writable, aligned SAM D21 16-bit register.
unsafe fn write16(addr: usize, value: u16) {
    // SAFETY: guaranteed by the caller.
    unsafe { ptr::write_volatile(addr as *mut u16, value) }
}

/// # Safety
/// `addr` must be a readable, aligned SAM D21 32-bit register.
unsafe fn read32(addr: usize) -> u32 {
    // SAFETY: guaranteed by the caller.
    unsafe { ptr::read_volatile(addr as *const u32) }
}

/// # Safety
/// `addr` must be a writable, aligned SAM D21 32-bit register.
unsafe fn write32(addr: usize, value: u32) {
    // SAFETY: guaranteed by the caller.
    unsafe { ptr::write_volatile(addr as *mut u32, value) }
}

/// Spin until GCLK has finished synchronising the last write.
fn gclk_sync() {
    // SAFETY: GCLK.STATUS is a read-only status register.
    while unsafe { read8(GCLK_STATUS) } & GCLK_STATUS_SYNCBUSY != 0 {}
}

// ── NVIC interrupt numbers ──────────────────────────────────────────────────

/// [`Irq`] as an NVIC line.
#[derive(Debug, Clone, Copy)]
pub struct IrqLine(pub Irq);

// SAFETY: `Irq` discriminants are exactly the SAM D21 external interrupt
// numbers (0..=27), all below the NVIC's implemented line count.
unsafe impl InterruptNumber for IrqLine {
    fn number(self) -> u16 {
        self.0.number()
    }
}

// ── CPU collaborator ────────────────────────────────────────────────────────

/// The SAM D21 as seen by bring-up.
pub struct Sam21Cpu {
    nvic: NVIC,
}

impl Sam21Cpu {
    /// Collaborator owning the NVIC.
    pub fn new(nvic: NVIC) -> Self {
        Self { nvic }
    }

    fn start_pll(mul: u32) {
        // SAFETY: GCLK and SYSCTRL registers from the datasheet map; the
        // words are produced by the regs encoders.
        unsafe {
            write32(GCLK_GENDIV, gendiv(GeneratorId::PLL_REF, PLL_REF_DIV));
            gclk_sync();
            write32(
                GCLK_GENCTRL,
                genctrl(GeneratorId::PLL_REF, GenSource::Osc8m, false),
            );
            gclk_sync();
            write16(GCLK_CLKCTRL, clkctrl(CLKCTRL_ID_FDPLL, GeneratorId::PLL_REF));
            gclk_sync();

            write32(SYSCTRL_DPLLRATIO, dpllratio(mul));
            write32(SYSCTRL_DPLLCTRLB, DPLLCTRLB_REFCLK_GCLK);
            write8(SYSCTRL_DPLLCTRLA, DPLLCTRLA_ENABLE);
            while read8(SYSCTRL_DPLLSTATUS) & DPLLSTATUS_READY != DPLLSTATUS_READY {}
        }
    }
}

impl CpuHal for Sam21Cpu {
    fn quiesce_usb(&mut self) {
        NVIC::mask(IrqLine(Irq::Usb));
        // SAFETY: USB.CTRLA/SYNCBUSY and PM.APBBMASK from the datasheet map.
        // The controller is disabled before its bus clock is gated.
        unsafe {
            write8(USB_CTRLA, read8(USB_CTRLA) & !USB_CTRLA_ENABLE);
            while read8(USB_SYNCBUSY) & USB_CTRLA_ENABLE != 0 {}
            write32(PM_APBBMASK, read32(PM_APBBMASK) & !PM_APBBMASK_USB);
        }
    }

    fn apply_clock(&mut self, clock: &ClockConfig) {
        // SAFETY: NVMCTRL, SYSCTRL and GCLK registers from the datasheet map.
        // Wait states go in before the core clock rises.
        unsafe {
            write32(NVMCTRL_CTRLB, nvm_ctrlb(clock));
            let osc8m = read32(SYSCTRL_OSC8M) & !(OSC8M_PRESC_MASK | OSC8M_ONDEMAND);
            write32(SYSCTRL_OSC8M, osc8m | OSC8M_ENABLE);

            write8(GCLK_CTRL, GCLK_CTRL_SWRST);
            while read8(GCLK_CTRL) & GCLK_CTRL_SWRST != 0
                && read8(GCLK_STATUS) & GCLK_STATUS_SYNCBUSY != 0
            {}
        }

        if let ClockConfig::Pll { mul, .. } = *clock {
            Self::start_pll(mul);
        }

        // SAFETY: as above.
        unsafe {
            write32(GCLK_GENDIV, gendiv(GeneratorId::CORE, core_divider(clock)));
            gclk_sync();
            write32(GCLK_GENCTRL, genctrl(GeneratorId::CORE, core_source(clock), false));
            gclk_sync();

            write32(GCLK_GENDIV, gendiv(GeneratorId::LOW_POWER, 1));
            gclk_sync();
            write32(
                GCLK_GENCTRL,
                genctrl(GeneratorId::LOW_POWER, GenSource::OscUlp32k, true),
            );
            gclk_sync();
        }
    }

    fn cpu_init(&mut self) {
        for irq in Irq::ALL {
            // SAFETY: interrupts are still globally masked, so no priority-based
            // critical section can be broken by the change.
            unsafe { self.nvic.set_priority(IrqLine(irq), DEFAULT_IRQ_PRIO) };
        }
    }

    fn irq_enable(&mut self) {
        // SAFETY: last bring-up step; every priority and clock is in place.
        unsafe { cortex_m::interrupt::enable() };
    }
}

// ── PORT writer ─────────────────────────────────────────────────────────────

/// Direct writes to the PORT set registers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sam21Port;

impl Sam21Port {
    const fn group(port: Port) -> u8 {
        match port {
            Port::PA => 0,
            Port::PB => 1,
        }
    }
}

impl PortWriter for Sam21Port {
    fn dirset(&mut self, port: Port, mask: u32) {
        // SAFETY: DIRSET only sets bits; other pins are unaffected.
        unsafe { write32(port_reg(Self::group(port), PORT_DIRSET), mask) }
    }

    fn outset(&mut self, port: Port, mask: u32) {
        // SAFETY: OUTSET only sets bits; other pins are unaffected.
        unsafe { write32(port_reg(Self::group(port), PORT_OUTSET), mask) }
    }
}

// ── Board selection ─────────────────────────────────────────────────────────

/// The indicator hook of the SODAQ ONE: its RGB LED.
#[cfg(not(feature = "sodaq-explorer"))]
pub type BoardIndicators = crate::indicators::ActiveLowLeds<Sam21Port>;

/// The ExpLoRer has no indicator hook.
#[cfg(feature = "sodaq-explorer")]
pub type BoardIndicators = bsp_core::NoIndicators;

#[cfg(not(feature = "sodaq-explorer"))]
fn board_indicators() -> BoardIndicators {
    crate::indicators::ActiveLowLeds::new(Sam21Port, &boards::active::INDICATOR_PINS)
}

#[cfg(feature = "sodaq-explorer")]
fn board_indicators() -> BoardIndicators {
    bsp_core::NoIndicators
}

/// Board bring-up entry point. Call exactly once, first thing after reset.
pub fn board_init() {
    // SAFETY: called once from the reset entry before any other code runs;
    // nothing else holds the core peripherals.
    let cp = unsafe { cortex_m::Peripherals::steal() };
    let mut cpu = Sam21Cpu::new(cp.NVIC);
    let mut indicators = board_indicators();
    let _ = boot::run_bringup(&mut cpu, &mut indicators, &boot::BOOT);
}

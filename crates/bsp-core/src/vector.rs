//! Interrupt vector bindings.
//!
//! A [`VectorBinding`] says which interrupt line services which descriptor.
//! The dispatch mechanism (vector table + driver ISRs) is external; this module
//! only supplies the mapping and the lookup it needs.
//!
//! | Class | Index | Vector | Entry point |
//! |-------|-------|--------|-------------|
//! | Timer | 0     | TC3    | `isr_tc3`   |
//! | UART  | 0     | SERCOM5| `isr_sercom5` |
//! | RTT   | 0     | RTC    | `isr_rtc`   |

use crate::descriptor::{DescriptorRef, PeripheralClass};

/// SAM D21 external interrupt lines (`IRQn`), numbered as in the NVIC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Irq {
    /// Power manager
    Pm = 0,
    /// System control
    Sysctrl = 1,
    /// Watchdog
    Wdt = 2,
    /// Real-time counter (RTC and RTT share it)
    Rtc = 3,
    /// External interrupt controller
    Eic = 4,
    /// NVM controller
    Nvmctrl = 5,
    /// DMA controller
    Dmac = 6,
    /// USB
    Usb = 7,
    /// Event system
    Evsys = 8,
    /// SERCOM0
    Sercom0 = 9,
    /// SERCOM1
    Sercom1 = 10,
    /// SERCOM2
    Sercom2 = 11,
    /// SERCOM3
    Sercom3 = 12,
    /// SERCOM4
    Sercom4 = 13,
    /// SERCOM5
    Sercom5 = 14,
    /// TCC0
    Tcc0 = 15,
    /// TCC1
    Tcc1 = 16,
    /// TCC2
    Tcc2 = 17,
    /// TC3
    Tc3 = 18,
    /// TC4
    Tc4 = 19,
    /// TC5
    Tc5 = 20,
    /// TC6
    Tc6 = 21,
    /// TC7
    Tc7 = 22,
    /// ADC
    Adc = 23,
    /// Analog comparators
    Ac = 24,
    /// DAC
    Dac = 25,
    /// Peripheral touch controller
    Ptc = 26,
    /// I2S
    I2s = 27,
}

impl Irq {
    /// Every external line, in vector order.
    pub const ALL: [Self; 28] = [
        Self::Pm,
        Self::Sysctrl,
        Self::Wdt,
        Self::Rtc,
        Self::Eic,
        Self::Nvmctrl,
        Self::Dmac,
        Self::Usb,
        Self::Evsys,
        Self::Sercom0,
        Self::Sercom1,
        Self::Sercom2,
        Self::Sercom3,
        Self::Sercom4,
        Self::Sercom5,
        Self::Tcc0,
        Self::Tcc1,
        Self::Tcc2,
        Self::Tc3,
        Self::Tc4,
        Self::Tc5,
        Self::Tc6,
        Self::Tc7,
        Self::Adc,
        Self::Ac,
        Self::Dac,
        Self::Ptc,
        Self::I2s,
    ];

    /// NVIC line number.
    #[must_use]
    pub const fn number(self) -> u16 {
        self as u16
    }

    /// Line for NVIC number `n`.
    #[must_use]
    pub fn from_number(n: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|irq| irq.number() == n)
    }

    /// Vector-table entry name the dispatcher invokes for this line.
    #[must_use]
    pub const fn isr_name(self) -> &'static str {
        match self {
            Self::Pm => "isr_pm",
            Self::Sysctrl => "isr_sysctrl",
            Self::Wdt => "isr_wdt",
            Self::Rtc => "isr_rtc",
            Self::Eic => "isr_eic",
            Self::Nvmctrl => "isr_nvmctrl",
            Self::Dmac => "isr_dmac",
            Self::Usb => "isr_usb",
            Self::Evsys => "isr_evsys",
            Self::Sercom0 => "isr_sercom0",
            Self::Sercom1 => "isr_sercom1",
            Self::Sercom2 => "isr_sercom2",
            Self::Sercom3 => "isr_sercom3",
            Self::Sercom4 => "isr_sercom4",
            Self::Sercom5 => "isr_sercom5",
            Self::Tcc0 => "isr_tcc0",
            Self::Tcc1 => "isr_tcc1",
            Self::Tcc2 => "isr_tcc2",
            Self::Tc3 => "isr_tc3",
            Self::Tc4 => "isr_tc4",
            Self::Tc5 => "isr_tc5",
            Self::Tc6 => "isr_tc6",
            Self::Tc7 => "isr_tc7",
            Self::Adc => "isr_adc",
            Self::Ac => "isr_ac",
            Self::Dac => "isr_dac",
            Self::Ptc => "isr_ptc",
            Self::I2s => "isr_i2s",
        }
    }
}

/// One descriptor bound to one interrupt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VectorBinding {
    /// The descriptor serviced by this vector.
    pub peripheral: DescriptorRef,
    /// The interrupt line.
    pub vector: Irq,
}

impl VectorBinding {
    /// Bind instance `index` of `class` to `vector`.
    #[must_use]
    pub const fn new(class: PeripheralClass, index: usize, vector: Irq) -> Self {
        Self {
            peripheral: DescriptorRef::new(class, index),
            vector,
        }
    }

    /// Entry point name, e.g. `isr_tc3` for `TIMER_0_ISR`.
    #[must_use]
    pub const fn isr_name(&self) -> &'static str {
        self.vector.isr_name()
    }
}

/// Dispatch-side query: which descriptor does `irq` service?
#[must_use]
pub fn lookup(bindings: &[VectorBinding], irq: Irq) -> Option<DescriptorRef> {
    bindings
        .iter()
        .find(|binding| binding.vector == irq)
        .map(|binding| binding.peripheral)
}

/// Driver-side query: which vector services instance `index` of `class`?
#[must_use]
pub fn vector_for(bindings: &[VectorBinding], class: PeripheralClass, index: usize) -> Option<Irq> {
    let target = DescriptorRef::new(class, index);
    bindings
        .iter()
        .find(|binding| binding.peripheral == target)
        .map(|binding| binding.vector)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    const BINDINGS: &[VectorBinding] = &[
        VectorBinding::new(PeripheralClass::Timer, 0, Irq::Tc3),
        VectorBinding::new(PeripheralClass::Timer, 1, Irq::Tc4),
        VectorBinding::new(PeripheralClass::Uart, 0, Irq::Sercom5),
        VectorBinding::new(PeripheralClass::Rtt, 0, Irq::Rtc),
    ];

    #[test]
    fn lookup_routes_line_to_descriptor() {
        assert_eq!(
            lookup(BINDINGS, Irq::Tc4),
            Some(DescriptorRef::new(PeripheralClass::Timer, 1))
        );
        assert_eq!(lookup(BINDINGS, Irq::Adc), None);
    }

    #[test]
    fn vector_for_routes_descriptor_to_line() {
        assert_eq!(vector_for(BINDINGS, PeripheralClass::Uart, 0), Some(Irq::Sercom5));
        assert_eq!(vector_for(BINDINGS, PeripheralClass::Uart, 1), None);
    }

    #[test]
    fn isr_names_follow_vector_table() {
        assert_eq!(BINDINGS[0].isr_name(), "isr_tc3");
        assert_eq!(Irq::Sercom5.isr_name(), "isr_sercom5");
        assert_eq!(Irq::Rtc.isr_name(), "isr_rtc");
    }

    #[test]
    fn numbers_round_trip_through_all() {
        for (n, irq) in Irq::ALL.iter().enumerate() {
            assert_eq!(usize::from(irq.number()), n);
        }
        assert_eq!(Irq::from_number(18), Some(Irq::Tc3));
        assert_eq!(Irq::from_number(28), None);
    }
}

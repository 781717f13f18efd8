//! Board aggregate: every descriptor table of one board plus its clock,
//! vector bindings and pin-sharing declarations.
//!
//! Boards build a [`Board`] as a `static` from their own `static` tables.
//! Nothing here is mutable; drivers index the tables, the dispatcher reads
//! the bindings, the linter reads everything.

use crate::adc::{AdcChannel, AdcSettings};
use crate::clock::ClockConfig;
use crate::descriptor::{Descriptor, DescriptorRef, DescriptorView, PeripheralClass};
use crate::i2c::I2cBus;
use crate::pin::{PinId, PinShare};
use crate::rtc::{RtcDevice, RttDevice};
use crate::spi::SpiBus;
use crate::timer::Timer;
use crate::uart::UartChannel;
use crate::usb::UsbDevice;
use crate::vector::{self, Irq, VectorBinding};

/// A descriptor table together with its advertised `*_NUMOF`.
#[derive(Debug, Clone, Copy)]
pub struct Table<T: 'static> {
    entries: &'static [T],
    declared: usize,
}

impl<T: 'static> Table<T> {
    /// Table over `entries`, advertised as holding `declared` of them.
    #[must_use]
    pub const fn new(entries: &'static [T], declared: usize) -> Self {
        Self { entries, declared }
    }

    /// Table with no entries and `NUMOF == 0`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: &[],
            declared: 0,
        }
    }

    /// The advertised count.
    #[must_use]
    pub const fn declared(&self) -> usize {
        self.declared
    }

    /// The number of entries actually present.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry `index`, as a driver would look it up.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'static T> {
        self.entries.get(index)
    }

    /// All entries in driver order.
    #[must_use]
    pub const fn entries(&self) -> &'static [T] {
        self.entries
    }
}

impl<T: Descriptor + 'static> Table<T> {
    fn views(&self) -> impl Iterator<Item = DescriptorView> {
        let entries: &'static [T] = self.entries;
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.view(index))
    }
}

/// Everything one board declares.
#[derive(Debug, Clone, Copy)]
pub struct Board {
    /// Board name, e.g. `"sodaq-one"`.
    pub name: &'static str,
    /// Build-time clock strategy.
    pub clock: ClockConfig,
    /// `timer_config`
    pub timers: Table<Timer>,
    /// `uart_config`
    pub uarts: Table<UartChannel>,
    /// `adc_channels`
    pub adc_channels: Table<AdcChannel>,
    /// Defaults for every ADC channel.
    pub adc_settings: AdcSettings,
    /// `spi_config`
    pub spis: Table<SpiBus>,
    /// `i2c_config`
    pub i2cs: Table<I2cBus>,
    /// Calendar RTC.
    pub rtcs: Table<RtcDevice>,
    /// Tick counter.
    pub rtts: Table<RttDevice>,
    /// `sam_usbdev_config`
    pub usbs: Table<UsbDevice>,
    /// Interrupt-capable descriptor to vector map.
    pub vectors: &'static [VectorBinding],
    /// Header pins intentionally wired to two roles.
    pub shared_pins: &'static [PinShare],
    /// Pins driven by the board's indicator hook.
    pub indicator_pins: &'static [PinId],
}

impl Board {
    /// Derived core clock (0 only for an invalid clock, which boards reject
    /// at compile time).
    #[must_use]
    pub const fn core_clock_hz(&self) -> u32 {
        self.clock.core_clock_hz()
    }

    /// `(declared, actual)` entry counts of one class table.
    #[must_use]
    pub const fn counts(&self, class: PeripheralClass) -> (usize, usize) {
        match class {
            PeripheralClass::Timer => (self.timers.declared(), self.timers.len()),
            PeripheralClass::Uart => (self.uarts.declared(), self.uarts.len()),
            PeripheralClass::Adc => (self.adc_channels.declared(), self.adc_channels.len()),
            PeripheralClass::Spi => (self.spis.declared(), self.spis.len()),
            PeripheralClass::I2c => (self.i2cs.declared(), self.i2cs.len()),
            PeripheralClass::Rtc => (self.rtcs.declared(), self.rtcs.len()),
            PeripheralClass::Rtt => (self.rtts.declared(), self.rtts.len()),
            PeripheralClass::Usb => (self.usbs.declared(), self.usbs.len()),
        }
    }

    /// Every descriptor on the board, class by class in table order.
    pub fn descriptors(&self) -> impl Iterator<Item = DescriptorView> + '_ {
        self.timers
            .views()
            .chain(self.uarts.views())
            .chain(self.adc_channels.views())
            .chain(self.spis.views())
            .chain(self.i2cs.views())
            .chain(self.rtcs.views())
            .chain(self.rtts.views())
            .chain(self.usbs.views())
    }

    /// The view of one descriptor, `None` if `id` is past its table.
    #[must_use]
    pub fn descriptor(&self, id: DescriptorRef) -> Option<DescriptorView> {
        self.descriptors().find(|view| view.id == id)
    }

    /// Dispatch-side query: the descriptor serviced by `irq`.
    #[must_use]
    pub fn lookup(&self, irq: Irq) -> Option<DescriptorRef> {
        vector::lookup(self.vectors, irq)
    }

    /// `true` if `pin` is declared as intentionally shared.
    #[must_use]
    pub fn is_shared(&self, pin: PinId) -> bool {
        self.shared_pins.iter().any(|share| share.pin == pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::GeneratorId;
    use crate::device::Sercom;
    use crate::pin::{Mux, Port};
    use crate::uart::{UartFlags, UartRxPad, UartTxPad};

    static UARTS: [UartChannel; 1] = [UartChannel {
        dev: Sercom::Sercom5,
        rx_pin: PinId::new(Port::PB, 3),
        tx_pin: PinId::new(Port::PB, 2),
        mux: Mux::D,
        rx_pad: UartRxPad::Pad1,
        tx_pad: UartTxPad::Tx0,
        flags: UartFlags::NONE,
        gclk_src: GeneratorId::CORE,
    }];

    static RTTS: [RttDevice; 1] = [RttDevice::COUNTER];

    static VECTORS: [VectorBinding; 2] = [
        VectorBinding::new(PeripheralClass::Uart, 0, Irq::Sercom5),
        VectorBinding::new(PeripheralClass::Rtt, 0, Irq::Rtc),
    ];

    static SMALL: Board = Board {
        name: "small",
        clock: ClockConfig::pll(47, 1),
        timers: Table::empty(),
        uarts: Table::new(&UARTS, 1),
        adc_channels: Table::empty(),
        adc_settings: AdcSettings::SODAQ,
        spis: Table::empty(),
        i2cs: Table::empty(),
        rtcs: Table::empty(),
        rtts: Table::new(&RTTS, 1),
        usbs: Table::empty(),
        vectors: &VECTORS,
        shared_pins: &[],
        indicator_pins: &[],
    };

    #[test]
    fn descriptors_walk_every_table_in_order() {
        let ids: std::vec::Vec<_> = SMALL.descriptors().map(|view| view.id).collect();
        assert_eq!(
            ids,
            [
                DescriptorRef::new(PeripheralClass::Uart, 0),
                DescriptorRef::new(PeripheralClass::Rtt, 0)
            ]
        );
    }

    #[test]
    fn counts_report_declared_and_actual() {
        assert_eq!(SMALL.counts(PeripheralClass::Uart), (1, 1));
        assert_eq!(SMALL.counts(PeripheralClass::Spi), (0, 0));
    }

    #[test]
    fn lookup_resolves_rtc_vector_to_rtt() {
        assert_eq!(
            SMALL.lookup(Irq::Rtc),
            Some(DescriptorRef::new(PeripheralClass::Rtt, 0))
        );
        assert_eq!(SMALL.lookup(Irq::Tc3), None);
    }

    #[test]
    fn descriptor_past_table_end_is_none() {
        assert!(SMALL
            .descriptor(DescriptorRef::new(PeripheralClass::Uart, 1))
            .is_none());
        assert_eq!(SMALL.core_clock_hz(), 48_000_000);
    }
}

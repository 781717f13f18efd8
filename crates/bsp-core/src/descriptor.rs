//! The common view every peripheral descriptor offers the board linter.

use heapless::Vec;

use crate::clock::GeneratorId;
use crate::pin::PinRoute;
use crate::vector::Irq;

/// Largest number of pins a single descriptor routes (SPI: MISO, MOSI, SCK).
pub const MAX_ROUTES: usize = 4;

/// Pin routes of one descriptor.
pub type Routes = Vec<PinRoute, MAX_ROUTES>;

/// Peripheral class a descriptor table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralClass {
    /// TC timers
    Timer,
    /// SERCOM USART channels
    Uart,
    /// ADC input channels
    Adc,
    /// SERCOM SPI masters
    Spi,
    /// SERCOM I2C masters
    I2c,
    /// RTC in calendar mode
    Rtc,
    /// RTC in 32-bit counter mode
    Rtt,
    /// USB device controller
    Usb,
}

impl PeripheralClass {
    /// All classes, in table order.
    pub const ALL: [Self; 8] = [
        Self::Timer,
        Self::Uart,
        Self::Adc,
        Self::Spi,
        Self::I2c,
        Self::Rtc,
        Self::Rtt,
        Self::Usb,
    ];

    /// Whether the shared drivers for this class run from an interrupt.
    ///
    /// SPI, I2C and ADC are polled; the RTC calendar driver shares the RTT
    /// vector and never enables its own interrupt.
    #[must_use]
    pub const fn is_interrupt_capable(self) -> bool {
        matches!(self, Self::Timer | Self::Uart | Self::Rtt | Self::Usb)
    }

    /// Table name as used in `*_NUMOF`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timer => "timer",
            Self::Uart => "uart",
            Self::Adc => "adc",
            Self::Spi => "spi",
            Self::I2c => "i2c",
            Self::Rtc => "rtc",
            Self::Rtt => "rtt",
            Self::Usb => "usb",
        }
    }
}

/// Instance `index` (0-based, driver-assigned) of one peripheral class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DescriptorRef {
    /// Peripheral class.
    pub class: PeripheralClass,
    /// Position in the class table.
    pub index: usize,
}

impl DescriptorRef {
    /// Reference instance `index` of `class`.
    #[must_use]
    pub const fn new(class: PeripheralClass, index: usize) -> Self {
        Self { class, index }
    }
}

impl core::fmt::Display for DescriptorRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}[{}]", self.class.as_str(), self.index)
    }
}

/// Implemented by every descriptor type.
pub trait Descriptor {
    /// Class of the table this descriptor lives in.
    const CLASS: PeripheralClass;

    /// Pins this instance claims, with their mux function and role.
    fn routes(&self) -> Routes;

    /// Generic clock generator feeding this instance, if it has its own.
    fn clock_source(&self) -> Option<GeneratorId> {
        None
    }

    /// Interrupt line the hardware raises for this instance.
    fn irq(&self) -> Option<Irq> {
        None
    }

    /// Snapshot used by the linter.
    fn view(&self, index: usize) -> DescriptorView {
        DescriptorView {
            id: DescriptorRef::new(Self::CLASS, index),
            routes: self.routes(),
            clock_source: self.clock_source(),
            irq: self.irq(),
        }
    }
}

/// Class-independent summary of one table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorView {
    /// Which entry.
    pub id: DescriptorRef,
    /// Its pin routes.
    pub routes: Routes,
    /// Its clock generator.
    pub clock_source: Option<GeneratorId>,
    /// Its interrupt line.
    pub irq: Option<Irq>,
}

/// Collect a fixed route list. Lists longer than [`MAX_ROUTES`] are truncated,
/// which no descriptor type produces.
pub(crate) fn routes_of(list: &[PinRoute]) -> Routes {
    let mut routes = Routes::new();
    for route in list {
        if routes.push(*route).is_err() {
            break;
        }
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::{Mux, PinId, PinRole, Port};

    #[test]
    fn only_driver_interrupt_classes_need_vectors() {
        let capable: std::vec::Vec<_> = PeripheralClass::ALL
            .iter()
            .filter(|c| c.is_interrupt_capable())
            .collect();
        assert_eq!(
            capable,
            [
                &PeripheralClass::Timer,
                &PeripheralClass::Uart,
                &PeripheralClass::Rtt,
                &PeripheralClass::Usb
            ]
        );
    }

    #[test]
    fn descriptor_ref_display() {
        use std::string::ToString;
        assert_eq!(DescriptorRef::new(PeripheralClass::I2c, 1).to_string(), "i2c[1]");
    }

    #[test]
    fn routes_of_truncates_at_capacity() {
        let route = PinRoute::new(PinId::new(Port::PA, 0), Mux::C, PinRole::Rx);
        assert_eq!(routes_of(&[route; 6]).len(), MAX_ROUTES);
        assert!(routes_of(&[]).is_empty());
    }
}

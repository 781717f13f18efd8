//! SERCOM SPI master descriptors.

use crate::descriptor::{routes_of, Descriptor, PeripheralClass, Routes};
use crate::device::Sercom;
use crate::pin::{Mux, PinId, PinRole, PinRoute};

/// `CTRLA.DIPO`: pad carrying MISO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMisoPad {
    /// PAD0
    Pad0,
    /// PAD1
    Pad1,
    /// PAD2
    Pad2,
    /// PAD3
    Pad3,
}

impl SpiMisoPad {
    /// Bit set of SERCOM pads in use.
    #[must_use]
    pub const fn pad_mask(self) -> u8 {
        match self {
            Self::Pad0 => 0b0001,
            Self::Pad1 => 0b0010,
            Self::Pad2 => 0b0100,
            Self::Pad3 => 0b1000,
        }
    }
}

/// `CTRLA.DOPO`: pads carrying MOSI and SCK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMosiPad {
    /// MOSI on PAD0, SCK on PAD1
    Mosi0Sck1,
    /// MOSI on PAD2, SCK on PAD3
    Mosi2Sck3,
    /// MOSI on PAD3, SCK on PAD1
    Mosi3Sck1,
    /// MOSI on PAD0, SCK on PAD3
    Mosi0Sck3,
}

impl SpiMosiPad {
    /// Bit set of SERCOM pads in use.
    #[must_use]
    pub const fn pad_mask(self) -> u8 {
        match self {
            Self::Mosi0Sck1 => 0b0011,
            Self::Mosi2Sck3 => 0b1100,
            Self::Mosi3Sck1 => 0b1010,
            Self::Mosi0Sck3 => 0b1001,
        }
    }
}

/// One entry of a board's SPI table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiBus {
    /// SERCOM instance in SPI master mode.
    pub dev: Sercom,
    /// Master-in pin.
    pub miso_pin: PinId,
    /// Master-out pin.
    pub mosi_pin: PinId,
    /// Clock pin.
    pub clk_pin: PinId,
    /// Mux for `miso_pin`.
    pub miso_mux: Mux,
    /// Mux for `mosi_pin`.
    pub mosi_mux: Mux,
    /// Mux for `clk_pin`.
    pub clk_mux: Mux,
    /// MISO pad.
    pub miso_pad: SpiMisoPad,
    /// MOSI/SCK pad pair.
    pub mosi_pad: SpiMosiPad,
}

impl SpiBus {
    /// `true` if MISO sits on a pad the MOSI/SCK pair also drives.
    #[must_use]
    pub const fn pads_collide(&self) -> bool {
        self.miso_pad.pad_mask() & self.mosi_pad.pad_mask() != 0
    }
}

impl Descriptor for SpiBus {
    const CLASS: PeripheralClass = PeripheralClass::Spi;

    fn routes(&self) -> Routes {
        routes_of(&[
            PinRoute::new(self.miso_pin, self.miso_mux, PinRole::Miso),
            PinRoute::new(self.mosi_pin, self.mosi_mux, PinRole::Mosi),
            PinRoute::new(self.clk_pin, self.clk_mux, PinRole::Sck),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::Port;

    fn flash_bus() -> SpiBus {
        SpiBus {
            dev: Sercom::Sercom3,
            miso_pin: PinId::new(Port::PA, 22),
            mosi_pin: PinId::new(Port::PA, 20),
            clk_pin: PinId::new(Port::PA, 21),
            miso_mux: Mux::C,
            mosi_mux: Mux::C,
            clk_mux: Mux::C,
            miso_pad: SpiMisoPad::Pad0,
            mosi_pad: SpiMosiPad::Mosi2Sck3,
        }
    }

    #[test]
    fn miso_pad0_with_mosi2_sck3_is_clean() {
        assert!(!flash_bus().pads_collide());
    }

    #[test]
    fn miso_on_sck_pad_collides() {
        let bus = SpiBus {
            miso_pad: SpiMisoPad::Pad3,
            ..flash_bus()
        };
        assert!(bus.pads_collide());
    }

    #[test]
    fn three_routes_no_interrupt() {
        let bus = flash_bus();
        assert_eq!(bus.routes().len(), 3);
        assert_eq!(Descriptor::irq(&bus), None);
    }
}

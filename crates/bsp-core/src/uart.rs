//! SERCOM USART channel descriptors.

use crate::clock::{ClockConfig, GeneratorId};
use crate::descriptor::{routes_of, Descriptor, PeripheralClass, Routes};
use crate::device::Sercom;
use crate::pin::{Mux, PinId, PinRole, PinRoute};
use crate::vector::Irq;

/// `CTRLA.RXPO`: pad carrying RX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartRxPad {
    /// PAD0
    Pad0,
    /// PAD1
    Pad1,
    /// PAD2
    Pad2,
    /// PAD3
    Pad3,
}

impl UartRxPad {
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

/// `CTRLA.TXPO`: pads carrying TX (and optionally RTS/CTS).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartTxPad {
    /// TX on PAD0
    Tx0,
    /// TX on PAD2
    Tx2,
    /// TX on PAD0, RTS on PAD2, CTS on PAD3
    Tx0Rts2Cts3,
}

impl UartTxPad {
    /// Bit set of SERCOM pads in use.
    #[must_use]
    pub const fn pad_mask(self) -> u8 {
        match self {
            Self::Tx0 => 0b0001,
            Self::Tx2 => 0b0100,
            Self::Tx0Rts2Cts3 => 0b1101,
        }
    }
}

/// Driver behaviour flags (`UART_FLAG_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartFlags(u8);

impl UartFlags {
    /// No special behaviour.
    pub const NONE: Self = Self(0);
    /// Keep the SERCOM clocked in standby.
    pub const RUN_STANDBY: Self = Self(1 << 0);
    /// Wake the CPU on RX start-of-frame.
    pub const WAKEUP: Self = Self(1 << 1);

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Union of two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// One entry of a board's UART table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartChannel {
    /// SERCOM instance in USART mode.
    pub dev: Sercom,
    /// Receive pin.
    pub rx_pin: PinId,
    /// Transmit pin.
    pub tx_pin: PinId,
    /// Mux function for both pins.
    pub mux: Mux,
    /// RX pad.
    pub rx_pad: UartRxPad,
    /// TX pad group.
    pub tx_pad: UartTxPad,
    /// Driver flags.
    pub flags: UartFlags,
    /// Generator feeding the SERCOM core clock.
    pub gclk_src: GeneratorId,
}

impl UartChannel {
    /// `true` if RX sits on a pad the TX group also drives.
    #[must_use]
    pub const fn pads_collide(&self) -> bool {
        self.rx_pad.pad_mask() & self.tx_pad.pad_mask() != 0
    }

    /// Baud-generator reference clock under `clock`.
    #[must_use]
    pub const fn reference_hz(&self, clock: &ClockConfig) -> Option<u32> {
        clock.generator_hz(self.gclk_src)
    }
}

impl Descriptor for UartChannel {
    const CLASS: PeripheralClass = PeripheralClass::Uart;

    fn routes(&self) -> Routes {
        routes_of(&[
            PinRoute::new(self.rx_pin, self.mux, PinRole::Rx),
            PinRoute::new(self.tx_pin, self.mux, PinRole::Tx),
        ])
    }

    fn clock_source(&self) -> Option<GeneratorId> {
        Some(self.gclk_src)
    }

    fn irq(&self) -> Option<Irq> {
        Some(self.dev.irq())
    }
}

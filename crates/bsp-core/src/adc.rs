//! ADC input channel descriptors and the board-wide ADC defaults.

use crate::descriptor::{routes_of, Descriptor, PeripheralClass, Routes};
use crate::pin::{Mux, PinId, PinRole, PinRoute, Port};

/// Number of positive analog inputs (AIN0..AIN19).
pub const AIN_COUNT: u8 = 20;

/// `INPUTCTRL.MUXPOS` for an external pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcMuxPos(u8);

impl AdcMuxPos {
    /// `ADC_INPUTCTRL_MUXPOS_PIN<n>`.
    #[must_use]
    pub const fn pin(n: u8) -> Self {
        Self(n)
    }

    /// Raw MUXPOS value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// `true` for AIN0..AIN19.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 < AIN_COUNT
    }

    /// The package pin wired to this analog input (datasheet table 7-1).
    #[must_use]
    pub const fn wired_pin(self) -> Option<PinId> {
        let (port, index) = match self.0 {
            0 => (Port::PA, 2),
            1 => (Port::PA, 3),
            2 => (Port::PB, 8),
            3 => (Port::PB, 9),
            4 => (Port::PA, 4),
            5 => (Port::PA, 5),
            6 => (Port::PA, 6),
            7 => (Port::PA, 7),
            8 => (Port::PB, 0),
            9 => (Port::PB, 1),
            10 => (Port::PB, 2),
            11 => (Port::PB, 3),
            12 => (Port::PB, 4),
            13 => (Port::PB, 5),
            14 => (Port::PB, 6),
            15 => (Port::PB, 7),
            16 => (Port::PA, 8),
            17 => (Port::PA, 9),
            18 => (Port::PA, 10),
            19 => (Port::PA, 11),
            _ => return None,
        };
        Some(PinId::new(port, index))
    }
}

/// `CTRLB.PRESCALER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcPrescaler {
    /// Peripheral clock / 4
    Div4,
    /// Peripheral clock / 8
    Div8,
    /// Peripheral clock / 16
    Div16,
    /// Peripheral clock / 32
    Div32,
    /// Peripheral clock / 64
    Div64,
    /// Peripheral clock / 128
    Div128,
    /// Peripheral clock / 256
    Div256,
    /// Peripheral clock / 512
    Div512,
}

/// `INPUTCTRL.MUXNEG`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcNegInput {
    /// Internal ground (single-ended)
    Gnd,
    /// I/O ground
    IoGnd,
}

/// `INPUTCTRL.GAIN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcGain {
    /// 1x
    X1,
    /// 2x
    X2,
    /// 4x
    X4,
    /// 8x
    X8,
    /// 16x
    X16,
    /// 1/2x
    Div2,
}

/// `REFCTRL.REFSEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcReference {
    /// 1.0 V bandgap
    Int1V,
    /// VDDANA / 1.48
    IntVcc0,
    /// VDDANA / 2
    IntVcc1,
    /// External VREFA
    ArefA,
    /// External VREFB
    ArefB,
}

/// Conversion defaults shared by every channel on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcSettings {
    /// `ADC_PRESCALER`
    pub prescaler: AdcPrescaler,
    /// `ADC_NEG_INPUT`
    pub neg_input: AdcNegInput,
    /// `ADC_GAIN_FACTOR_DEFAULT`
    pub gain: AdcGain,
    /// `ADC_REF_DEFAULT`
    pub reference: AdcReference,
}

impl AdcSettings {
    /// Single-ended, half gain against VDDANA/2: full scale is the supply.
    pub const SODAQ: Self = Self {
        prescaler: AdcPrescaler::Div512,
        neg_input: AdcNegInput::Gnd,
        gain: AdcGain::Div2,
        reference: AdcReference::IntVcc1,
    };
}

/// One entry of a board's ADC table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcChannel {
    /// Input pin.
    pub pin: PinId,
    /// Positive mux input.
    pub muxpos: AdcMuxPos,
}

impl AdcChannel {
    /// Channel on `pin` sampled through `AIN<ain>`.
    #[must_use]
    pub const fn new(pin: PinId, ain: u8) -> Self {
        Self {
            pin,
            muxpos: AdcMuxPos::pin(ain),
        }
    }

    /// `true` if `muxpos` actually samples `pin`.
    #[must_use]
    pub fn muxpos_matches_pin(&self) -> bool {
        self.muxpos.wired_pin() == Some(self.pin)
    }
}

impl Descriptor for AdcChannel {
    const CLASS: PeripheralClass = PeripheralClass::Adc;

    fn routes(&self) -> Routes {
        routes_of(&[PinRoute::new(self.pin, Mux::B, PinRole::AnalogIn)])
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn battery_sense_channels_match_wiring() {
        assert!(AdcChannel::new(PinId::new(Port::PB, 5), 13).muxpos_matches_pin());
        assert!(AdcChannel::new(PinId::new(Port::PA, 5), 5).muxpos_matches_pin());
    }

    #[test]
    fn wrong_muxpos_is_detected() {
        assert!(!AdcChannel::new(PinId::new(Port::PA, 8), 17).muxpos_matches_pin());
    }

    #[test]
    fn muxpos_range() {
        assert!(AdcMuxPos::pin(19).is_valid());
        assert!(!AdcMuxPos::pin(20).is_valid());
        assert_eq!(AdcMuxPos::pin(20).wired_pin(), None);
    }

    #[test]
    fn analog_route_uses_mux_b() {
        let routes = AdcChannel::new(PinId::new(Port::PB, 0), 8).routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].mux, Mux::B);
        assert_eq!(routes[0].role, PinRole::AnalogIn);
    }
}

//! SERCOM I2C master descriptors.

use crate::clock::{ClockConfig, GeneratorId};
use crate::descriptor::{routes_of, Descriptor, PeripheralClass, Routes};
use crate::device::Sercom;
use crate::pin::{Mux, PinId, PinRole, PinRoute};

/// SERCOM I2C master baud: `BAUD = f_gclk / (2 * f_scl) - 5`, ignoring rise time.
const BAUD_OVERHEAD: u32 = 5;

/// Target bus speed (`I2C_SPEED_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cSpeed {
    /// 10 kbit/s
    Low,
    /// 100 kbit/s
    Normal,
    /// 400 kbit/s
    Fast,
    /// 1 Mbit/s
    FastPlus,
    /// 3.4 Mbit/s
    High,
}

impl I2cSpeed {
    /// SCL frequency.
    #[must_use]
    pub const fn hz(self) -> u32 {
        match self {
            Self::Low => 10_000,
            Self::Normal => 100_000,
            Self::Fast => 400_000,
            Self::FastPlus => 1_000_000,
            Self::High => 3_400_000,
        }
    }

    /// Short label for reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::FastPlus => "fast-plus",
            Self::High => "high",
        }
    }
}

/// Driver behaviour flags (`I2C_FLAG_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cFlags(u8);

impl I2cFlags {
    /// No special behaviour.
    pub const NONE: Self = Self(0);
    /// Keep the SERCOM clocked in standby.
    pub const RUN_STANDBY: Self = Self(1 << 0);

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// One entry of a board's I2C table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cBus {
    /// SERCOM instance in I2C master mode.
    pub dev: Sercom,
    /// Bus speed.
    pub speed: I2cSpeed,
    /// Clock pin (SERCOM PAD1).
    pub scl_pin: PinId,
    /// Data pin (SERCOM PAD0).
    pub sda_pin: PinId,
    /// Mux function for both pins.
    pub mux: Mux,
    /// Generator feeding the SERCOM core clock.
    pub gclk_src: GeneratorId,
    /// Driver flags.
    pub flags: I2cFlags,
}

impl I2cBus {
    /// `BAUD` register value for `speed` under `clock`.
    ///
    /// `None` when the generator is not running, or the generator is too slow
    /// or too fast for the 8-bit register to reach `speed`.
    #[must_use]
    pub fn baud(&self, clock: &ClockConfig) -> Option<u8> {
        let gclk_hz = clock.generator_hz(self.gclk_src)?;
        let half_period = gclk_hz.checked_div(self.speed.hz().checked_mul(2)?)?;
        let baud = half_period.checked_sub(BAUD_OVERHEAD)?;
        u8::try_from(baud).ok()
    }
}

impl Descriptor for I2cBus {
    const CLASS: PeripheralClass = PeripheralClass::I2c;

    fn routes(&self) -> Routes {
        routes_of(&[
            PinRoute::new(self.scl_pin, self.mux, PinRole::Scl),
            PinRoute::new(self.sda_pin, self.mux, PinRole::Sda),
        ])
    }

    fn clock_source(&self) -> Option<GeneratorId> {
        Some(self.gclk_src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::Port;

    fn bus(speed: I2cSpeed) -> I2cBus {
        I2cBus {
            dev: Sercom::Sercom1,
            speed,
            scl_pin: PinId::new(Port::PA, 17),
            sda_pin: PinId::new(Port::PA, 16),
            mux: Mux::C,
            gclk_src: GeneratorId::CORE,
            flags: I2cFlags::NONE,
        }
    }

    #[test]
    fn normal_speed_at_48_mhz() {
        // 48 MHz / 200 kHz = 240, minus 5
        assert_eq!(bus(I2cSpeed::Normal).baud(&ClockConfig::pll(47, 1)), Some(235));
    }

    #[test]
    fn normal_speed_at_8_mhz() {
        assert_eq!(bus(I2cSpeed::Normal).baud(&ClockConfig::direct(1)), Some(35));
    }

    #[test]
    fn low_speed_overflows_baud_at_48_mhz() {
        assert_eq!(bus(I2cSpeed::Low).baud(&ClockConfig::pll(47, 1)), None);
    }

    #[test]
    fn slow_core_cannot_reach_fast_mode() {
        // 1 MHz / 800 kHz = 1, below the fixed overhead
        assert_eq!(bus(I2cSpeed::Fast).baud(&ClockConfig::direct(8)), None);
    }

    #[test]
    fn unconfigured_generator_has_no_baud() {
        let i2c = I2cBus {
            gclk_src: GeneratorId::PLL_REF,
            ..bus(I2cSpeed::Normal)
        };
        assert_eq!(i2c.baud(&ClockConfig::direct(1)), None);
    }
}

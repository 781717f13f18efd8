//! RTC descriptors.
//!
//! The SAM D21 has one RTC block. It is described twice: once as the
//! calendar clock (MODE2) and once as the 32-bit free-running tick counter
//! (MODE0) used as RTT. Both run from the 32.768 kHz generator.

use crate::clock::{GeneratorId, LOW_POWER_CLOCK_HZ};
use crate::descriptor::{Descriptor, PeripheralClass, Routes};
use crate::vector::Irq;

/// `CTRL.MODE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcMode {
    /// MODE0: 32-bit counter.
    Count32,
    /// MODE1: 16-bit counter.
    Count16,
    /// MODE2: clock/calendar.
    Calendar,
}

/// The calendar clock (`RTC_DEV`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcDevice {
    /// Operating mode, always [`RtcMode::Calendar`].
    pub mode: RtcMode,
    /// Generator clocking the RTC.
    pub gclk_src: GeneratorId,
}

impl RtcDevice {
    /// Calendar mode on GCLK2.
    pub const CALENDAR: Self = Self {
        mode: RtcMode::Calendar,
        gclk_src: GeneratorId::LOW_POWER,
    };
}

impl Descriptor for RtcDevice {
    const CLASS: PeripheralClass = PeripheralClass::Rtc;

    fn routes(&self) -> Routes {
        Routes::new()
    }

    fn clock_source(&self) -> Option<GeneratorId> {
        Some(self.gclk_src)
    }
}

/// The tick counter (`RTT_DEV`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RttDevice {
    /// Operating mode, always [`RtcMode::Count32`].
    pub mode: RtcMode,
    /// `RTT_IRQ`
    pub irq: Irq,
    /// `RTT_IRQ_PRIO`
    pub irq_prio: u8,
    /// `RTT_MAX_VALUE`
    pub max_value: u32,
    /// `RTT_FREQUENCY`
    pub frequency_hz: u32,
    /// `RTT_RUNSTDBY`: keep counting in sleep states.
    pub run_standby: bool,
    /// Generator clocking the RTC.
    pub gclk_src: GeneratorId,
}

impl RttDevice {
    /// 32-bit counter at 32.768 kHz, running through standby.
    pub const COUNTER: Self = Self {
        mode: RtcMode::Count32,
        irq: Irq::Rtc,
        irq_prio: 10,
        max_value: 0xFFFF_FFFF,
        frequency_hz: LOW_POWER_CLOCK_HZ,
        run_standby: true,
        gclk_src: GeneratorId::LOW_POWER,
    };

    /// Ticks to milliseconds, truncating.
    #[must_use]
    pub fn ticks_to_ms(&self, ticks: u32) -> u64 {
        u64::from(ticks)
            .saturating_mul(1000)
            .checked_div(u64::from(self.frequency_hz))
            .unwrap_or(0)
    }

    /// Milliseconds to ticks, saturating at `max_value`.
    #[must_use]
    pub fn ms_to_ticks(&self, ms: u32) -> u32 {
        let ticks = u64::from(ms).saturating_mul(u64::from(self.frequency_hz)) / 1000;
        u32::try_from(ticks).map_or(self.max_value, |t| t.min(self.max_value))
    }
}

impl Descriptor for RttDevice {
    const CLASS: PeripheralClass = PeripheralClass::Rtt;

    fn routes(&self) -> Routes {
        Routes::new()
    }

    fn clock_source(&self) -> Option<GeneratorId> {
        Some(self.gclk_src)
    }

    fn irq(&self) -> Option<Irq> {
        Some(self.irq)
    }
}

//! Mock bring-up collaborators for testing
//!
//! [`RecordingCpu`] and [`RecordingIndicators`] append to one shared
//! [`CallLog`], so a test can assert the exact interleaving of CPU calls and
//! the indicator hook.

#![cfg(any(test, feature = "std"))]

use core::cell::RefCell;

use crate::bringup::{CpuHal, Indicators};
use crate::clock::ClockConfig;

/// Capacity of a [`CallLog`].
pub const MAX_CALLS: usize = 16;

/// One recorded collaborator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuCall {
    /// [`CpuHal::quiesce_usb`]
    QuiesceUsb,
    /// [`CpuHal::apply_clock`]
    ApplyClock(ClockConfig),
    /// [`CpuHal::cpu_init`]
    CpuInit,
    /// [`Indicators::init`]
    IndicatorsInit,
    /// [`CpuHal::irq_enable`]
    IrqEnable,
}

/// Shared, ordered record of calls.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: RefCell<heapless::Vec<CpuCall, MAX_CALLS>>,
}

impl CallLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `call`; calls past [`MAX_CALLS`] are dropped.
    pub fn record(&self, call: CpuCall) {
        let _ = self.calls.borrow_mut().push(call);
    }

    /// Snapshot of the calls so far.
    pub fn calls(&self) -> heapless::Vec<CpuCall, MAX_CALLS> {
        self.calls.borrow().clone()
    }
}

/// Mock CPU collaborator.
#[derive(Debug)]
pub struct RecordingCpu<'a> {
    log: &'a CallLog,
}

impl<'a> RecordingCpu<'a> {
    /// Record into `log`.
    pub fn new(log: &'a CallLog) -> Self {
        Self { log }
    }
}

impl CpuHal for RecordingCpu<'_> {
    fn quiesce_usb(&mut self) {
        self.log.record(CpuCall::QuiesceUsb);
    }

    fn apply_clock(&mut self, clock: &ClockConfig) {
        self.log.record(CpuCall::ApplyClock(*clock));
    }

    fn cpu_init(&mut self) {
        self.log.record(CpuCall::CpuInit);
    }

    fn irq_enable(&mut self) {
        self.log.record(CpuCall::IrqEnable);
    }
}

/// Mock indicator hook standing in for a board override.
#[derive(Debug)]
pub struct RecordingIndicators<'a> {
    log: &'a CallLog,
}

impl<'a> RecordingIndicators<'a> {
    /// Record into `log`.
    pub fn new(log: &'a CallLog) -> Self {
        Self { log }
    }
}

impl Indicators for RecordingIndicators<'_> {
    fn init(&mut self) {
        self.log.record(CpuCall::IndicatorsInit);
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_order_across_collaborators() {
        let log = CallLog::new();
        let mut cpu = RecordingCpu::new(&log);
        let mut leds = RecordingIndicators::new(&log);
        cpu.cpu_init();
        leds.init();
        cpu.irq_enable();
        assert_eq!(
            log.calls().as_slice(),
            [CpuCall::CpuInit, CpuCall::IndicatorsInit, CpuCall::IrqEnable]
        );
    }

    #[test]
    fn log_drops_calls_past_capacity() {
        let log = CallLog::new();
        for _ in 0..MAX_CALLS + 4 {
            log.record(CpuCall::CpuInit);
        }
        assert_eq!(log.calls().len(), MAX_CALLS);
    }
}

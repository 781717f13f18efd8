//! Integration test: full board bring-up against the recording CPU mock.
//!
//! Tests that:
//!   1. The bring-up calls reach the CPU collaborator in the fixed order
//!   2. USB quiescing is the only step build configuration can add
//!   3. The clock handed to the collaborator is the active board's clock
//!   4. The SODAQ ONE LED hook runs between core init and interrupt enable
//!
//! Does NOT require physical hardware.
//!
//! Run with: cargo test -p firmware --test integration_bringup

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use std::cell::RefCell;

use bsp_core::mocks::{CallLog, CpuCall, RecordingCpu};
use bsp_core::{BringupConfig, BringupState, ClockConfig, Indicators, NoIndicators, Port};
use firmware::indicators::{ActiveLowLeds, PortWriter};
use firmware::{run_bringup, BOARD, BOOT};

// -- Mock PORT writer that shares the CPU call log ---------------------------

/// Records PORT writes and, on the first one, marks the indicator step in
/// the shared CPU log so ordering can be checked across both mocks.
struct LoggedPort<'a> {
    log: &'a CallLog,
    writes: &'a RefCell<Vec<(Port, u32)>>,
}

impl PortWriter for LoggedPort<'_> {
    fn dirset(&mut self, port: Port, mask: u32) {
        self.writes.borrow_mut().push((port, mask));
    }
    fn outset(&mut self, port: Port, mask: u32) {
        if self.writes.borrow().is_empty() {
            self.log.record(CpuCall::IndicatorsInit);
        }
        self.writes.borrow_mut().push((port, mask));
    }
}

#[test]
fn bringup_calls_arrive_in_fixed_order() {
    let log = CallLog::new();
    let mut cpu = RecordingCpu::new(&log);
    let config = BringupConfig {
        quiesce_usb: false,
        ..BOOT
    };
    let state = run_bringup(&mut cpu, &mut NoIndicators, &config);

    assert_eq!(state, BringupState::InterruptsEnabled);
    assert_eq!(
        log.calls().as_slice(),
        [
            CpuCall::ApplyClock(BOARD.clock),
            CpuCall::CpuInit,
            CpuCall::IrqEnable
        ]
    );
}

#[test]
fn quiesce_usb_is_prepended_when_enabled() {
    let log = CallLog::new();
    let mut cpu = RecordingCpu::new(&log);
    let config = BringupConfig {
        quiesce_usb: true,
        ..BOOT
    };
    let _ = run_bringup(&mut cpu, &mut NoIndicators, &config);

    let calls = log.calls();
    assert_eq!(calls.first(), Some(&CpuCall::QuiesceUsb));
    assert_eq!(calls.len(), 4);
}

#[test]
fn collaborator_receives_the_derived_board_clock() {
    let log = CallLog::new();
    let mut cpu = RecordingCpu::new(&log);
    let _ = run_bringup(&mut cpu, &mut NoIndicators, &BOOT);

    let applied = log
        .calls()
        .iter()
        .find_map(|call| match call {
            CpuCall::ApplyClock(clock) => Some(*clock),
            _ => None,
        })
        .expect("clock was applied");
    assert_eq!(applied, BOARD.clock);
    assert_eq!(applied.validate(), Ok(BOARD.core_clock_hz()));
}

#[test]
fn custom_clock_reaches_collaborator_unchanged() {
    let log = CallLog::new();
    let mut cpu = RecordingCpu::new(&log);
    let config = BringupConfig {
        clock: ClockConfig::direct(8),
        quiesce_usb: false,
    };
    let _ = run_bringup(&mut cpu, &mut NoIndicators, &config);
    assert_eq!(log.calls()[0], CpuCall::ApplyClock(ClockConfig::direct(8)));
}

#[test]
fn sodaq_one_leds_switch_between_core_init_and_irq_enable() {
    let log = CallLog::new();
    let writes = RefCell::new(Vec::new());
    let mut cpu = RecordingCpu::new(&log);
    let mut leds = ActiveLowLeds::new(
        LoggedPort {
            log: &log,
            writes: &writes,
        },
        &boards::sodaq_one::INDICATOR_PINS,
    );
    let _ = run_bringup(&mut cpu, &mut leds, &BOOT);

    let calls = log.calls();
    let core = calls.iter().position(|c| *c == CpuCall::CpuInit).unwrap();
    let leds_at = calls
        .iter()
        .position(|c| *c == CpuCall::IndicatorsInit)
        .unwrap();
    let irq = calls.iter().position(|c| *c == CpuCall::IrqEnable).unwrap();
    assert!(core < leds_at && leds_at < irq);
    // outset + dirset per LED
    assert_eq!(writes.borrow().len(), 6);
}

#[test]
fn default_indicator_hook_is_silent() {
    struct Silent;
    impl Indicators for Silent {}

    let log = CallLog::new();
    let mut cpu = RecordingCpu::new(&log);
    let _ = run_bringup(&mut cpu, &mut Silent, &BOOT);
    assert!(!log.calls().contains(&CpuCall::IndicatorsInit));
}

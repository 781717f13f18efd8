//! Board bring-up for SODAQ SAM D21 boards.
//!
//! Initialization order (fixed, runs once before anything else):
//!   1. Quiesce USB (only with the `quiesce-usb` feature)
//!   2. Apply the board clock: flash wait states, OSC8M, GCLK1 + FDPLL96M, GCLK0, GCLK2
//!   3. Core init: NVIC priority defaults
//!   4. Board indicator hook (RGB LED on the SODAQ ONE, nothing elsewhere)
//!   5. Enable interrupts
//!
//! Everything here is host-testable. The register-level collaborator lives in
//! [`crate::hardware`].

use bsp_core::{Board, Bringup, BringupConfig, BringupState, CpuHal, Indicators};

pub use bsp_core::bringup::BRINGUP_STEPS;

/// The board this firmware is built for.
pub static BOARD: &Board = &boards::active::BOARD;

/// Bring-up parameters fixed by the board and the `quiesce-usb` feature.
pub const BOOT: BringupConfig = BringupConfig {
    clock: boards::active::CLOCK,
    quiesce_usb: cfg!(feature = "quiesce-usb"),
};

/// Run the whole bring-up sequence against `hal`, with `indicators` as the
/// board's indicator hook.
///
/// Returns the final state, always [`BringupState::InterruptsEnabled`]; the
/// typestate makes any other outcome unrepresentable.
pub fn run_bringup<H: CpuHal, I: Indicators>(
    hal: &mut H,
    indicators: &mut I,
    config: &BringupConfig,
) -> BringupState {
    #[cfg(feature = "defmt")]
    defmt::info!(
        "bring-up: {=str} core clock {=u32} Hz, quiesce_usb={=bool}",
        BOARD.name,
        config.clock.core_clock_hz(),
        config.quiesce_usb
    );

    let seq = Bringup::new(hal).configure_clock(config);
    trace_state(seq.state());
    let seq = seq.init_core();
    trace_state(seq.state());
    let seq = seq.init_indicators(indicators);
    trace_state(seq.state());
    let seq = seq.enable_interrupts();
    trace_state(seq.state());
    seq.state()
}

#[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
fn trace_state(state: BringupState) {
    #[cfg(feature = "defmt")]
    defmt::debug!("bring-up: {=str}", state.as_str());
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bsp_core::mocks::{CallLog, CpuCall, RecordingCpu, RecordingIndicators};
    use bsp_core::NoIndicators;

    #[test]
    fn boot_config_uses_active_board_clock() {
        assert_eq!(BOOT.clock, BOARD.clock);
        assert_eq!(BOOT.quiesce_usb, cfg!(feature = "quiesce-usb"));
    }

    #[test]
    fn run_bringup_reaches_interrupts_enabled() {
        let log = CallLog::new();
        let mut cpu = RecordingCpu::new(&log);
        let state = run_bringup(&mut cpu, &mut NoIndicators, &BOOT);
        assert_eq!(state, BringupState::InterruptsEnabled);
        assert_eq!(log.calls().last(), Some(&CpuCall::IrqEnable));
    }

    #[test]
    fn indicator_hook_runs_between_core_init_and_irq_enable() {
        let log = CallLog::new();
        let mut cpu = RecordingCpu::new(&log);
        let mut leds = RecordingIndicators::new(&log);
        let config = BringupConfig {
            quiesce_usb: true,
            ..BOOT
        };
        let _ = run_bringup(&mut cpu, &mut leds, &config);
        assert_eq!(
            log.calls().as_slice(),
            [
                CpuCall::QuiesceUsb,
                CpuCall::ApplyClock(BOOT.clock),
                CpuCall::CpuInit,
                CpuCall::IndicatorsInit,
                CpuCall::IrqEnable,
            ]
        );
    }

    #[test]
    fn step_list_starts_with_optional_usb_quiesce() {
        assert_eq!(BRINGUP_STEPS.first(), Some(&"quiesce_usb (optional)"));
    }
}

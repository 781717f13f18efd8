//! Board bring-up typestate machine.
//!
//! Runs once per boot, before any other code observes the device, on the
//! only execution context that exists while interrupts are still masked:
//!
//! ```text
//! [Reset] --configure_clock()--> [ClockConfigured] --init_core()--> [CoreInitialized]
//!         --init_indicators()--> [IndicatorsInitialized] --enable_interrupts()--> [InterruptsEnabled]
//! ```
//!
//! Every transition consumes the previous state, so a step can neither be
//! skipped nor repeated. The register writes themselves belong to a
//! [`CpuHal`]; this module only orders them.

use core::marker::PhantomData;

use crate::clock::ClockConfig;

/// Ordered bring-up steps. `quiesce_usb` runs first only when enabled.
pub const BRINGUP_STEPS: &[&str] = &[
    "quiesce_usb (optional)",
    "apply_clock",
    "cpu_init",
    "indicators_init",
    "irq_enable",
];

// ── Collaborators ────────────────────────────────────────────────────────────

/// CPU-level hardware access used during bring-up.
///
/// Implemented by the firmware's register-level HAL and by the recording
/// mock in tests.
pub trait CpuHal {
    /// Mask the USB interrupt so the controller starts disabled.
    fn quiesce_usb(&mut self);

    /// Program oscillators, generators and flash wait states for `clock`.
    fn apply_clock(&mut self, clock: &ClockConfig);

    /// Core initialisation (interrupt priorities, vector state).
    /// Requires the clock to be configured.
    fn cpu_init(&mut self);

    /// Globally unmask interrupts.
    fn irq_enable(&mut self);
}

/// Board indicator outputs (LEDs).
///
/// Boards without indicators use [`NoIndicators`]. Which implementation is
/// used is a type parameter, fixed by the board feature at build time.
pub trait Indicators {
    /// Configure indicator pins as outputs in their idle level.
    fn init(&mut self) {}
}

/// Board without indicator outputs; `init` does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIndicators;

impl Indicators for NoIndicators {}

/// Build-time bring-up parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BringupConfig {
    /// Clock strategy to apply.
    pub clock: ClockConfig,
    /// Mask the USB interrupt before touching the clock.
    pub quiesce_usb: bool,
}

// ── States ───────────────────────────────────────────────────────────────────

/// Observable bring-up state, for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringupState {
    /// Out of reset, nothing configured.
    Reset,
    /// Core clock applied.
    ClockConfigured,
    /// CPU core initialised.
    CoreInitialized,
    /// Indicator hook has run.
    IndicatorsInitialized,
    /// Interrupts enabled. Terminal.
    InterruptsEnabled,
}

impl BringupState {
    /// The state the next transition leads to, `None` when terminal.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Reset => Some(Self::ClockConfigured),
            Self::ClockConfigured => Some(Self::CoreInitialized),
            Self::CoreInitialized => Some(Self::IndicatorsInitialized),
            Self::IndicatorsInitialized => Some(Self::InterruptsEnabled),
            Self::InterruptsEnabled => None,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::ClockConfigured => "clock-configured",
            Self::CoreInitialized => "core-initialized",
            Self::IndicatorsInitialized => "indicators-initialized",
            Self::InterruptsEnabled => "interrupts-enabled",
        }
    }
}

/// Zero-sized state markers for [`Bringup`].
pub mod state {
    use super::BringupState;

    /// Implemented by every state marker.
    pub trait State: sealed::Sealed {
        /// The matching observable state.
        const STATE: BringupState;
    }

    mod sealed {
        pub trait Sealed {}
    }

    macro_rules! states {
        ($($(#[$doc:meta])* $name:ident;)*) => {$(
            $(#[$doc])*
            #[derive(Debug)]
            pub struct $name;
            impl sealed::Sealed for $name {}
            impl State for $name {
                const STATE: BringupState = BringupState::$name;
            }
        )*};
    }

    states! {
        /// Out of reset.
        Reset;
        /// Clock applied.
        ClockConfigured;
        /// Core initialised.
        CoreInitialized;
        /// Indicators initialised.
        IndicatorsInitialized;
        /// Interrupts enabled.
        InterruptsEnabled;
    }
}

use state::{ClockConfigured, CoreInitialized, IndicatorsInitialized, InterruptsEnabled, Reset, State};

// ── Sequencer ────────────────────────────────────────────────────────────────

/// Typestate bring-up sequencer over a [`CpuHal`].
///
/// Only the transition valid from state `S` exists as a method; calling
/// `enable_interrupts()` on a sequencer still in `Reset` does not compile.
pub struct Bringup<'h, H: CpuHal, S: State> {
    hal: &'h mut H,
    _state: PhantomData<S>,
}

impl<'h, H: CpuHal, S: State> Bringup<'h, H, S> {
    /// Current state.
    #[must_use]
    pub fn state(&self) -> BringupState {
        S::STATE
    }

    fn advance<N: State>(self) -> Bringup<'h, H, N> {
        Bringup {
            hal: self.hal,
            _state: PhantomData,
        }
    }
}

impl<'h, H: CpuHal> Bringup<'h, H, Reset> {
    /// Start from reset.
    #[must_use]
    pub fn new(hal: &'h mut H) -> Self {
        Self {
            hal,
            _state: PhantomData,
        }
    }

    /// Optionally mask USB, then apply the clock.
    #[must_use]
    pub fn configure_clock(self, config: &BringupConfig) -> Bringup<'h, H, ClockConfigured> {
        if config.quiesce_usb {
            self.hal.quiesce_usb();
        }
        self.hal.apply_clock(&config.clock);
        self.advance()
    }
}

impl<'h, H: CpuHal> Bringup<'h, H, ClockConfigured> {
    /// Run the CPU core initialisation.
    #[must_use]
    pub fn init_core(self) -> Bringup<'h, H, CoreInitialized> {
        self.hal.cpu_init();
        self.advance()
    }
}

impl<'h, H: CpuHal> Bringup<'h, H, CoreInitialized> {
    /// Run the board's indicator hook.
    #[must_use]
    pub fn init_indicators<I: Indicators>(
        self,
        indicators: &mut I,
    ) -> Bringup<'h, H, IndicatorsInitialized> {
        indicators.init();
        self.advance()
    }
}

impl<'h, H: CpuHal> Bringup<'h, H, IndicatorsInitialized> {
    /// Globally enable interrupts. Last step.
    #[must_use]
    pub fn enable_interrupts(self) -> Bringup<'h, H, InterruptsEnabled> {
        self.hal.irq_enable();
        self.advance()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::mocks::{CallLog, CpuCall, RecordingCpu, RecordingIndicators};

    const CONFIG: BringupConfig = BringupConfig {
        clock: ClockConfig::pll(47, 1),
        quiesce_usb: false,
    };

    #[test]
    fn states_advance_in_declared_order() {
        let log = CallLog::new();
        let mut cpu = RecordingCpu::new(&log);
        let mut leds = RecordingIndicators::new(&log);

        let seq = Bringup::new(&mut cpu);
        assert_eq!(seq.state(), BringupState::Reset);
        let seq = seq.configure_clock(&CONFIG);
        assert_eq!(seq.state(), BringupState::ClockConfigured);
        let seq = seq.init_core();
        assert_eq!(seq.state(), BringupState::CoreInitialized);
        let seq = seq.init_indicators(&mut leds);
        assert_eq!(seq.state(), BringupState::IndicatorsInitialized);
        let seq = seq.enable_interrupts();
        assert_eq!(seq.state(), BringupState::InterruptsEnabled);

        assert_eq!(
            log.calls().as_slice(),
            [
                CpuCall::ApplyClock(CONFIG.clock),
                CpuCall::CpuInit,
                CpuCall::IndicatorsInit,
                CpuCall::IrqEnable,
            ]
        );
    }

    #[test]
    fn quiesce_precedes_clock() {
        let log = CallLog::new();
        let mut cpu = RecordingCpu::new(&log);
        let config = BringupConfig {
            quiesce_usb: true,
            ..CONFIG
        };
        let _ = Bringup::new(&mut cpu).configure_clock(&config);
        assert_eq!(
            log.calls().as_slice(),
            [CpuCall::QuiesceUsb, CpuCall::ApplyClock(CONFIG.clock)]
        );
    }

    #[test]
    fn terminal_state_is_reached_in_four_transitions() {
        let mut state = BringupState::Reset;
        let mut transitions = 0u8;
        while let Some(next) = state.next() {
            assert!(next > state, "transition went backwards");
            state = next;
            transitions += 1;
        }
        assert_eq!(state, BringupState::InterruptsEnabled);
        assert_eq!(transitions, 4);
    }

    #[test]
    fn default_indicator_hook_is_a_no_op() {
        let log = CallLog::new();
        let mut cpu = RecordingCpu::new(&log);
        let seq = Bringup::new(&mut cpu)
            .configure_clock(&CONFIG)
            .init_core()
            .init_indicators(&mut NoIndicators)
            .enable_interrupts();
        assert_eq!(seq.state(), BringupState::InterruptsEnabled);
        assert!(!log.calls().contains(&CpuCall::IndicatorsInit));
    }

    #[test]
    fn step_list_matches_transitions() {
        assert_eq!(BRINGUP_STEPS.len(), 5);
        assert_eq!(BRINGUP_STEPS.last(), Some(&"irq_enable"));
    }
}

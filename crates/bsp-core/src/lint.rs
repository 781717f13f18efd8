//! Board table linter.
//!
//! Every mistake a board author can make in a descriptor table turns into
//! silent hardware misbehaviour at run time, so the tables are checked
//! offline instead: in each board crate's test suite and by `cargo xtask lint`.
//! Firmware never runs this.
//!
//! [`check_board`] never stops at the first problem; it returns every
//! [`Defect`] it finds, bounded by [`MAX_DEFECTS`].

use heapless::Vec;

use crate::adc::AdcMuxPos;
use crate::board::Board;
use crate::clock::{ClockError, GeneratorId};
use crate::descriptor::{DescriptorRef, PeripheralClass};
use crate::device::{ApbcMask, GclkId, Sercom, Tc};
use crate::i2c::I2cSpeed;
use crate::pin::PinId;
use crate::vector::Irq;

/// Capacity of a [`LintReport`]. Defects past this are counted, not stored.
pub const MAX_DEFECTS: usize = 64;

/// How bad a defect is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    /// The board will misbehave.
    Error,
    /// Legal, but worth a second look.
    Warning,
}

/// One board-authoring mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Defect {
    /// The clock configuration does not derive a core clock.
    ClockInvalid(ClockError),
    /// Core clock below 1 MHz.
    ClockBelowRecommended {
        /// Derived core clock.
        hz: u32,
    },
    /// `*_NUMOF` disagrees with the table.
    TableLength {
        /// Which table.
        class: PeripheralClass,
        /// Advertised count.
        declared: usize,
        /// Entries present.
        actual: usize,
    },
    /// Pin index beyond the 32-pin port group.
    PinOutOfRange {
        /// Claiming descriptor, `None` for an indicator pin.
        owner: Option<DescriptorRef>,
        /// The pin.
        pin: PinId,
    },
    /// Two roles of one descriptor resolve to the same pin.
    PinReused {
        /// The descriptor.
        owner: DescriptorRef,
        /// The pin.
        pin: PinId,
    },
    /// Two descriptors claim a pin not listed as shared.
    PinConflict {
        /// The pin.
        pin: PinId,
        /// Earlier claimant.
        first: DescriptorRef,
        /// Later claimant.
        second: DescriptorRef,
    },
    /// A descriptor claims a pin the indicator hook drives.
    IndicatorConflict {
        /// The pin.
        pin: PinId,
        /// The descriptor.
        owner: DescriptorRef,
    },
    /// Generator id the SAM D21 does not have.
    UnknownGenerator {
        /// The descriptor.
        owner: DescriptorRef,
        /// The generator.
        gen: GeneratorId,
    },
    /// Generator exists but bring-up does not start it under this clock.
    GeneratorNotRunning {
        /// The descriptor.
        owner: DescriptorRef,
        /// The generator.
        gen: GeneratorId,
    },
    /// Timer names an interrupt line its TC does not raise.
    TimerIrq {
        /// Timer index.
        index: usize,
        /// The TC's line.
        expected: Irq,
        /// The configured line.
        found: Irq,
    },
    /// Timer uses a generic-clock channel not wired to its TC.
    TimerClockChannel {
        /// Timer index.
        index: usize,
        /// The TC's channel.
        expected: GclkId,
        /// The configured channel.
        found: GclkId,
    },
    /// 32-bit timer on a TC that cannot master a pair.
    TimerNoSlave {
        /// Timer index.
        index: usize,
        /// The TC.
        dev: Tc,
    },
    /// Clock gating misses a TC the timer uses.
    TimerClockGate {
        /// Timer index.
        index: usize,
        /// Bits the timer needs.
        required: ApbcMask,
        /// Bits configured.
        found: ApbcMask,
    },
    /// One TC used by two timers, directly or as a 32-bit slave.
    TcReused {
        /// The TC.
        dev: Tc,
        /// Earlier timer.
        first: usize,
        /// Later timer.
        second: usize,
    },
    /// One SERCOM configured for two serial descriptors.
    SercomReused {
        /// The SERCOM.
        dev: Sercom,
        /// Earlier descriptor.
        first: DescriptorRef,
        /// Later descriptor.
        second: DescriptorRef,
    },
    /// Receive pad overlaps the transmit pad group.
    PadCollision {
        /// UART or SPI descriptor.
        owner: DescriptorRef,
    },
    /// MUXPOS outside AIN0..AIN19.
    AdcMuxposInvalid {
        /// Channel index.
        index: usize,
        /// The value.
        muxpos: AdcMuxPos,
    },
    /// MUXPOS samples a different pin than the one named.
    AdcPinMismatch {
        /// Channel index.
        index: usize,
        /// The value.
        muxpos: AdcMuxPos,
        /// The named pin.
        pin: PinId,
    },
    /// Two ADC channels sample the same input.
    AdcMuxposDuplicate {
        /// The value.
        muxpos: AdcMuxPos,
        /// Earlier channel.
        first: usize,
        /// Later channel.
        second: usize,
    },
    /// The BAUD register cannot express the bus speed at this clock.
    I2cSpeedUnreachable {
        /// Bus index.
        index: usize,
        /// Requested speed.
        speed: I2cSpeed,
    },
    /// USB data lines not on PA24/PA25 mux G.
    UsbRouting {
        /// USB index.
        index: usize,
    },
    /// Interrupt-capable descriptor with no vector.
    MissingBinding {
        /// The descriptor.
        owner: DescriptorRef,
    },
    /// Descriptor bound more than once.
    DuplicateBinding {
        /// The descriptor.
        owner: DescriptorRef,
    },
    /// One vector bound to two descriptors.
    VectorReused {
        /// The vector.
        vector: Irq,
        /// Earlier descriptor.
        first: DescriptorRef,
        /// Later descriptor.
        second: DescriptorRef,
    },
    /// Binding names a vector the descriptor's hardware does not raise.
    BindingMismatch {
        /// The descriptor.
        owner: DescriptorRef,
        /// The descriptor's line.
        expected: Irq,
        /// The bound vector.
        bound: Irq,
    },
    /// Binding for a descriptor that does not exist or is never interrupt-driven.
    DanglingBinding {
        /// The missing target.
        target: DescriptorRef,
        /// The bound vector.
        vector: Irq,
    },
}

impl Defect {
    /// Severity of this defect.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::ClockBelowRecommended { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Defect {}

impl core::fmt::Display for Defect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::ClockInvalid(err) => write!(f, "clock: {err}"),
            Self::ClockBelowRecommended { hz } => {
                write!(f, "clock: core clock {hz} Hz is below 1 MHz")
            }
            Self::TableLength {
                class,
                declared,
                actual,
            } => write!(
                f,
                "{}: NUMOF is {declared} but the table has {actual} entries",
                class.as_str()
            ),
            Self::PinOutOfRange { owner: Some(owner), pin } => {
                write!(f, "{owner}: pin {pin} does not exist")
            }
            Self::PinOutOfRange { owner: None, pin } => {
                write!(f, "indicator: pin {pin} does not exist")
            }
            Self::PinReused { owner, pin } => write!(f, "{owner}: {pin} used for two roles"),
            Self::PinConflict { pin, first, second } => {
                write!(f, "{pin} claimed by {first} and {second} but not declared shared")
            }
            Self::IndicatorConflict { pin, owner } => {
                write!(f, "{owner}: {pin} is driven by the indicator hook")
            }
            Self::UnknownGenerator { owner, gen } => {
                write!(f, "{owner}: GCLK{} does not exist", gen.index())
            }
            Self::GeneratorNotRunning { owner, gen } => {
                write!(f, "{owner}: GCLK{} is not started by bring-up", gen.index())
            }
            Self::TimerIrq {
                index,
                expected,
                found,
            } => write!(
                f,
                "timer[{index}]: irq {} but the TC raises {}",
                found.number(),
                expected.number()
            ),
            Self::TimerClockChannel {
                index,
                expected,
                found,
            } => write!(
                f,
                "timer[{index}]: GCLK channel {:#04x}, TC is wired to {:#04x}",
                found.id(),
                expected.id()
            ),
            Self::TimerNoSlave { index, dev } => write!(
                f,
                "timer[{index}]: TC{} cannot master a 32-bit pair",
                dev.number()
            ),
            Self::TimerClockGate {
                index,
                required,
                found,
            } => write!(
                f,
                "timer[{index}]: APBC mask {:#06x} misses {:#06x}",
                found.bits(),
                required.bits()
            ),
            Self::TcReused { dev, first, second } => write!(
                f,
                "TC{} used by timer[{first}] and timer[{second}]",
                dev.number()
            ),
            Self::SercomReused { dev, first, second } => write!(
                f,
                "SERCOM{} configured for both {first} and {second}",
                dev.index()
            ),
            Self::PadCollision { owner } => {
                write!(f, "{owner}: input pad overlaps the output pad group")
            }
            Self::AdcMuxposInvalid { index, muxpos } => {
                write!(f, "adc[{index}]: MUXPOS {} out of range", muxpos.value())
            }
            Self::AdcPinMismatch { index, muxpos, pin } => write!(
                f,
                "adc[{index}]: AIN{} is not wired to {pin}",
                muxpos.value()
            ),
            Self::AdcMuxposDuplicate {
                muxpos,
                first,
                second,
            } => write!(
                f,
                "AIN{} sampled by adc[{first}] and adc[{second}]",
                muxpos.value()
            ),
            Self::I2cSpeedUnreachable { index, speed } => write!(
                f,
                "i2c[{index}]: {} speed not reachable from its generator",
                speed.as_str()
            ),
            Self::UsbRouting { index } => {
                write!(f, "usb[{index}]: data lines must be PA24/PA25 on mux G")
            }
            Self::MissingBinding { owner } => write!(f, "{owner}: no interrupt vector bound"),
            Self::DuplicateBinding { owner } => write!(f, "{owner}: bound to more than one vector"),
            Self::VectorReused {
                vector,
                first,
                second,
            } => write!(f, "{} bound to both {first} and {second}", vector.isr_name()),
            Self::BindingMismatch {
                owner,
                expected,
                bound,
            } => write!(
                f,
                "{owner}: bound to {} but raises {}",
                bound.isr_name(),
                expected.isr_name()
            ),
            Self::DanglingBinding { target, vector } => {
                write!(f, "{} bound to {target}, which is not an interrupt-driven entry", vector.isr_name())
            }
        }
    }
}

/// Result of linting one board.
#[derive(Debug, Clone)]
pub struct LintReport {
    board: &'static str,
    defects: Vec<Defect, MAX_DEFECTS>,
    dropped: usize,
}

impl LintReport {
    fn new(board: &'static str) -> Self {
        Self {
            board,
            defects: Vec::new(),
            dropped: 0,
        }
    }

    fn push(&mut self, defect: Defect) {
        if self.defects.push(defect).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// Name of the linted board.
    #[must_use]
    pub fn board(&self) -> &'static str {
        self.board
    }

    /// Every stored defect, in check order.
    #[must_use]
    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    /// Defects found after the report filled up.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Error-severity defects.
    pub fn errors(&self) -> impl Iterator<Item = &Defect> {
        self.defects
            .iter()
            .filter(|d| d.severity() == Severity::Error)
    }

    /// Warning-severity defects.
    pub fn warnings(&self) -> impl Iterator<Item = &Defect> {
        self.defects
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    /// No errors (warnings allowed).
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped == 0 && self.errors().next().is_none()
    }

    /// `true` if `defect` was reported.
    #[must_use]
    pub fn contains(&self, defect: &Defect) -> bool {
        self.defects.contains(defect)
    }
}

/// Run every table check over `board`.
#[must_use]
pub fn check_board(board: &Board) -> LintReport {
    let mut report = LintReport::new(board.name);
    check_clock(board, &mut report);
    check_counts(board, &mut report);
    check_pins(board, &mut report);
    check_generators(board, &mut report);
    check_timers(board, &mut report);
    check_serial(board, &mut report);
    check_adc(board, &mut report);
    check_i2c_speed(board, &mut report);
    check_usb(board, &mut report);
    check_vectors(board, &mut report);
    report
}

// ── Checks ───────────────────────────────────────────────────────────────────

fn check_clock(board: &Board, report: &mut LintReport) {
    match board.clock.validate() {
        Err(err) => report.push(Defect::ClockInvalid(err)),
        Ok(hz) if board.clock.is_below_recommended() => {
            report.push(Defect::ClockBelowRecommended { hz });
        }
        Ok(_) => {}
    }
}

fn check_counts(board: &Board, report: &mut LintReport) {
    for class in PeripheralClass::ALL {
        let (declared, actual) = board.counts(class);
        if declared != actual {
            report.push(Defect::TableLength {
                class,
                declared,
                actual,
            });
        }
    }
}

fn check_pins(board: &Board, report: &mut LintReport) {
    for pin in board.indicator_pins {
        if !pin.is_valid() {
            report.push(Defect::PinOutOfRange {
                owner: None,
                pin: *pin,
            });
        }
    }

    for (position, view) in board.descriptors().enumerate() {
        for (i, route) in view.routes.iter().enumerate() {
            if !route.pin.is_valid() {
                report.push(Defect::PinOutOfRange {
                    owner: Some(view.id),
                    pin: route.pin,
                });
            }
            if view.routes.iter().take(i).any(|earlier| earlier.pin == route.pin) {
                report.push(Defect::PinReused {
                    owner: view.id,
                    pin: route.pin,
                });
            }
            if board.indicator_pins.contains(&route.pin) {
                report.push(Defect::IndicatorConflict {
                    pin: route.pin,
                    owner: view.id,
                });
            }
            if board.is_shared(route.pin) {
                continue;
            }
            for earlier in board.descriptors().take(position) {
                if earlier.routes.iter().any(|r| r.pin == route.pin) {
                    report.push(Defect::PinConflict {
                        pin: route.pin,
                        first: earlier.id,
                        second: view.id,
                    });
                }
            }
        }
    }
}

fn check_generators(board: &Board, report: &mut LintReport) {
    for view in board.descriptors() {
        let Some(gen) = view.clock_source else {
            continue;
        };
        if !gen.is_present() {
            report.push(Defect::UnknownGenerator { owner: view.id, gen });
        } else if board.clock.generator_hz(gen).is_none() {
            report.push(Defect::GeneratorNotRunning { owner: view.id, gen });
        }
    }
}

fn check_timers(board: &Board, report: &mut LintReport) {
    let timers = board.timers.entries();
    for (index, timer) in timers.iter().enumerate() {
        if timer.irq != timer.dev.irq() {
            report.push(Defect::TimerIrq {
                index,
                expected: timer.dev.irq(),
                found: timer.irq,
            });
        }
        if timer.gclk_ctrl != timer.dev.gclk_id() {
            report.push(Defect::TimerClockChannel {
                index,
                expected: timer.dev.gclk_id(),
                found: timer.gclk_ctrl,
            });
        }
        match timer.required_pm_mask() {
            None => report.push(Defect::TimerNoSlave {
                index,
                dev: timer.dev,
            }),
            Some(required) if !timer.pm_mask.contains(required) => {
                report.push(Defect::TimerClockGate {
                    index,
                    required,
                    found: timer.pm_mask,
                });
            }
            Some(_) => {}
        }

        for unit in [Some(timer.dev), timer.slave()].into_iter().flatten() {
            let earlier = timers
                .iter()
                .take(index)
                .position(|t| t.dev == unit || t.slave() == Some(unit));
            if let Some(first) = earlier {
                report.push(Defect::TcReused {
                    dev: unit,
                    first,
                    second: index,
                });
            }
        }
    }
}

fn sercom_users(board: &Board) -> impl Iterator<Item = (Sercom, DescriptorRef)> + '_ {
    let uarts = board.uarts.entries().iter().enumerate().map(|(i, u)| {
        (u.dev, DescriptorRef::new(PeripheralClass::Uart, i))
    });
    let spis = board.spis.entries().iter().enumerate().map(|(i, s)| {
        (s.dev, DescriptorRef::new(PeripheralClass::Spi, i))
    });
    let i2cs = board.i2cs.entries().iter().enumerate().map(|(i, b)| {
        (b.dev, DescriptorRef::new(PeripheralClass::I2c, i))
    });
    uarts.chain(spis).chain(i2cs)
}

fn check_serial(board: &Board, report: &mut LintReport) {
    for (position, (dev, owner)) in sercom_users(board).enumerate() {
        if let Some((_, first)) = sercom_users(board).take(position).find(|(d, _)| *d == dev) {
            report.push(Defect::SercomReused {
                dev,
                first,
                second: owner,
            });
        }
    }

    for (index, uart) in board.uarts.entries().iter().enumerate() {
        if uart.pads_collide() {
            report.push(Defect::PadCollision {
                owner: DescriptorRef::new(PeripheralClass::Uart, index),
            });
        }
    }
    for (index, spi) in board.spis.entries().iter().enumerate() {
        if spi.pads_collide() {
            report.push(Defect::PadCollision {
                owner: DescriptorRef::new(PeripheralClass::Spi, index),
            });
        }
    }
}

fn check_adc(board: &Board, report: &mut LintReport) {
    let channels = board.adc_channels.entries();
    for (index, channel) in channels.iter().enumerate() {
        if !channel.muxpos.is_valid() {
            report.push(Defect::AdcMuxposInvalid {
                index,
                muxpos: channel.muxpos,
            });
        } else if !channel.muxpos_matches_pin() {
            report.push(Defect::AdcPinMismatch {
                index,
                muxpos: channel.muxpos,
                pin: channel.pin,
            });
        }
        if let Some(first) = channels
            .iter()
            .take(index)
            .position(|c| c.muxpos == channel.muxpos)
        {
            report.push(Defect::AdcMuxposDuplicate {
                muxpos: channel.muxpos,
                first,
                second: index,
            });
        }
    }
}

fn check_i2c_speed(board: &Board, report: &mut LintReport) {
    for (index, bus) in board.i2cs.entries().iter().enumerate() {
        // An unconfigured generator is already reported by check_generators.
        if board.clock.generator_hz(bus.gclk_src).is_some() && bus.baud(&board.clock).is_none() {
            report.push(Defect::I2cSpeedUnreachable {
                index,
                speed: bus.speed,
            });
        }
    }
}

fn check_usb(board: &Board, report: &mut LintReport) {
    for (index, usb) in board.usbs.entries().iter().enumerate() {
        if !usb.is_native_routing() {
            report.push(Defect::UsbRouting { index });
        }
    }
}

fn check_vectors(board: &Board, report: &mut LintReport) {
    for (position, binding) in board.vectors.iter().enumerate() {
        let target = binding.peripheral;
        let view = board.descriptor(target);
        match view.as_ref().and_then(|v| v.irq) {
            Some(expected) if target.class.is_interrupt_capable() => {
                if expected != binding.vector {
                    report.push(Defect::BindingMismatch {
                        owner: target,
                        expected,
                        bound: binding.vector,
                    });
                }
            }
            _ => report.push(Defect::DanglingBinding {
                target,
                vector: binding.vector,
            }),
        }

        let reused = board
            .vectors
            .iter()
            .take(position)
            .find(|b| b.vector == binding.vector && b.peripheral != target);
        if let Some(first) = reused {
            report.push(Defect::VectorReused {
                vector: binding.vector,
                first: first.peripheral,
                second: target,
            });
        }
    }

    for view in board.descriptors() {
        if !view.id.class.is_interrupt_capable() {
            continue;
        }
        let bound = board
            .vectors
            .iter()
            .filter(|b| b.peripheral == view.id)
            .count();
        match bound {
            0 => report.push(Defect::MissingBinding { owner: view.id }),
            1 => {}
            _ => report.push(Defect::DuplicateBinding { owner: view.id }),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

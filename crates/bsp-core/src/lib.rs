//! Board support core for SAM D21 boards
//!
//! This crate holds the board-independent half of a board support package:
//! the vocabulary board crates use to describe their peripherals, and the
//! bring-up sequence that runs once at power-on.
//!
//! # Architecture Layers
//!
//! ```text
//! firmware (bring-up entry point, Cortex-M0+ register HAL)
//!         ↓
//! boards (static descriptor tables per board)
//!         ↓
//! bsp-core (this crate - descriptor types, clock model, linter, bring-up)
//! ```
//!
//! # Modules
//!
//! - [`clock`] - core clock derivation (PLL or direct division)
//! - [`pin`] - pin ids, mux functions, pin routes
//! - [`device`] - SERCOM/TC instances, clock-gating and GCLK channel ids
//! - [`timer`], [`uart`], [`adc`], [`spi`], [`i2c`], [`rtc`], [`usb`] - descriptor types
//! - [`vector`] - interrupt lines and vector bindings
//! - [`board`] - the per-board aggregate drivers and the linter read
//! - [`lint`] - offline table checks
//! - [`bringup`] - bring-up typestate machine and its collaborators
//!
//! # Features
//!
//! - `std`: mocks and `std::error::Error` impls (host tests, xtask)
//! - `defmt`: `defmt::Format` on every public type

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Pedantic lints suppressed for this descriptor crate:
#![allow(clippy::doc_markdown)] // register and pin names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)] // one arm per instance reads like the datasheet
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod adc;
pub mod board;
pub mod bringup;
pub mod clock;
pub mod descriptor;
pub mod device;
pub mod i2c;
pub mod lint;
pub mod mocks;
pub mod pin;
pub mod rtc;
pub mod spi;
pub mod timer;
pub mod uart;
pub mod usb;
pub mod vector;

// Re-export the board-authoring vocabulary
pub use adc::{AdcChannel, AdcSettings};
pub use board::{Board, Table};
pub use clock::{ClockConfig, ClockError, GeneratorId};
pub use descriptor::{Descriptor, DescriptorRef, PeripheralClass};
pub use device::{ApbcMask, GclkId, Sercom, Tc};
pub use i2c::{I2cBus, I2cFlags, I2cSpeed};
pub use pin::{Mux, PinId, PinRole, PinRoute, PinShare, Port};
pub use rtc::{RtcDevice, RttDevice};
pub use spi::{SpiBus, SpiMisoPad, SpiMosiPad};
pub use timer::{CounterWidth, TcPrescaler, Timer};
pub use uart::{UartChannel, UartFlags, UartRxPad, UartTxPad};
pub use usb::{UsbController, UsbDevice};
pub use vector::{Irq, VectorBinding};

// Re-export bring-up types
pub use bringup::{Bringup, BringupConfig, BringupState, CpuHal, Indicators, NoIndicators};

// Re-export lint entry point
pub use lint::{check_board, Defect, LintReport, Severity};

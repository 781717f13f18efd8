//! SODAQ SAM D21 bring-up firmware
//!
//! Runs the fixed board bring-up sequence (clock, core, indicators,
//! interrupts) for the board selected at build time, then hands over to the
//! application.
//!
//! # Architecture
//!
//! ```text
//! main.rs (#[entry])
//!         ↓
//! hardware::board_init()    SAM D21 register collaborator (feature `hardware`)
//!         ↓
//! boot::run_bringup()       host-testable sequencing
//!         ↓
//! bsp_core::Bringup         typestate, one transition per step
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for the SAM D21 target (cortex-m, defmt, panic-probe)
//! - `sodaq-one` (default) / `sodaq-explorer` - Board selection
//! - `clock-direct` - Run from OSC8M instead of the PLL
//! - `analog-d0-d1` - SODAQ ONE: PB2/PB3 as analog inputs instead of UART 0
//! - `quiesce-usb` - Disable the USB controller before touching the clock
//!
//! # Examples
//!
//! ```bash
//! cargo build --release --target thumbv6m-none-eabi --features hardware
//! cargo build --release --target thumbv6m-none-eabi --features hardware,sodaq-explorer --no-default-features
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)]
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
// Register encoders widen ids in const fns, where `From` is unavailable.
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod boot;
pub mod exception_handlers;
pub mod indicators;
pub mod regs;

#[cfg(feature = "hardware")]
pub mod hardware;

pub use boot::{run_bringup, BOARD, BOOT};

// Host tooling crate: unwrap/expect/panic acceptable outside firmware.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod flash;
mod lint;
mod test;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

/// Rust target of every SAM D21 board.
pub(crate) const TARGET: &str = "thumbv6m-none-eabi";

/// Boards the firmware can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Board {
    SodaqOne,
    SodaqExplorer,
}

impl Board {
    pub(crate) const ALL: [Board; 2] = [Board::SodaqOne, Board::SodaqExplorer];

    /// probe-rs target name of the board's microcontroller.
    pub(crate) const fn chip(self) -> &'static str {
        match self {
            Board::SodaqOne => "ATSAMD21G18A",
            Board::SodaqExplorer => "ATSAMD21J18A",
        }
    }

    /// Cargo feature selecting this board in `boards` and `firmware`.
    pub(crate) const fn feature(self) -> &'static str {
        match self {
            Board::SodaqOne => "sodaq-one",
            Board::SodaqExplorer => "sodaq-explorer",
        }
    }
}

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "SODAQ SAM D21 board support development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flash firmware to a SAM D21 board via probe-rs
    Flash {
        /// Build and flash release version
        #[arg(short, long)]
        release: bool,
        /// Board to build for
        #[arg(long, value_enum, default_value_t = Board::SodaqOne)]
        board: Board,
    },
    /// Check firmware builds for every board and the host crates for no_std
    Check,
    /// Run all tests (unit, integration, and alternate board configurations)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Validate every board's descriptor tables
    Lint,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Flash { release, board } => flash::run(board, release),
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Lint => lint::run(),
    }
}

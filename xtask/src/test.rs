use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

use crate::Board;

/// Feature variants every board's tables and bring-up are tested under.
/// `None` is the board's default build.
const VARIANTS: [Option<&str>; 3] = [None, Some("clock-direct"), Some("analog-d0-d1")];

/// Crates whose tests depend on the board selection.
const BOARD_CRATES: [&str; 2] = ["boards", "firmware"];

/// One `cargo test` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Suite {
    label: String,
    args: Vec<String>,
}

impl Suite {
    fn new(label: impl Into<String>, args: &[&str]) -> Self {
        Self {
            label: label.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// Whether `variant` changes anything on `board`.
fn applies(board: Board, variant: Option<&str>) -> bool {
    // PB2/PB3 only exist as a UART/ADC choice on the SODAQ ONE.
    !(variant == Some("analog-d0-d1") && board == Board::SodaqExplorer)
}

/// Every suite to run, in order.
fn plan(unit_only: bool, integration_only: bool) -> Vec<Suite> {
    let mut suites = Vec::new();

    if !integration_only {
        suites.push(Suite::new("unit tests", &["test", "--workspace", "--lib"]));
    }
    if !unit_only {
        suites.push(Suite::new(
            "integration tests",
            &["test", "--workspace", "--tests"],
        ));
    }

    // Board × variant matrix. The default build of the default board is
    // already covered by the workspace runs above.
    if !integration_only {
        for board in Board::ALL {
            for variant in VARIANTS {
                if !applies(board, variant) || (board == Board::SodaqOne && variant.is_none()) {
                    continue;
                }
                let features = match variant {
                    Some(v) => format!("{},{v}", board.feature()),
                    None => board.feature().to_string(),
                };
                for krate in BOARD_CRATES {
                    suites.push(Suite::new(
                        format!("{krate} [{features}]"),
                        &[
                            "test",
                            "-p",
                            krate,
                            "--no-default-features",
                            "--features",
                            &features,
                        ],
                    ));
                }
            }
        }
    }

    suites.push(Suite::new("doc tests", &["test", "--workspace", "--doc"]));
    suites
}

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let total_start = Instant::now();
    let suites = plan(unit_only, integration_only);

    for suite in &suites {
        println!("{}", format!("  Running {}...", suite.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(&suite.args)
            .output()
            .with_context(|| format!("Failed to launch cargo for {}", suite.label))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            eprintln!("{}", format!("  ✗ {} failed", suite.label).red().bold());
            eprintln!();
            for line in stdout.lines() {
                eprintln!("  {line}");
            }
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{} failed", suite.label);
        }

        println!(
            "{}",
            format!(
                "  ✓ {} passed {} in {:.2}s",
                suite.label,
                extract_test_summary(&stdout),
                start.elapsed().as_secs_f64()
            )
            .green()
        );
    }

    println!();
    println!(
        "{}",
        format!(
            "✓ {} suites passed in {:.2}s",
            suites.len(),
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

/// Sum the `test result:` lines cargo prints once per test binary.
fn extract_test_summary(output: &str) -> String {
    let mut passed = 0u64;
    let mut binaries = 0u64;
    for line in output.lines().filter(|l| l.contains("test result:")) {
        binaries = binaries.saturating_add(1);
        let count = line
            .split(';')
            .find_map(|part| part.trim().strip_suffix(" passed"))
            .and_then(|part| part.rsplit(' ').next())
            .and_then(|n| n.parse::<u64>().ok())
            .unwrap_or(0);
        passed = passed.saturating_add(count);
    }
    if binaries == 0 {
        "(summary not available)".to_string()
    } else {
        format!("({passed} tests in {binaries} binaries)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(suites: &[Suite]) -> Vec<&str> {
        suites.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn full_plan_covers_every_board_variant() {
        let suites = plan(false, false);
        let labels = labels(&suites);
        assert_eq!(labels.first(), Some(&"unit tests"));
        assert_eq!(labels.last(), Some(&"doc tests"));
        for krate in BOARD_CRATES {
            assert!(labels.contains(&format!("{krate} [sodaq-one,clock-direct]").as_str()));
            assert!(labels.contains(&format!("{krate} [sodaq-one,analog-d0-d1]").as_str()));
            assert!(labels.contains(&format!("{krate} [sodaq-explorer]").as_str()));
            assert!(labels.contains(&format!("{krate} [sodaq-explorer,clock-direct]").as_str()));
        }
    }

    #[test]
    fn analog_variant_is_sodaq_one_only() {
        let suites = plan(false, false);
        assert!(!labels(&suites)
            .iter()
            .any(|l| l.contains("sodaq-explorer,analog-d0-d1")));
    }

    #[test]
    fn matrix_builds_select_one_board_explicitly() {
        for suite in plan(false, false).iter().filter(|s| s.label.contains('[')) {
            assert!(suite.args.contains(&"--no-default-features".to_string()));
        }
    }

    #[test]
    fn integration_only_skips_unit_and_matrix() {
        let suites = plan(false, true);
        assert_eq!(labels(&suites), ["integration tests", "doc tests"]);
    }

    #[test]
    fn unit_only_skips_integration() {
        let suites = plan(true, false);
        assert!(!labels(&suites).contains(&"integration tests"));
        assert!(labels(&suites).contains(&"unit tests"));
    }

    #[test]
    fn summary_adds_up_every_binary() {
        let output = "\
test result: ok. 5 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out
test result: ok. 12 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out";
        assert_eq!(extract_test_summary(output), "(17 tests in 2 binaries)");
        assert_eq!(extract_test_summary("nothing"), "(summary not available)");
    }
}

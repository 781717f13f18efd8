use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

use crate::{Board, TARGET};

/// One `cargo` invocation with a label; fails the run when `required`.
struct Step {
    label: String,
    args: Vec<String>,
    required: bool,
}

impl Step {
    fn new(label: impl Into<String>, args: &[&str], required: bool) -> Self {
        Self {
            label: label.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            required,
        }
    }
}

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking firmware builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    let mut steps = Vec::new();
    for board in Board::ALL {
        let features = format!("hardware,{}", board.feature());
        steps.push(Step::new(
            format!("hardware target ({}, {TARGET})", board.feature()),
            &[
                "check",
                "-p",
                "firmware",
                "--target",
                TARGET,
                "--no-default-features",
                "--features",
                &features,
            ],
            true,
        ));
    }
    for krate in ["bsp-core", "boards"] {
        steps.push(Step::new(
            format!("{krate} (no_std)"),
            &["check", "-p", krate, "--target", TARGET],
            true,
        ));
    }
    steps.push(Step::new(
        "clippy lints",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        false,
    ));
    steps.push(Step::new("code formatting", &["fmt", "--all", "--check"], false));

    for step in steps {
        println!("{}", format!("  Checking {}...", step.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(&step.args)
            .output()
            .with_context(|| format!("Failed to run {}", step.label))?;

        if output.status.success() {
            println!(
                "{}",
                format!(
                    "  ✓ {} passed in {:.2}s",
                    step.label,
                    start.elapsed().as_secs_f64()
                )
                .green()
            );
        } else if step.required {
            eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{} failed", step.label);
        } else {
            // Advisory only, shown but not fatal
            eprintln!("{}", format!("  ⚠ {} reported issues", step.label).yellow().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        }
        println!();
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

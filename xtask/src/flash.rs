use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

use crate::{Board, TARGET};

pub fn run(board: Board, release: bool) -> Result<()> {
    let mode = if release { "release" } else { "debug" };

    println!();
    println!(
        "{}",
        format!("🔨 Building firmware for {} ({} mode)...", board.feature(), mode)
            .cyan()
            .bold()
    );
    println!();

    // Build firmware for the SAM D21 target
    let build_start = Instant::now();
    let mut build_cmd = Command::new("cargo");
    build_cmd
        .arg("build")
        .arg("-p")
        .arg("firmware")
        .arg("--target")
        .arg(TARGET)
        .arg("--no-default-features")
        .arg("--features")
        .arg(format!("hardware,{}", board.feature()));

    if release {
        build_cmd.arg("--release");
    }

    let build_output = build_cmd.output().context("Failed to run cargo build")?;

    if !build_output.status.success() {
        eprintln!("{}", "✗ Build failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&build_output.stderr));
        anyhow::bail!("Build failed");
    }

    let build_time = build_start.elapsed();
    println!(
        "{}",
        format!("✓ Build successful in {:.2}s", build_time.as_secs_f64()).green()
    );
    println!();

    // Show binary size
    show_binary_size(release)?;
    println!();

    // Flash with probe-rs
    let chip = board.chip();
    println!("{}", format!("📡 Flashing to {chip}...").cyan().bold());
    println!("   {}", "Connecting to probe...".dimmed());

    let flash_start = Instant::now();
    let mut flash_cmd = Command::new("probe-rs");
    flash_cmd.arg("run");

    flash_cmd.arg(binary_path(release));

    flash_cmd
        .arg("--chip")
        .arg(chip)
        .arg("--probe-index")
        .arg("0");

    let flash_output = flash_cmd
        .output()
        .context("Failed to run probe-rs. Is probe-rs installed? (cargo install probe-rs-tools)")?;

    if !flash_output.status.success() {
        eprintln!("{}", "✗ Flash failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&flash_output.stderr));
        anyhow::bail!("Flash failed - check that the probe is connected and the device is powered");
    }

    let flash_time = flash_start.elapsed();
    println!(
        "{}",
        format!("✓ Flash successful in {:.2}s", flash_time.as_secs_f64()).green()
    );
    println!();
    println!("{}", format!("📟 {} is running on hardware!", board.feature()).bold());
    println!(
        "   {}",
        format!("Use 'probe-rs attach --chip {chip}' to view RTT logs").dimmed()
    );
    println!();

    Ok(())
}

fn binary_path(release: bool) -> String {
    let profile = if release { "release" } else { "debug" };
    format!("target/{TARGET}/{profile}/firmware")
}

fn show_binary_size(release: bool) -> Result<()> {
    let output = Command::new("rust-size")
        .arg(binary_path(release))
        .arg("-A")
        .output();

    match output {
        Ok(out) if out.status.success() => {
            println!("{}", "📊 Binary size:".cyan());
            let size_output = String::from_utf8_lossy(&out.stdout);
            for line in size_output.lines() {
                println!("   {}", line.dimmed());
            }
        }
        _ => {
            // If rust-size is not available, try cargo-size
            let output = Command::new("cargo")
                .arg("size")
                .arg("--")
                .arg("-A")
                .arg("--bin")
                .arg("firmware")
                .arg("--target")
                .arg(TARGET)
                .output();

            if let Ok(out) = output {
                if out.status.success() {
                    println!("{}", "📊 Binary size:".cyan());
                    let size_output = String::from_utf8_lossy(&out.stdout);
                    for line in size_output.lines().skip(1) {
                        // Skip cargo output
                        println!("   {}", line.dimmed());
                    }
                }
            }
        }
    }

    Ok(())
}

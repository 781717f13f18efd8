use anyhow::Result;
use bsp_core::{check_board, LintReport, Severity};
use colored::Colorize;

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Linting board descriptor tables...".cyan().bold());
    println!();

    let mut failed = 0usize;
    for board in boards::ALL_BOARDS {
        let report = check_board(board);
        print_report(&report);
        if !report.is_clean() {
            failed = failed.saturating_add(1);
        }
    }

    println!();
    if failed > 0 {
        anyhow::bail!("{failed} board(s) failed the table lint");
    }
    println!("{}", "✓ All boards lint clean!".green().bold());
    Ok(())
}

fn print_report(report: &LintReport) {
    let warnings = report.warnings().count();
    let errors = report.errors().count();

    if report.is_clean() {
        println!(
            "  {} {} ({} warning(s))",
            "✓".green(),
            report.board().bold(),
            warnings
        );
    } else {
        println!(
            "  {} {} ({} error(s), {} warning(s))",
            "✗".red(),
            report.board().bold(),
            errors,
            warnings
        );
    }

    for defect in report.defects() {
        match defect.severity() {
            Severity::Error => println!("      {} {defect}", "error:".red().bold()),
            Severity::Warning => println!("      {} {defect}", "warning:".yellow().bold()),
        }
    }

    if report.dropped() > 0 {
        println!(
            "      {}",
            format!("... {} more defect(s) not stored", report.dropped()).red()
        );
    }
}

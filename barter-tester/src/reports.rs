use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use crate::checks::PuzzleReport;

pub fn generate_console_report(
    out: &mut dyn Write,
    reports: &[PuzzleReport],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Puzzle Check Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=======================".cyan())?;

    let total = reports.len();
    let passed = reports.iter().filter(|r| r.passed).count();
    let failed = total - passed;

    writeln!(out, "Total puzzles: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(passed, total))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for report in reports {
        let status = if report.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {} (seed {})", status, report.label.bold(), report.seed)?;
        writeln!(
            out,
            "   {} after {} candidates, par {}, {} solutions, {} opening choices",
            report.outcome,
            report.candidates_examined,
            report.par,
            report.solutions,
            report.opening_choices
        )?;
        writeln!(out, "   Fingerprint: {}", short_fingerprint(&report.fingerprint))?;
        if !report.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &report.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let slowest = reports
        .iter()
        .max_by(|a, b| a.duration_ms.total_cmp(&b.duration_ms));
    if let Some(slowest) = slowest {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Slowest: {} ({:.1} ms)",
            slowest.label.yellow(),
            slowest.duration_ms
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, reports: &[PuzzleReport]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(reports)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, reports: &[PuzzleReport]) -> Result<()> {
    writeln!(out, "# Barter Puzzle Check Results\n")?;

    let total = reports.len();
    let passed = reports.iter().filter(|r| r.passed).count();

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total puzzles**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(passed, total))?;

    writeln!(out, "## Puzzles\n")?;
    writeln!(
        out,
        "| Status | Puzzle | Seed | Outcome | Par | Shortest | Solutions | Fingerprint |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|")?;
    for report in reports {
        let status = if report.passed { "✅" } else { "❌" };
        let shortest = report
            .shortest
            .map_or_else(|| "-".to_string(), |value| value.to_string());
        writeln!(
            out,
            "| {status} | {} | {} | {} | {} | {shortest} | {} | `{}` |",
            report.label,
            report.seed,
            report.outcome,
            report.par,
            report.solutions,
            short_fingerprint(&report.fingerprint)
        )?;
    }

    let failing: Vec<_> = reports.iter().filter(|r| !r.passed).collect();
    if !failing.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for report in failing {
            writeln!(out, "### {}\n", report.label)?;
            for failure in &report.failures {
                writeln!(out, "- {failure}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, reports: &[PuzzleReport]) -> Result<()> {
    writeln!(
        out,
        "label,seed,outcome,candidates,par,shortest,solutions,early_paths,opening_choices,branching_ok,trades,max_quantity,passed,duration_ms,fingerprint"
    )?;
    for report in reports {
        let shortest = report
            .shortest
            .map_or_else(String::new, |value| value.to_string());
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{:.3},{}",
            report.label,
            report.seed,
            report.outcome,
            report.candidates_examined,
            report.par,
            shortest,
            report.solutions,
            report.early_paths,
            report.opening_choices,
            report.branching_ok,
            report.trades,
            report.max_quantity,
            report.passed,
            report.duration_ms,
            report.fingerprint
        )?;
    }
    Ok(())
}

fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..16).unwrap_or(fingerprint)
}

fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = (passed as f64 / total as f64) * 100.0;
    rate
}

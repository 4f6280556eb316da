// src/report/mod.rs
use crate::verifier::{CheckReport, CheckResult};
use std::io::{self, Write};

/// Write a human-readable rendering of `report`.
///
/// Status and headers come first when a response was received, then the
/// classification. For an unknown page the captured body prefix follows.
pub fn write_report<W: Write>(out: &mut W, report: &CheckReport) -> io::Result<()> {
    writeln!(out, "GET {}", report.url)?;

    if let Some(status) = report.status {
        writeln!(out, "Status: {}", status)?;
        writeln!(out, "Headers:")?;
        for (name, value) in &report.headers {
            writeln!(out, "  {}: {}", name, value)?;
        }
    }

    match &report.result {
        CheckResult::Found => writeln!(out, "✅ {}", report.result)?,
        CheckResult::LoadedUnknown(prefix) => {
            writeln!(out, "⚠️  {}", report.result)?;
            writeln!(out, "Body (first {} chars):", prefix.chars().count())?;
            writeln!(out, "{}", prefix)?;
        }
        CheckResult::NotFound(_) | CheckResult::TransportError(_) => {
            writeln!(out, "❌ {}", report.result)?
        }
    }

    writeln!(
        out,
        "Checked at {} in {} ms",
        report.started_at.to_rfc3339(),
        report.response_time_ms()
    )
}

/// Print `report` to standard output.
pub fn print_report(report: &CheckReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report)?;
    out.flush()
}

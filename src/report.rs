//! Text and JSON rendering of solved cases.

use anyhow::{anyhow, Result};
use std::io::Write;

use crate::solver::{FallbackReason, Method};
use crate::CaseReport;

/// Points listed before the transcript elides the rest.
const POINTS_SHOWN: usize = 5;

/// Write a human-readable transcript of a solved case.
pub fn write_text<W: Write>(writer: &mut W, report: &CaseReport) -> Result<()> {
    let result = &report.result;

    writeln!(writer, "n={} k={}", report.n, report.k)?;
    writeln!(writer, "points ({}):", report.points.len())?;
    for point in report.points.iter().take(POINTS_SHOWN) {
        writeln!(writer, "  {point}")?;
    }
    if report.points.len() > POINTS_SHOWN {
        writeln!(writer, "  ... and {} more", report.points.len() - POINTS_SHOWN)?;
    }

    let method = match (result.method, result.fallback) {
        (Method::ExactSystem, _) => "exact system".to_string(),
        (Method::SimpleFallback, Some(FallbackReason::TooFewPoints)) => {
            "simple fallback (fewer than three points)".to_string()
        }
        (Method::SimpleFallback, Some(FallbackReason::SingularSystem)) => {
            "simple fallback (singular system)".to_string()
        }
        (Method::SimpleFallback, None) => "simple fallback".to_string(),
    };
    writeln!(writer, "method: {method}")?;
    if let Some(det) = result.determinant {
        writeln!(writer, "determinant: {det}")?;
    }
    if let Some(model) = result.model {
        writeln!(
            writer,
            "model: a={:.6} b={:.6} c={:.6}",
            model.a, model.b, model.c
        )?;
    }
    writeln!(writer, "constant c: {}", result.constant)?;

    writeln!(writer, "verification:")?;
    for deviation in &result.deviations {
        let status = if deviation.flagged { "FLAGGED" } else { "ok" };
        writeln!(
            writer,
            "  {status:<7} {} deviation {:.3}",
            deviation.point, deviation.magnitude
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Render the transcript into a string (useful for tests and snapshots).
pub fn render_text(report: &CaseReport) -> Result<String> {
    let mut buffer = Vec::new();
    write_text(&mut buffer, report)?;
    String::from_utf8(buffer).map_err(|_| anyhow!("rendered report is not valid UTF-8"))
}

/// Render a case as pretty-printed JSON.
pub fn render_json(report: &CaseReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

//! Markdown report generation for analysis results

use cinecert::{AnalysisResult, RowAnalysis, RowStatus};
use std::fmt::Write;

fn status_badge(status: RowStatus) -> &'static str {
    match status {
        RowStatus::Optimal => "✅ optimal",
        RowStatus::Acceptable => "🟢 acceptable",
        RowStatus::Warning => "⚠️ warning",
        RowStatus::Fail => "❌ fail",
    }
}

fn format_clearance(row: &RowAnalysis) -> String {
    match row.sightline_clearance {
        Some(clearance) => format!("{:+.1} in", clearance),
        None => "-".to_string(),
    }
}

// `write!` into a String cannot fail, results are ignored below
fn write_summary(out: &mut String, result: &AnalysisResult, title: &str) {
    let _ = writeln!(out, "# {}\n", title);
    let _ = writeln!(
        out,
        "**{}** | score {:.0}/100\n",
        result.certification.label(),
        result.score
    );
    let _ = writeln!(
        out,
        "- Screen: {:.1} x {:.1} in, {} (margin {:.1} in)",
        result.screen_dimensions.width,
        result.screen_dimensions.height,
        if result.screen_fit.fits {
            "fits the room"
        } else {
            "does NOT fit the room"
        },
        result.screen_fit.margin_inches
    );
    let _ = writeln!(
        out,
        "- Rows: {} optimal, {} acceptable, {} warning, {} fail",
        result.optimal_rows(),
        result.acceptable_rows(),
        result.warning_rows(),
        result.failed_rows()
    );
    if result.bass_leakage_warning {
        let _ = writeln!(
            out,
            "- Bass leakage: single drywall lets low bass escape the room"
        );
    }
    out.push('\n');
}

fn write_rows(out: &mut String, result: &AnalysisResult) {
    let _ = writeln!(out, "## Seating\n");
    let _ = writeln!(
        out,
        "| Row | Distance | VVA top | VVA bottom | HVA | Sightline | Status |"
    );
    let _ = writeln!(out, "|---|---|---|---|---|---|---|");
    for row in &result.rows {
        let _ = writeln!(
            out,
            "| {} | {:.1} ft | {:.1}° | {:.1}° | {:.1}° | {} | {} |",
            row.row_id,
            row.distance_from_screen,
            row.vertical_angles.to_top,
            row.vertical_angles.to_bottom,
            row.horizontal_angle,
            format_clearance(row),
            status_badge(row.overall_status)
        );
    }
    out.push('\n');

    for row in result.rows.iter().filter(|r| !r.notes.is_empty()) {
        let _ = writeln!(out, "Row {}:", row.row_id);
        for note in &row.notes {
            let _ = writeln!(out, "- {}", note);
        }
        out.push('\n');
    }
}

fn write_modes(out: &mut String, result: &AnalysisResult) {
    let _ = writeln!(out, "## Room modes\n");
    let _ = writeln!(out, "| Frequency | Mode | Intensity | Leakage | Treatment |");
    let _ = writeln!(out, "|---|---|---|---|---|");
    for mode in &result.room_modes {
        let _ = writeln!(
            out,
            "| {:.1} Hz | {} | {:.2} | {} | {} |",
            mode.frequency,
            mode.description,
            mode.intensity,
            if mode.bass_leakage { "yes" } else { "" },
            mode.treatment.treatment_type.label()
        );
    }
    out.push('\n');
}

fn write_rt60(out: &mut String, result: &AnalysisResult) {
    let rt60 = &result.rt60;
    let _ = writeln!(out, "## Reverberation\n");
    let _ = writeln!(
        out,
        "- RT60 (untreated): {:.2} s, target {:.2} s: {}",
        rt60.estimated_rt60,
        rt60.target_rt60,
        rt60.status.label()
    );
    let _ = writeln!(
        out,
        "- Average absorption {:.3}, {:.0} of {:.0} sabins",
        rt60.average_absorption, rt60.current_sabins, rt60.required_sabins
    );
    let _ = writeln!(
        out,
        "- Treatment coverage: {:.1}% of {:.0} ft²\n",
        rt60.treatment_coverage_required, rt60.surface_area
    );
}

fn write_treatments(out: &mut String, result: &AnalysisResult) {
    let _ = writeln!(out, "## Treatment plan\n");
    if result.treatments.is_empty() {
        let _ = writeln!(out, "No low-frequency treatment required.");
        return;
    }
    for treatment in &result.treatments {
        let _ = writeln!(out, "- {}", treatment.description);
    }
}

/// Render a complete analysis as a Markdown document
pub fn render_markdown(result: &AnalysisResult, title: &str) -> String {
    let mut out = String::new();
    write_summary(&mut out, result, title);
    write_rows(&mut out, result);
    write_modes(&mut out, result);
    write_rt60(&mut out, result);
    write_treatments(&mut out, result);
    out
}

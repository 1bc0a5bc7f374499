use crate::error::{CliError, Result};
use bindmode::core::diagnostics::Warning;
use bindmode::engine::report::{InteractionReport, ReportSummary};
use bindmode::workflows::analyze::AnalysisResult;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_FILE_NAME: &str = "report.json";
pub const RESIDUE_SUMMARY_FILE_NAME: &str = "binding_mode_summary.csv";

/// Layout of `report.json`: one array per interaction type at the top level, followed
/// by the summary statistics and any loader warnings.
#[derive(Serialize)]
struct ReportDocument<'a> {
    #[serde(flatten)]
    interactions: &'a InteractionReport,
    summary: ReportSummary,
    warnings: &'a [Warning],
}

/// Paths of the files written for one analysis.
#[derive(Debug, Clone)]
pub struct WrittenFiles {
    pub report: PathBuf,
    pub residue_summary: Option<PathBuf>,
}

pub fn write_outputs(output_dir: &Path, result: &AnalysisResult, with_csv: bool) -> Result<WrittenFiles> {
    fs::create_dir_all(output_dir)?;

    let report = output_dir.join(REPORT_FILE_NAME);
    write_report_json(&report, result)?;

    let residue_summary = if with_csv {
        let path = output_dir.join(RESIDUE_SUMMARY_FILE_NAME);
        write_residue_summary_csv(&path, &result.report)?;
        Some(path)
    } else {
        None
    };

    Ok(WrittenFiles {
        report,
        residue_summary,
    })
}

pub fn write_report_json(path: &Path, result: &AnalysisResult) -> Result<()> {
    let document = ReportDocument {
        interactions: &result.report,
        summary: result.report.summary(),
        warnings: &result.warnings,
    };
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &document).map_err(|e| CliError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    info!("Wrote interaction report to {:?}", path);
    Ok(())
}

/// Writes the distinct `(interaction_type, receptor_residue)` rows of the report.
pub fn write_residue_summary_csv(path: &Path, report: &InteractionReport) -> Result<()> {
    let output_error = |e: csv::Error| CliError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    };
    let mut writer = csv::Writer::from_path(path).map_err(output_error)?;
    let rows = report.residue_summary();
    if rows.is_empty() {
        writer
            .write_record(["interaction_type", "receptor_residue"])
            .map_err(output_error)?;
    }
    for row in &rows {
        writer.serialize(row).map_err(output_error)?;
    }
    writer.flush()?;
    info!(rows = rows.len(), "Wrote residue summary to {:?}", path);
    Ok(())
}

/// Console summary in the style of the analysis banner.
pub fn render_summary(result: &AnalysisResult, files: &WrittenFiles) -> String {
    let summary = result.report.summary();
    let rule = "=".repeat(60);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "BINDING MODE ANALYSIS SUMMARY".to_string(),
        rule.clone(),
        format!("Total interactions: {}", summary.total_interactions),
        format!("Unique receptor residues involved: {}", summary.unique_residues),
        String::new(),
        "Interaction type breakdown:".to_string(),
    ];
    for (kind, count) in &summary.interaction_counts {
        let residues = summary.residue_rows_per_type.get(kind).copied().unwrap_or(0);
        lines.push(format!("   - {kind}: {count} ({residues} residues)"));
    }
    if !result.warnings.is_empty() {
        lines.push(String::new());
        lines.push(format!("Warnings: {}", result.warnings.len()));
    }
    lines.push(String::new());
    lines.push(format!("Report: {}", files.report.display()));
    if let Some(csv) = &files.residue_summary {
        lines.push(format!("CSV summary: {}", csv.display()));
    }
    lines.push(rule);
    lines.join("\n")
}

use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use crate::commands::analyze::AnalysisReport;
use crate::commands::statistics::StatisticsReport;
use crate::error::AppError;
use crate::export::bundle::{build_zip, bundle_file_name};
use crate::export::keyword_report::{generate_keyword_report, KEYWORD_REPORT_FILE};
use crate::export::stats_report::{generate_stats_report, STATS_REPORT_FILE};
use crate::export::summary_report::report_file_name;
use crate::parser::types::TicketRecord;

pub const ANALYSIS_JSON_FILE: &str = "analysis.json";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: String,
    pub size_bytes: u64,
    pub duration_ms: u64,
}

fn write_artifact(out_dir: &Path, name: &str, bytes: &[u8], start: Instant) -> Result<ExportResult, AppError> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(name);
    std::fs::write(&path, bytes)?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());

    Ok(ExportResult {
        path: path.display().to_string(),
        size_bytes: bytes.len() as u64,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Write the analysis artifacts into `out_dir`.
///
/// The keyword workbook is only written when the subset is non-empty. With
/// `bundle`, a dated zip holding every written artifact is added last.
pub fn export_analysis(
    report: &AnalysisReport,
    out_dir: &Path,
    date: chrono::NaiveDate,
    bundle: bool,
) -> Result<Vec<ExportResult>, AppError> {
    let mut artifacts: Vec<(String, Vec<u8>)> = Vec::new();

    if report.keyword_matches.records.is_empty() {
        log::info!("No keyword matches, skipping {}", KEYWORD_REPORT_FILE);
    } else {
        let subset: Vec<&TicketRecord> = report.keyword_matches.records.iter().collect();
        let bytes = generate_keyword_report(&report.dataset, &subset)?;
        artifacts.push((KEYWORD_REPORT_FILE.to_string(), bytes));
    }

    artifacts.push((report_file_name(date), report.report_text.as_bytes().to_vec()));
    artifacts.push((ANALYSIS_JSON_FILE.to_string(), serde_json::to_vec_pretty(report)?));

    let mut results = Vec::with_capacity(artifacts.len() + 1);
    for (name, bytes) in &artifacts {
        results.push(write_artifact(out_dir, name, bytes, Instant::now())?);
    }

    if bundle {
        let start = Instant::now();
        let zip = build_zip(&artifacts)?;
        results.push(write_artifact(out_dir, &bundle_file_name(date), &zip, start)?);
    }

    Ok(results)
}

pub fn export_statistics(report: &StatisticsReport, out_dir: &Path) -> Result<ExportResult, AppError> {
    let start = Instant::now();
    let bytes = generate_stats_report(&report.rows, &report.category_column, &report.volume_column)?;
    write_artifact(out_dir, STATS_REPORT_FILE, &bytes, start)
}

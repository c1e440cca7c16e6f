use std::time::Instant;

use serde::Serialize;

use crate::analyzer::statistics::{aggregate_statistics, StatisticsRow};
use crate::analyzer::taxonomy::Taxonomy;
use crate::config::StatsConfig;
use crate::error::AppError;
use crate::export::stats_report::render_text_bars;
use crate::parser::dataset::Dataset;
use crate::parser::types::ParseWarning;

const TEXT_BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub category_column: String,
    pub volume_column: String,
    pub rows: Vec<StatisticsRow>,
    pub total_volume: f64,
    pub skipped_rows: usize,
    pub warnings: Vec<ParseWarning>,
    pub chart_text: String,
    pub duration_ms: u64,
}

pub fn run_statistics(
    dataset: &Dataset,
    stats: &StatsConfig,
    taxonomy: &Taxonomy,
) -> Result<StatisticsReport, AppError> {
    let start = Instant::now();

    let output = aggregate_statistics(dataset, stats, &taxonomy.coarse_category_map)?;
    log::info!(
        "Aggregated {} categories, total volume {} ({} rows skipped)",
        output.rows.len(),
        output.total_volume,
        output.skipped_rows
    );

    Ok(StatisticsReport {
        category_column: stats.category_column.trim().to_string(),
        volume_column: stats.volume_column.trim().to_string(),
        chart_text: render_text_bars(&output.rows, TEXT_BAR_WIDTH),
        rows: output.rows,
        total_volume: output.total_volume,
        skipped_rows: output.skipped_rows,
        warnings: output.warnings,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;

use crate::analyzer::grouping::{group_questions, keyword_match_subset};
use crate::analyzer::taxonomy::Taxonomy;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::export::summary_report::render_report;
use crate::parser::dataset::Dataset;
use crate::parser::pipeline::parse_tickets;
use crate::parser::types::TicketRecord;
use crate::summary::{summarize_groups, CategoryCard, TextGenerator};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatches {
    pub target_category: String,
    pub keywords: Vec<String>,
    pub count: usize,
    pub records: Vec<TicketRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub total_rows: usize,
    pub question_rows: usize,
    pub cards: Vec<CategoryCard>,
    pub failed_summaries: usize,
    pub keyword_matches: KeywordMatches,
    pub report_text: String,
    pub column_mapping: BTreeMap<String, String>,
    pub detected_columns: Vec<String>,
    pub duration_ms: u64,
    /// Resolved-header dataset, kept for the keyword workbook.
    #[serde(skip)]
    pub dataset: Dataset,
}

/// Full ticket analysis: parse, enrich, keyword subset, group, summarize.
///
/// `progress_cb(done, total)` follows the summary calls.
pub fn run_analysis(
    dataset: Dataset,
    taxonomy: &Taxonomy,
    config: &AppConfig,
    generator: &dyn TextGenerator,
    progress_cb: impl Fn(usize, usize),
) -> Result<AnalysisReport, AppError> {
    let start = Instant::now();

    let parsed = parse_tickets(dataset, taxonomy)?;

    let keyword_records: Vec<TicketRecord> =
        keyword_match_subset(&parsed.records, &config.keyword_filter)
            .into_iter()
            .cloned()
            .collect();
    log::info!(
        "Keyword filter matched {} rows in '{}'",
        keyword_records.len(),
        config.keyword_filter.target_category
    );

    let groups = group_questions(&parsed.records, config.top_keywords)?;
    let question_rows = groups.iter().map(|g| g.question_count()).sum();
    log::info!(
        "Analysing {} questions in {} categories",
        question_rows,
        groups.len()
    );

    let cards = summarize_groups(&groups, generator, config, progress_cb);
    let failed_summaries = cards.iter().filter(|c| c.is_failed()).count();
    let report_text = render_report(&cards);

    Ok(AnalysisReport {
        total_rows: parsed.records.len(),
        question_rows,
        failed_summaries,
        keyword_matches: KeywordMatches {
            target_category: config.keyword_filter.target_category.clone(),
            keywords: config.keyword_filter.keywords.clone(),
            count: keyword_records.len(),
            records: keyword_records,
        },
        cards,
        report_text,
        column_mapping: parsed.column_mapping.into_iter().collect(),
        detected_columns: parsed.detected_columns,
        duration_ms: start.elapsed().as_millis() as u64,
        dataset: parsed.dataset,
    })
}

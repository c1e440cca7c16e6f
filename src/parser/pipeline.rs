use std::collections::HashMap;
use std::time::Instant;

use crate::analyzer::taxonomy::Taxonomy;
use crate::error::AppError;
use crate::parser::columns::{build_column_map, validate_columns, ColumnMap, TicketField};
use crate::parser::dataset::Dataset;
use crate::parser::types::{RecordType, TicketRecord};

/// Output of `parse_tickets`: the dataset with resolved headers and one
/// enriched record per data row.
#[derive(Debug)]
pub struct ParseOutput {
    pub dataset: Dataset,
    pub records: Vec<TicketRecord>,
    /// Actual header → canonical name, for every header that was renamed.
    pub column_mapping: HashMap<String, String>,
    /// Headers as they appear in the source file.
    pub detected_columns: Vec<String>,
    pub parse_duration_ms: u64,
}

/// Resolve headers, validate the schema and build ticket records.
///
/// Fails with `AppError::MissingColumns` when one of the three ticket fields
/// cannot be found, before any row is looked at.
pub fn parse_tickets(mut dataset: Dataset, taxonomy: &Taxonomy) -> Result<ParseOutput, AppError> {
    let start = Instant::now();

    // Phase 1: resolve and validate columns
    let detected_columns = dataset.headers().to_vec();
    let column_mapping = build_column_map(dataset.headers());
    log::debug!("Column mapping: {:?}", column_mapping);
    dataset.rename_columns(&column_mapping);

    let col_map = ColumnMap::from_headers(dataset.headers());
    validate_columns(&col_map)?;

    // Phase 2: enrich rows
    let records: Vec<TicketRecord> = dataset
        .rows()
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let field = |f: TicketField| col_map.get(row, f.canonical());
            TicketRecord::new(
                row_idx,
                RecordType::parse(field(TicketField::RecordType)),
                field(TicketField::Content).map(str::to_string),
                field(TicketField::Category).map(str::to_string),
                taxonomy,
            )
        })
        .collect();

    log::info!(
        "Parsed {} ticket rows ({} resolved columns)",
        records.len(),
        column_mapping.len()
    );

    Ok(ParseOutput {
        dataset,
        records,
        column_mapping,
        detected_columns,
        parse_duration_ms: start.elapsed().as_millis() as u64,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────

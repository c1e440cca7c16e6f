use std::collections::HashMap;

use serde::Serialize;

use crate::analyzer::taxonomy::CoarseCategoryMap;
use crate::config::StatsConfig;
use crate::error::AppError;
use crate::parser::columns::{resolve_stats_columns, ColumnMap};
use crate::parser::dataset::Dataset;
use crate::parser::deserializers::parse_volume_cell;
use crate::parser::types::ParseWarning;

/// Rows echoed back when the statistics columns cannot be found.
const SAMPLE_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsRow {
    pub category: String,
    pub volume: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsOutput {
    /// Sorted by descending volume; ties keep first-seen order.
    pub rows: Vec<StatisticsRow>,
    pub total_volume: f64,
    pub skipped_rows: usize,
    pub warnings: Vec<ParseWarning>,
}

/// Sum the volume column per coarse category.
///
/// Headers are only trimmed (no inner-whitespace folding, unlike ticket
/// exports). Categories go through the coarse map; rows without a category
/// are skipped, a missing volume counts as zero, and a non-numeric volume is
/// skipped with a warning.
pub fn aggregate_statistics(
    dataset: &Dataset,
    columns: &StatsConfig,
    coarse_map: &CoarseCategoryMap,
) -> Result<StatisticsOutput, AppError> {
    let mut dataset = dataset.clone();
    dataset.trim_headers();
    let col_map = ColumnMap::from_headers(dataset.headers());

    let (cat_idx, vol_idx) =
        resolve_stats_columns(&col_map, &columns.category_column, &columns.volume_column)
            .ok_or_else(|| AppError::StatsMissingColumns {
                category: columns.category_column.trim().to_string(),
                volume: columns.volume_column.trim().to_string(),
                observed: dataset.headers().to_vec(),
                sample: dataset.sample_rows(SAMPLE_ROWS),
            })?;

    let mut rows: Vec<StatisticsRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut warnings = Vec::new();
    let mut skipped = 0usize;

    for row_idx in 0..dataset.len() {
        let line = row_idx + 2; // +1 header row, +1 one-based
        let Some(raw_category) = dataset.cell(row_idx, cat_idx) else {
            skipped += 1;
            continue;
        };
        let volume = match parse_volume_cell(dataset.cell(row_idx, vol_idx)) {
            Ok(v) => v,
            Err(raw) => {
                log::warn!("Statistics line {line}: non-numeric volume {raw:?}");
                warnings.push(ParseWarning {
                    line,
                    message: format!("non-numeric volume: {raw:?}"),
                });
                skipped += 1;
                continue;
            }
        };

        let category = coarse_map.normalize(raw_category);
        match index.get(&category) {
            Some(&slot) => rows[slot].volume += volume,
            None => {
                index.insert(category.clone(), rows.len());
                rows.push(StatisticsRow { category, volume });
            }
        }
    }

    // stable: equal sums keep first-seen order
    rows.sort_by(|a, b| {
        b.volume
            .partial_cmp(&a.volume)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_volume = rows.iter().map(|r| r.volume).sum();

    Ok(StatisticsOutput {
        rows,
        total_volume,
        skipped_rows: skipped,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coarse() -> CoarseCategoryMap {
        CoarseCategoryMap::from_pairs([
            ("결제, 취소, 환불", "결제/취소/환불"),
            ("모바일 기기", "모바일 기기 관련"),
            ("동영상 수강-PC", "동영상 수강 관련"),
        ])
    }

    fn run(csv: &str) -> Result<StatisticsOutput, AppError> {
        let ds = Dataset::from_csv_reader(csv.as_bytes(), b',').unwrap();
        aggregate_statistics(&ds, &StatsConfig::default(), &coarse())
    }

    fn pairs(out: &StatisticsOutput) -> Vec<(&str, f64)> {
        out.rows
            .iter()
            .map(|r| (r.category.as_str(), r.volume))
            .collect()
    }

    #[test]
    fn test_sums_per_category_with_first_seen_ties() {
        let out = run("대분류,건수\nA,3\nA,2\nB,5\n").unwrap();
        assert_eq!(pairs(&out), vec![("A", 5.0), ("B", 5.0)]);
    }

    #[test]
    fn test_tie_order_follows_first_seen() {
        let out = run("대분류,건수\nB,5\nA,3\nA,2\n").unwrap();
        assert_eq!(pairs(&out), vec![("B", 5.0), ("A", 5.0)]);
    }

    #[test]
    fn test_descending_order_three_sums() {
        let out = run("대분류,건수\nC,1\nA,4\nB,2\nA,3\nC,1\n").unwrap();
        assert_eq!(pairs(&out), vec![("A", 7.0), ("B", 2.0), ("C", 2.0)]);
        let out = run("대분류,건수\nLow,1\nHigh,10\nMid,5\n").unwrap();
        assert_eq!(pairs(&out), vec![("High", 10.0), ("Mid", 5.0), ("Low", 1.0)]);
        assert!((out.total_volume - 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_coarse_mapping_applied() {
        let out = run(
            "대분류,건수\n\"결제, 취소, 환불\",3\n모바일 기기,4\n\" 결제, 취소, 환불 \",2\n",
        )
        .unwrap();
        assert_eq!(
            pairs(&out),
            vec![("결제/취소/환불", 5.0), ("모바일 기기 관련", 4.0)]
        );
    }

    #[test]
    fn test_unmapped_coarse_category_kept() {
        let out = run("대분류,건수\n신규분류,2\n").unwrap();
        assert_eq!(pairs(&out), vec![("신규분류", 2.0)]);
    }

    #[test]
    fn test_headers_trimmed_only() {
        let out = run(" 대분류 , 건수\nA,1\n").unwrap();
        assert_eq!(out.rows.len(), 1);
        // inner whitespace is not folded for statistics sheets
        let err = run("대 분 류,건수\nA,1\n").unwrap_err();
        assert!(matches!(err, AppError::StatsMissingColumns { .. }));
    }

    #[test]
    fn test_missing_column_error_echoes_input() {
        match run("분류,합계\nA,1\nB,2\n").unwrap_err() {
            AppError::StatsMissingColumns {
                category,
                volume,
                observed,
                sample,
            } => {
                assert_eq!(category, "대분류");
                assert_eq!(volume, "건수");
                assert_eq!(observed, vec!["분류".to_string(), "합계".to_string()]);
                assert_eq!(sample, vec!["A | 1".to_string(), "B | 2".to_string()]);
            }
            e => panic!("Expected StatsMissingColumns, got {:?}", e),
        }
    }

    #[test]
    fn test_bad_and_missing_values() {
        let out = run("대분류,건수\nA,\"1,200\"\nA,n/a\n,5\nB,\n").unwrap();
        assert_eq!(pairs(&out), vec![("A", 1200.0), ("B", 0.0)]);
        assert_eq!(out.skipped_rows, 2);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, 3);
    }
}

//! Question grouping by representative category, and the keyword-match subset.
//!
//! Everything here is pure: same records in, same groups out, in the same order.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::KeywordFilterConfig;
use crate::error::AppError;
use crate::nlp::terms::{top_terms, TermFrequency};
use crate::parser::types::TicketRecord;

/// All question rows sharing one representative category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: String,
    /// Question texts in source row order.
    pub questions: Vec<String>,
    pub top_keywords: Vec<TermFrequency>,
    /// Distinct staff mentions, first occurrence first.
    pub staff_mentions: Vec<String>,
}

impl CategoryGroup {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn keyword_terms(&self) -> Vec<&str> {
        self.top_keywords.iter().map(|k| k.term.as_str()).collect()
    }
}

/// Group question rows by representative category, in order of first appearance.
///
/// Rows that are not questions, or whose content or category is missing, are
/// left out. `top_n` bounds the keyword list of each group.
/// Returns `AppError::NoQuestionRows` when nothing is left to group.
pub fn group_questions(
    records: &[TicketRecord],
    top_n: usize,
) -> Result<Vec<CategoryGroup>, AppError> {
    let mut order: Vec<CategoryGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.record_type().is_question()) {
        let (Some(content), Some(category)) = (record.content(), record.representative_category())
        else {
            continue;
        };

        let slot = *index.entry(category).or_insert_with(|| {
            order.push(CategoryGroup {
                category: category.to_string(),
                questions: Vec::new(),
                top_keywords: Vec::new(),
                staff_mentions: Vec::new(),
            });
            order.len() - 1
        });

        let group = &mut order[slot];
        group.questions.push(content.to_string());
        if let Some(staff) = record.staff_mention() {
            if !group.staff_mentions.iter().any(|s| s == staff) {
                group.staff_mentions.push(staff.to_string());
            }
        }
    }

    if order.is_empty() {
        return Err(AppError::NoQuestionRows);
    }

    for group in order.iter_mut() {
        group.top_keywords = top_terms(group.questions.iter().map(|q| Some(q.as_str())), top_n);
    }

    Ok(order)
}

/// Case-insensitive substring test against any keyword.
pub fn contains_any_keyword(text: &str, keywords: &[String]) -> bool {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|k| haystack.contains(&k.to_lowercase()))
}

/// Question and answer rows in the target category whose content mentions one
/// of the keywords.
///
/// The whole record list is scanned (answers often carry the diagnostic
/// wording). The target matches either the representative category or the
/// trimmed raw category.
pub fn keyword_match_subset<'a>(
    records: &'a [TicketRecord],
    filter: &KeywordFilterConfig,
) -> Vec<&'a TicketRecord> {
    let target = filter.target_category.trim();

    records
        .iter()
        .filter(|r| r.record_type().is_question() || r.record_type().is_answer())
        .filter(|r| {
            r.representative_category() == Some(target)
                || r.raw_category().map(str::trim) == Some(target)
        })
        .filter(|r| {
            r.content()
                .is_some_and(|c| contains_any_keyword(c, &filter.keywords))
        })
        .collect()
}

//! Per-category summary generation.
//!
//! One generation call per group, in group order. A failed call only affects
//! its own card: the summary becomes `SUMMARY_FAILED` and the batch goes on.

pub mod client;
pub mod prompt;

use serde::Serialize;

use crate::analyzer::grouping::CategoryGroup;
use crate::config::AppConfig;
use crate::nlp::terms::TermFrequency;

pub use client::{HttpTextGenerator, LlmError, TextGenerator};
pub use prompt::SummaryRequest;

/// Summary text of a group whose generation call failed.
pub const SUMMARY_FAILED: &str = "(요약 실패)";
/// Staff line shown when a group mentions nobody.
pub const NO_STAFF: &str = "없음";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SummaryStatus {
    Generated,
    Failed { reason: String },
}

/// Display artifact for one category group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCard {
    pub category: String,
    pub question_count: usize,
    pub top_keywords: Vec<TermFrequency>,
    pub staff_mentions: Vec<String>,
    pub summary: String,
    pub status: SummaryStatus,
}

impl CategoryCard {
    pub fn staff_line(&self) -> String {
        if self.staff_mentions.is_empty() {
            NO_STAFF.to_string()
        } else {
            self.staff_mentions.join(", ")
        }
    }

    pub fn keyword_line(&self) -> String {
        self.top_keywords
            .iter()
            .map(|k| k.term.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, SummaryStatus::Failed { .. })
    }
}

/// Summarize every group, in order. Never fails as a whole.
///
/// `progress_cb(done, total)` runs after each group.
pub fn summarize_groups(
    groups: &[CategoryGroup],
    generator: &dyn TextGenerator,
    config: &AppConfig,
    progress_cb: impl Fn(usize, usize),
) -> Vec<CategoryCard> {
    let total = groups.len();
    let mut cards = Vec::with_capacity(total);

    for (i, group) in groups.iter().enumerate() {
        let prompt = SummaryRequest::from_group(group, config.max_prompt_questions).render();

        let (summary, status) = match generator.complete(&prompt) {
            Ok(text) => (text, SummaryStatus::Generated),
            Err(e) => {
                log::warn!("Summary failed for category '{}': {}", group.category, e);
                (
                    SUMMARY_FAILED.to_string(),
                    SummaryStatus::Failed {
                        reason: e.to_string(),
                    },
                )
            }
        };

        cards.push(CategoryCard {
            category: group.category.clone(),
            question_count: group.question_count(),
            top_keywords: group.top_keywords.clone(),
            staff_mentions: group.staff_mentions.clone(),
            summary,
            status,
        });

        progress_cb(i + 1, total);
    }

    let failed = cards.iter().filter(|c| c.is_failed()).count();
    log::info!(
        "Summarized {} categories ({} failed)",
        cards.len(),
        failed
    );

    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn group(category: &str, questions: &[&str], staff: &[&str]) -> CategoryGroup {
        CategoryGroup {
            category: category.into(),
            questions: questions.iter().map(|q| q.to_string()).collect(),
            top_keywords: vec![TermFrequency {
                term: "결제".into(),
                count: 2,
            }],
            staff_mentions: staff.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn three_groups() -> Vec<CategoryGroup> {
        vec![
            group("A", &["a1", "a2"], &[]),
            group("B", &["b1"], &["전한길"]),
            group("C", &["c1"], &[]),
        ]
    }

    #[test]
    fn test_second_call_fails_others_survive() {
        let calls = Cell::new(0);
        let generator = |_: &str| -> Result<String, LlmError> {
            calls.set(calls.get() + 1);
            if calls.get() == 2 {
                Err(LlmError::Http("connection reset".into()))
            } else {
                Ok(format!("요약 {} 관련 문의 접수", calls.get()))
            }
        };

        let cards = summarize_groups(&three_groups(), &generator, &AppConfig::default(), |_, _| {});

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].summary, "요약 1 관련 문의 접수");
        assert_eq!(cards[1].summary, SUMMARY_FAILED);
        assert_eq!(cards[2].summary, "요약 3 관련 문의 접수");
        assert_eq!(cards[0].status, SummaryStatus::Generated);
        match &cards[1].status {
            SummaryStatus::Failed { reason } => assert!(reason.contains("connection reset")),
            s => panic!("Expected Failed, got {:?}", s),
        }
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_group_order_and_progress() {
        let seen = RefCell::new(Vec::new());
        let progress = RefCell::new(Vec::new());
        let generator = |prompt: &str| -> Result<String, LlmError> {
            seen.borrow_mut().push(prompt.to_string());
            Ok("ok".into())
        };

        let cards = summarize_groups(&three_groups(), &generator, &AppConfig::default(), |d, t| {
            progress.borrow_mut().push((d, t))
        });

        let names: Vec<&str> = cards.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(seen.borrow()[0].contains("'A' 카테고리"));
        assert!(seen.borrow()[1].contains("전한길 선생님"));
        assert_eq!(*progress.borrow(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_all_failures_still_yield_cards() {
        let generator = |_: &str| -> Result<String, LlmError> { Err(LlmError::EmptyResponse) };
        let cards = summarize_groups(&three_groups(), &generator, &AppConfig::default(), |_, _| {});
        assert_eq!(cards.len(), 3);
        assert!(cards.iter().all(|c| c.summary == SUMMARY_FAILED && c.is_failed()));
    }

    #[test]
    fn test_card_lines() {
        let generator = |_: &str| -> Result<String, LlmError> { Ok("s".into()) };
        let cards = summarize_groups(&three_groups(), &generator, &AppConfig::default(), |_, _| {});
        assert_eq!(cards[0].staff_line(), NO_STAFF);
        assert_eq!(cards[1].staff_line(), "전한길");
        assert_eq!(cards[0].keyword_line(), "결제");
        assert_eq!(cards[0].question_count, 2);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(SummaryStatus::Failed {
            reason: "timeout".into(),
        })
        .unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["reason"], "timeout");
        assert_eq!(
            serde_json::to_value(SummaryStatus::Generated).unwrap()["state"],
            "generated"
        );
    }
}

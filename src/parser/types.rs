use serde::Serialize;

use crate::analyzer::staff::StaffRoster;
use crate::analyzer::taxonomy::{CategoryMap, Taxonomy};

/// Kind of row in a support export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecordType {
    Question,
    Answer,
    /// Any other marker, kept verbatim (trimmed).
    Other(String),
}

impl RecordType {
    /// "Q" / "question" / "질문" / "문의" → Question, "A" / "answer" / "답변" → Answer.
    pub fn parse(raw: Option<&str>) -> Self {
        let value = raw.unwrap_or("").trim();
        match value.to_ascii_lowercase().as_str() {
            "q" | "question" | "질문" | "문의" => RecordType::Question,
            "a" | "answer" | "답변" => RecordType::Answer,
            _ => RecordType::Other(value.to_string()),
        }
    }

    pub fn is_question(&self) -> bool {
        matches!(self, RecordType::Question)
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, RecordType::Answer)
    }
}

/// One ticket row with its derived fields.
///
/// `representative_category` and `staff_mention` are functions of
/// `raw_category` and `content`; the setters recompute them, there is no way
/// to assign them directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    row: usize,
    record_type: RecordType,
    content: Option<String>,
    raw_category: Option<String>,
    representative_category: Option<String>,
    staff_mention: Option<String>,
}

impl TicketRecord {
    pub fn new(
        row: usize,
        record_type: RecordType,
        content: Option<String>,
        raw_category: Option<String>,
        taxonomy: &Taxonomy,
    ) -> Self {
        let mut record = TicketRecord {
            row,
            record_type,
            content: None,
            raw_category: None,
            representative_category: None,
            staff_mention: None,
        };
        record.set_content(content, &taxonomy.staff_roster);
        record.set_raw_category(raw_category, &taxonomy.category_map);
        record
    }

    pub fn set_content(&mut self, content: Option<String>, roster: &StaffRoster) {
        self.staff_mention = roster.detect(content.as_deref()).map(str::to_string);
        self.content = content;
    }

    pub fn set_raw_category(&mut self, raw_category: Option<String>, map: &CategoryMap) {
        self.representative_category = raw_category.as_deref().map(|c| map.normalize(c));
        self.raw_category = raw_category;
    }

    /// Zero-based data row in the source dataset.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn raw_category(&self) -> Option<&str> {
        self.raw_category.as_deref()
    }

    pub fn representative_category(&self) -> Option<&str> {
        self.representative_category.as_deref()
    }

    pub fn staff_mention(&self) -> Option<&str> {
        self.staff_mention.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    pub line: usize,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> Taxonomy {
        Taxonomy {
            category_map: CategoryMap::from_pairs([("결제, 취소, 환불 - 결제", "결제/취소/환불")]),
            coarse_category_map: Default::default(),
            staff_roster: StaffRoster::new(["전한길"]),
        }
    }

    #[test]
    fn test_record_type_parse() {
        assert_eq!(RecordType::parse(Some("Q")), RecordType::Question);
        assert_eq!(RecordType::parse(Some(" q ")), RecordType::Question);
        assert_eq!(RecordType::parse(Some("질문")), RecordType::Question);
        assert_eq!(RecordType::parse(Some("A")), RecordType::Answer);
        assert_eq!(RecordType::parse(Some("Answer")), RecordType::Answer);
        assert_eq!(RecordType::parse(Some("메모")), RecordType::Other("메모".into()));
        assert_eq!(RecordType::parse(None), RecordType::Other(String::new()));
    }

    #[test]
    fn test_derived_fields_on_new() {
        let t = taxonomy();
        let r = TicketRecord::new(
            0,
            RecordType::Question,
            Some("전한길 교재 결제 문의".into()),
            Some("결제, 취소, 환불 - 결제".into()),
            &t,
        );
        assert_eq!(r.representative_category(), Some("결제/취소/환불"));
        assert_eq!(r.staff_mention(), Some("전한길"));
    }

    #[test]
    fn test_setters_recompute_derived_fields() {
        let t = taxonomy();
        let mut r = TicketRecord::new(
            3,
            RecordType::Question,
            Some("전한길 문의".into()),
            Some("결제, 취소, 환불 - 결제".into()),
            &t,
        );
        r.set_content(Some("배송 문의".into()), &t.staff_roster);
        assert_eq!(r.staff_mention(), None);
        r.set_raw_category(Some("기타 - 기타".into()), &t.category_map);
        assert_eq!(r.representative_category(), Some("기타 - 기타"));
        r.set_raw_category(None, &t.category_map);
        assert_eq!(r.representative_category(), None);
        assert_eq!(r.row(), 3);
    }

    #[test]
    fn test_missing_fields_stay_missing() {
        let t = taxonomy();
        let r = TicketRecord::new(0, RecordType::Answer, None, None, &t);
        assert!(r.content().is_none());
        assert!(r.staff_mention().is_none());
        assert!(r.representative_category().is_none());
    }
}

use crate::summary::CategoryCard;

pub const REPORT_HEADING: &str = "## 주요 문의 요약 (강사 포함 자동 인식)";

/// Plain-text daily report: the heading, then one `[category]` block per card
/// in card order, blocks separated by a blank line.
pub fn render_report(cards: &[CategoryCard]) -> String {
    let blocks: Vec<String> = cards
        .iter()
        .map(|c| format!("[{}]\n{}\n", c.category, c.summary))
        .collect();
    format!("{REPORT_HEADING}\n\n{}", blocks.join("\n"))
}

pub fn report_file_name(date: chrono::NaiveDate) -> String {
    format!("cs_report_{}.txt", date.format("%Y-%m-%d"))
}

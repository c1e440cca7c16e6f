use crate::analyzer::grouping::CategoryGroup;

/// Every summary line must end with this phrase.
pub const CLOSING_PHRASE: &str = "관련 문의 접수";
pub const MAX_SUMMARY_LINES: usize = 5;
pub const MAX_PROMPT_KEYWORDS: usize = 10;

/// What the generation service is told about one category group.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest<'a> {
    pub category: &'a str,
    pub question_count: usize,
    pub keywords: Vec<&'a str>,
    pub staff: &'a [String],
    /// Leading questions, verbatim.
    pub questions: &'a [String],
}

impl<'a> SummaryRequest<'a> {
    pub fn from_group(group: &'a CategoryGroup, max_questions: usize) -> Self {
        let keywords = group
            .top_keywords
            .iter()
            .take(MAX_PROMPT_KEYWORDS)
            .map(|k| k.term.as_str())
            .collect();
        let shown = group.questions.len().min(max_questions);

        Self {
            category: &group.category,
            question_count: group.question_count(),
            keywords,
            staff: &group.staff_mentions,
            questions: &group.questions[..shown],
        }
    }

    pub fn render(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "아래는 '{}' 카테고리에 해당하는 회원 문의 내용입니다.\n",
            self.category
        ));
        prompt.push_str(&format!("총 {}건의 문의가 있습니다.\n", self.question_count));
        prompt.push_str(&format!("주요 키워드: {}\n", self.keywords.join(", ")));
        if !self.staff.is_empty() {
            prompt.push_str(&format!(
                "특정 강사 관련 문의 포함: {} 선생님 관련 문의 포함.\n",
                self.staff.join(", ")
            ));
        }

        prompt.push_str("\n아래 조건을 반드시 지켜 요약하세요.\n");
        prompt.push_str(&format!(
            "1. 각 줄은 반드시 어떤 문의인지 알 수 있도록 간략하게 정리해서 '~ {CLOSING_PHRASE}' 형태로 끝날 것.\n"
        ));
        prompt.push_str(&format!(
            "2. 강사명이 포함된 경우 반드시 명시할 것 (예: '유휘운 선생님 교재 {CLOSING_PHRASE}').\n"
        ));
        prompt.push_str("3. 불필요한 설명, 원인, 사유, 문장형 해설 금지.\n");
        prompt.push_str(&format!("4. 최대 {MAX_SUMMARY_LINES}줄까지만 작성.\n"));
        prompt.push_str("5. 같은 의미의 문의는 하나로 묶을 것.\n");

        prompt.push_str("\n문의 내용:\n");
        prompt.push_str(&self.questions.join("\n"));
        prompt.push('\n');

        prompt
    }
}

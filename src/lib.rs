pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod nlp;
pub mod parser;
pub mod state;
pub mod summary;

use std::process::ExitCode;

use clap::Parser;

pub fn run() -> ExitCode {
    let cli = cli::Cli::parse();
    cli::configure_logging(cli.verbose);

    match cli::execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_warning() => {
            log::warn!("{}", e);
            eprintln!("warning: {}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ─── E2E Integration Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod e2e_tests {
    use std::cell::Cell;

    use rust_xlsxwriter::Workbook;

    use crate::analyzer::taxonomy::Taxonomy;
    use crate::commands::analyze::run_analysis;
    use crate::commands::export::{export_analysis, export_statistics};
    use crate::commands::statistics::run_statistics;
    use crate::config::AppConfig;
    use crate::parser::dataset::Dataset;
    use crate::summary::{LlmError, SUMMARY_FAILED};

    const TICKETS_CSV: &str = "\u{feff}구 분,내용 ,카테고리\n\
        Q,전한길 선생님 교재 배송이 늦어요,\"강좌/상품 신청, 배송 - 배송\"\n\
        A,배송 일정 안내드렸습니다,\"강좌/상품 신청, 배송 - 배송\"\n\
        Q,교재 반송 신청합니다,\"강좌/상품 신청, 배송 - 반송\"\n\
        Q,아이패드 iOS 업데이트 후 중복 로그인 오류,모바일 기기 - 모바일 기기\n\
        A,플레이어 ID 초기화 처리했습니다,모바일 기기 - 모바일 기기\n\
        Q,카드 결제 취소 요청,\"결제, 취소, 환불 - 결제\"\n\
        Q,,\"결제, 취소, 환불 - 결제\"\n\
        Q,신규 분류 문의,신규 - 분류\n";

    /// E2E: ticket CSV on disk → parse → group → summarize (one failure) → export
    #[test]
    fn test_e2e_ticket_analysis_pipeline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("tickets.csv");
        std::fs::write(&input, TICKETS_CSV).expect("write fixture");

        // 1. Load
        let config = AppConfig::default();
        let taxonomy = Taxonomy::builtin();
        let dataset = Dataset::open(&input, config.csv_delimiter_byte()).expect("CSV loading failed");
        assert_eq!(dataset.len(), 8);

        // 2. Analyse with a generator that fails on the second category
        let calls = Cell::new(0);
        let generator = |prompt: &str| -> Result<String, LlmError> {
            calls.set(calls.get() + 1);
            if calls.get() == 2 {
                return Err(LlmError::Status {
                    status: 500,
                    body: "upstream".into(),
                });
            }
            assert!(prompt.contains("관련 문의 접수"));
            Ok("교재 배송 지연 관련 문의 접수".into())
        };
        let progress = Cell::new((0, 0));
        let report = run_analysis(dataset, &taxonomy, &config, &generator, |d, t| {
            progress.set((d, t))
        })
        .expect("Analysis failed");

        let names: Vec<&str> = report.cards.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "넥스트패스/강좌/교재 신청, 배송",
                "동영상, 모바일 기기 관련",
                "결제/취소/환불",
                "신규 - 분류",
            ]
        );
        assert_eq!(progress.get(), (4, 4));
        assert_eq!(report.cards[0].question_count, 2);
        assert_eq!(report.cards[0].staff_mentions, vec!["전한길".to_string()]);
        assert_eq!(report.cards[1].summary, SUMMARY_FAILED);
        assert!(report.cards[1].is_failed());
        assert_eq!(report.cards[2].question_count, 1);
        assert_eq!(report.question_rows, 5);
        assert_eq!(report.keyword_matches.count, 2);
        assert_eq!(report.column_mapping.len(), 3);

        // 3. Export
        let out_dir = dir.path().join("out");
        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).expect("date");
        let results = export_analysis(&report, &out_dir, date, true).expect("Export failed");
        assert_eq!(results.len(), 4);

        let text = std::fs::read_to_string(out_dir.join("cs_report_2024-06-01.txt")).expect("report");
        assert!(text.starts_with("## 주요 문의 요약"));
        assert!(text.contains("[동영상, 모바일 기기 관련]\n(요약 실패)\n\n[결제/취소/환불]"));

        let xlsx = std::fs::read(out_dir.join("keyword_extracted_data.xlsx")).expect("xlsx");
        assert_eq!(&xlsx[0..2], &[0x50, 0x4B]);
        assert!(out_dir.join("cs_report_2024-06-01.zip").exists());
    }

    /// E2E: statistics workbook on disk → aggregate → chart workbook
    #[test]
    fn test_e2e_statistics_pipeline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("counts.xlsx");

        let mut wb = Workbook::new();
        let ws = wb.add_worksheet();
        let rows: [(&str, f64); 5] = [
            ("모바일 기기", 4.0),
            ("결제, 취소, 환불", 9.0),
            ("사이트 이용", 3.0),
            ("공무원 수험정보", 2.0),
            ("모바일 기기", 1.0),
        ];
        ws.write(0, 0, " 대분류 ").expect("write");
        ws.write(0, 1, "건수").expect("write");
        for (i, (category, volume)) in rows.iter().enumerate() {
            ws.write(i as u32 + 1, 0, *category).expect("write");
            ws.write(i as u32 + 1, 1, *volume).expect("write");
        }
        wb.save(&input).expect("save fixture");

        let config = AppConfig::default();
        let dataset = Dataset::open(&input, config.csv_delimiter_byte()).expect("XLSX loading failed");
        let report = run_statistics(&dataset, &config.stats, &Taxonomy::builtin())
            .expect("Statistics failed");

        let pairs: Vec<(&str, f64)> = report
            .rows
            .iter()
            .map(|r| (r.category.as_str(), r.volume))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("결제/취소/환불", 9.0),
                ("모바일 기기 관련", 5.0),
                ("홈페이지/이벤트 관련", 5.0),
            ]
        );
        assert!((report.total_volume - 19.0).abs() < 1e-10);

        let result = export_statistics(&report, dir.path()).expect("Export failed");
        let bytes = std::fs::read(&result.path).expect("read export");
        assert_eq!(&bytes[0..2], &[0x50, 0x4B]);
    }
}

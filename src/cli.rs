use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

use crate::commands::analyze::{run_analysis, AnalysisReport};
use crate::commands::config::{load_settings, show_config};
use crate::commands::export::{export_analysis, export_statistics, ExportResult};
use crate::commands::statistics::{run_statistics, StatisticsReport};
use crate::error::AppError;
use crate::export::format_volume;
use crate::parser::dataset::Dataset;
use crate::summary::{CategoryCard, HttpTextGenerator, SummaryStatus};

#[derive(Parser, Debug)]
#[command(
    name = "cs-digest",
    version,
    about = "Summarize customer-support ticket exports per category"
)]
pub struct Cli {
    /// JSON configuration file (defaults apply to absent keys)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Group questions by category and generate one summary per category
    Analyze {
        /// Ticket export (.csv, .xlsx, .xls, .ods)
        input: PathBuf,

        #[arg(short, long, default_value = "reports")]
        out_dir: PathBuf,

        /// Also write a dated zip of all artifacts
        #[arg(long)]
        zip: bool,

        /// Print the report as JSON instead of cards
        #[arg(long)]
        json: bool,

        /// Print only, write nothing
        #[arg(long)]
        no_export: bool,
    },
    /// Sum ticket volumes per coarse category
    Stats {
        input: PathBuf,

        /// Write category_statistics.xlsx here
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// `RUST_LOG` wins over `-v` when set.
pub fn configure_logging(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level(verbose));
    builder.parse_default_env();
    builder.format_timestamp(None);
    // a second init (tests) is harmless
    let _ = builder.try_init();
}

pub fn execute(cli: &Cli) -> Result<(), AppError> {
    let (config, taxonomy) = load_settings(cli.config.as_deref())?;

    match &cli.command {
        Command::Analyze {
            input,
            out_dir,
            zip,
            json,
            no_export,
        } => {
            let generator = HttpTextGenerator::from_env(config.generation.clone())
                .map_err(|e| AppError::Config(e.to_string()))?;
            let dataset = Dataset::open(input, config.csv_delimiter_byte())?;

            let pb = progress_bar();
            let report = run_analysis(dataset, &taxonomy, &config, &generator, |done, total| {
                pb.set_length(total as u64);
                pb.set_position(done as u64);
            })?;
            pb.finish_and_clear();

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_analysis(&report));
            }

            if !*no_export {
                let results = export_analysis(&report, out_dir, chrono::Local::now().date_naive(), *zip)?;
                print_exports(&results);
            }
            Ok(())
        }
        Command::Stats { input, out_dir } => {
            let dataset = Dataset::open(input, config.csv_delimiter_byte())?;
            let report = run_statistics(&dataset, &config.stats, &taxonomy)?;
            print!("{}", render_statistics(&report));

            if let Some(dir) = out_dir {
                let result = export_statistics(&report, dir)?;
                print_exports(std::slice::from_ref(&result));
            }
            Ok(())
        }
        Command::Config => {
            println!("{}", show_config(&config, &taxonomy)?);
            Ok(())
        }
    }
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} categories")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

// ── Terminal rendering ────────────────────────────────────────────────────────

pub fn render_card(card: &CategoryCard) -> String {
    let keywords = card.keyword_line();
    let keywords = if keywords.is_empty() { "—".to_string() } else { keywords };
    let status = match &card.status {
        SummaryStatus::Generated => "요약 생성 완료".to_string(),
        SummaryStatus::Failed { reason } => format!("요약 실패: {reason}"),
    };

    format!(
        "📂 [{}]\n총 {}건 • 주요 키워드: {}\n강사: {} | {}\n{}\n",
        card.category,
        card.question_count,
        keywords,
        card.staff_line(),
        status,
        card.summary
    )
}

fn render_analysis(report: &AnalysisReport) -> String {
    let mut out = format!(
        "총 {}개 대표 카테고리에서 {}건의 문의를 분석했습니다.\n",
        report.cards.len(),
        report.question_rows
    );
    out.push_str(&format!(
        "키워드 추출 ({}): {}건\n\n",
        report.keyword_matches.target_category, report.keyword_matches.count
    ));
    for card in &report.cards {
        out.push_str(&render_card(card));
        out.push('\n');
    }
    out
}

fn render_statistics(report: &StatisticsReport) -> String {
    let mut out = format!("{} / {}\n", report.category_column, report.volume_column);
    for row in &report.rows {
        out.push_str(&format!("{}\t{}\n", row.category, format_volume(row.volume)));
    }
    out.push_str(&format!("합계\t{}\n\n", format_volume(report.total_volume)));
    out.push_str(&report.chart_text);
    for w in &report.warnings {
        out.push_str(&format!("line {}: {}\n", w.line, w.message));
    }
    out
}

fn print_exports(results: &[ExportResult]) {
    for r in results {
        let name = Path::new(&r.path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| r.path.clone());
        println!("saved {} ({} bytes, {} ms)", name, r.size_bytes, r.duration_ms);
    }
}

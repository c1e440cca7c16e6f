use rust_xlsxwriter::{Chart, ChartType, Workbook, XlsxError};

use crate::analyzer::statistics::StatisticsRow;
use crate::error::AppError;
use crate::export::{create_header_format, create_integer_format, format_volume, xlsx_err};

pub const STATS_REPORT_FILE: &str = "category_statistics.xlsx";

const SHEET_NAME: &str = "통계";
const CHART_TITLE: &str = "카테고리별 문의 건수";

/// Statistics workbook: the sorted table plus a horizontal bar chart of it.
pub fn generate_stats_report(
    rows: &[StatisticsRow],
    category_header: &str,
    volume_header: &str,
) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    write_table_and_chart(&mut wb, rows, category_header, volume_header).map_err(xlsx_err)?;
    wb.save_to_buffer().map_err(xlsx_err)
}

fn write_table_and_chart(
    wb: &mut Workbook,
    rows: &[StatisticsRow],
    category_header: &str,
    volume_header: &str,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_NAME)?;

    let hdr = create_header_format();
    let int = create_integer_format();

    ws.write_with_format(0, 0, category_header, &hdr)?;
    ws.write_with_format(0, 1, volume_header, &hdr)?;
    for (i, r) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, r.category.as_str())?;
        ws.write_with_format(row, 1, r.volume, &int)?;
    }
    ws.set_column_width(0, 32)?;
    ws.set_column_width(1, 12)?;

    if rows.is_empty() {
        return Ok(());
    }

    let last = rows.len() as u32;
    let mut chart = Chart::new(ChartType::Bar);
    chart
        .add_series()
        .set_categories((SHEET_NAME, 1, 0, last, 0))
        .set_values((SHEET_NAME, 1, 1, last, 1))
        .set_name(volume_header);
    chart.title().set_name(CHART_TITLE);
    // Bar charts draw the first category at the bottom; reverse so the
    // largest volume sits on top.
    chart.x_axis().set_reverse();
    chart.y_axis().set_name(volume_header);
    chart.legend().set_hidden();

    ws.insert_chart(1, 3, &chart)?;

    Ok(())
}

/// Horizontal text bars for terminals, one line per row, scaled to `width`.
pub fn render_text_bars(rows: &[StatisticsRow], width: usize) -> String {
    let max = rows.iter().map(|r| r.volume).fold(0.0_f64, f64::max);
    let label_width = rows
        .iter()
        .map(|r| r.category.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for r in rows {
        let len = if max > 0.0 && r.volume > 0.0 {
            ((r.volume / max) * width as f64).round().max(1.0) as usize
        } else {
            0
        };
        let pad = label_width - r.category.chars().count();
        out.push_str(&format!(
            "{}{} │{} {}\n",
            r.category,
            " ".repeat(pad),
            "█".repeat(len),
            format_volume(r.volume)
        ));
    }
    out
}

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::error::AppError;
use crate::export::{create_header_format, create_wrap_format, xlsx_err};
use crate::parser::dataset::Dataset;
use crate::parser::types::TicketRecord;

pub const KEYWORD_REPORT_FILE: &str = "keyword_extracted_data.xlsx";

/// Columns appended after the source columns.
const DERIVED_HEADERS: [&str; 2] = ["대표카테고리", "강사명"];

/// Workbook with the keyword-match rows: every source column (resolved
/// names, source order) followed by the representative category and the
/// detected staff name.
pub fn generate_keyword_report(
    dataset: &Dataset,
    subset: &[&TicketRecord],
) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    write_rows(&mut wb, dataset, subset).map_err(xlsx_err)?;
    wb.save_to_buffer().map_err(xlsx_err)
}

fn write_rows(
    wb: &mut Workbook,
    dataset: &Dataset,
    subset: &[&TicketRecord],
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("키워드 추출")?;

    let hdr = create_header_format();
    let wrap = create_wrap_format();

    let source_cols = dataset.headers().len();
    let headers = dataset
        .headers()
        .iter()
        .map(String::as_str)
        .chain(DERIVED_HEADERS);
    for (col, h) in headers.enumerate() {
        ws.write_with_format(0, col as u16, h, &hdr)?;
    }

    for (i, record) in subset.iter().enumerate() {
        let row = (i + 1) as u32;
        for col in 0..source_cols {
            if let Some(value) = dataset.cell(record.row(), col) {
                ws.write_with_format(row, col as u16, value, &wrap)?;
            }
        }
        if let Some(category) = record.representative_category() {
            ws.write(row, source_cols as u16, category)?;
        }
        if let Some(staff) = record.staff_mention() {
            ws.write(row, source_cols as u16 + 1, staff)?;
        }
    }

    ws.set_freeze_panes(1, 0)?;
    ws.autofit();

    Ok(())
}

pub mod bundle;
pub mod keyword_report;
pub mod stats_report;
pub mod summary_report;

use rust_xlsxwriter::{Format, FormatBorder, XlsxError};

use crate::error::AppError;

/// Header row: dark blue fill, white bold text, thin border.
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}

/// Integer with thousands separator.
pub fn create_integer_format() -> Format {
    Format::new().set_num_format("#,##0")
}

pub fn create_wrap_format() -> Format {
    Format::new().set_text_wrap()
}

pub(crate) fn xlsx_err(e: XlsxError) -> AppError {
    AppError::Custom(e.to_string())
}

/// Whole volumes print without a fractional part.
pub fn format_volume(volume: f64) -> String {
    if volume.fract() == 0.0 && volume.abs() < 1e15 {
        format!("{}", volume as i64)
    } else {
        format!("{:.2}", volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(12.0), "12");
        assert_eq!(format_volume(0.0), "0");
        assert_eq!(format_volume(2.5), "2.50");
    }
}

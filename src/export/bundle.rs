use std::io::Write as _;

use crate::error::AppError;

pub fn bundle_file_name(date: chrono::NaiveDate) -> String {
    format!("cs_report_{}.zip", date.format("%Y-%m-%d"))
}

/// Replace characters that are not allowed in archive entry names.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Deflated zip archive of `(file name, bytes)` entries, in the given order.
pub fn build_zip(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, AppError> {
    let cursor = std::io::Cursor::new(Vec::new());
    let mut zip = zip::ZipWriter::new(cursor);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, bytes) in entries {
        zip.start_file(sanitize_file_name(name), options)?;
        zip.write_all(bytes)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

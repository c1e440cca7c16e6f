//! Tabular input: headers plus rows of optional string cells.
//!
//! Empty cells (CSV `""`, XLSX blank or error cells) are `None`; a cell holding
//! only whitespace is kept as a present string. Every row is padded or cut to
//! the header width.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader};
use sha2::{Digest, Sha256};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Dataset { headers, rows }
    }

    /// Open a CSV or spreadsheet file, picked by extension.
    pub fn open(path: &Path, csv_delimiter: u8) -> Result<Self, AppError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Self::from_spreadsheet(path),
            _ => Self::from_csv_path(path, csv_delimiter),
        }
    }

    pub fn from_csv_path(path: &Path, delimiter: u8) -> Result<Self, AppError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(std::io::BufReader::new(file), delimiter)
    }

    /// Headers are kept verbatim; header resolution decides what whitespace means.
    pub fn from_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, AppError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .double_quote(true)
            .quoting(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(AppError::EmptyFile);
        }

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(
                record
                    .iter()
                    .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                    .collect(),
            );
        }

        Ok(Self::new(headers, rows))
    }

    /// First worksheet of an XLSX / XLS / ODS workbook; row 1 holds the headers.
    pub fn from_spreadsheet(path: &Path) -> Result<Self, AppError> {
        let mut workbook = calamine::open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(AppError::EmptyFile)??;

        let mut rows_iter = range.rows();
        let headers: Vec<String> = match rows_iter.next() {
            Some(row) => row
                .iter()
                .map(|cell| cell_to_string(cell).unwrap_or_default())
                .collect(),
            None => return Err(AppError::EmptyFile),
        };

        let rows = rows_iter
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        Ok(Self::new(headers, rows))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Rename headers through `mapping` (actual → new); others are untouched.
    pub fn rename_columns(&mut self, mapping: &HashMap<String, String>) {
        for header in self.headers.iter_mut() {
            if let Some(new_name) = mapping.get(header.as_str()) {
                *header = new_name.clone();
            }
        }
    }

    /// Trim surrounding whitespace from every header.
    pub fn trim_headers(&mut self) {
        for header in self.headers.iter_mut() {
            *header = header.trim().to_string();
        }
    }

    /// Up to `n` data rows rendered as `a | b | c`, for diagnostics.
    pub fn sample_rows(&self, n: usize) -> Vec<String> {
        self.rows
            .iter()
            .take(n)
            .map(|row| {
                row.iter()
                    .map(|c| c.as_deref().unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect()
    }

    /// SHA-256 of headers and cells, hex encoded. Identifies the content
    /// independently of the file it came from.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for header in &self.headers {
            hasher.update(header.as_bytes());
            hasher.update([0x1f]);
        }
        hasher.update([0x1e]);
        for row in &self.rows {
            for cell in row {
                match cell {
                    Some(value) => {
                        hasher.update([0x01]);
                        hasher.update(value.as_bytes());
                    }
                    None => hasher.update([0x00]),
                }
                hasher.update([0x1f]);
            }
            hasher.update([0x1e]);
        }
        format!("{:x}", hasher.finalize())
    }
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        // whole floats print without the trailing ".0"
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

use std::collections::HashMap;

use crate::error::AppError;

/// Logical fields every ticket export must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketField {
    RecordType,
    Content,
    Category,
}

impl TicketField {
    pub const ALL: [TicketField; 3] = [
        TicketField::RecordType,
        TicketField::Content,
        TicketField::Category,
    ];

    /// Column name after resolution.
    pub fn canonical(self) -> &'static str {
        match self {
            TicketField::RecordType => "구분",
            TicketField::Content => "내용",
            TicketField::Category => "카테고리",
        }
    }

    fn matches(self, normalized_header: &str) -> bool {
        normalize_header(self.canonical()) == normalized_header
    }
}

/// Drop every whitespace code point (non-breaking space included) and fold case.
pub fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Map actual headers onto canonical ticket field names.
///
/// A header maps only when its normalized form equals the normalized
/// canonical name. When several headers match one field the rightmost wins;
/// the others are left out and keep their name.
pub fn build_column_map<S: AsRef<str>>(headers: &[S]) -> HashMap<String, String> {
    let mut chosen: HashMap<TicketField, &str> = HashMap::new();

    for header in headers {
        let header = header.as_ref();
        let normalized = normalize_header(header);
        if let Some(field) = TicketField::ALL.iter().copied().find(|f| f.matches(&normalized)) {
            chosen.insert(field, header);
        }
    }

    chosen
        .into_iter()
        .map(|(field, header)| (header.to_string(), field.canonical().to_string()))
        .collect()
}

/// Maps column names to their index in a record.
pub struct ColumnMap {
    indices: HashMap<String, usize>,
    headers: Vec<String>,
}

impl ColumnMap {
    /// Last occurrence wins when a name repeats, matching `build_column_map`.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut indices = HashMap::new();
        let mut header_list = Vec::with_capacity(headers.len());
        for (i, field) in headers.iter().enumerate() {
            let name = field.as_ref().to_string();
            indices.insert(name.clone(), i);
            header_list.push(name);
        }
        ColumnMap {
            indices,
            headers: header_list,
        }
    }

    pub fn index(&self, col: &str) -> Option<usize> {
        self.indices.get(col).copied()
    }

    /// Get the value of a named column from a row.
    pub fn get<'a>(&self, row: &'a [Option<String>], col: &str) -> Option<&'a str> {
        self.index(col)
            .and_then(|i| row.get(i))
            .and_then(|c| c.as_deref())
    }

    pub fn has(&self, col: &str) -> bool {
        self.indices.contains_key(col)
    }

    /// All header names in order.
    pub fn all_headers(&self) -> &[String] {
        &self.headers
    }
}

/// Check that every ticket field is present after renaming.
/// Returns `AppError::MissingColumns` with the observed header list otherwise.
pub fn validate_columns(col_map: &ColumnMap) -> Result<(), AppError> {
    let missing: Vec<String> = TicketField::ALL
        .iter()
        .map(|f| f.canonical())
        .filter(|c| !col_map.has(c))
        .map(str::to_string)
        .collect();

    if !missing.is_empty() {
        return Err(AppError::MissingColumns {
            missing,
            observed: col_map.all_headers().to_vec(),
        });
    }
    Ok(())
}

/// Locate the two statistics columns by trimmed name.
pub fn resolve_stats_columns(
    col_map: &ColumnMap,
    category: &str,
    volume: &str,
) -> Option<(usize, usize)> {
    Some((col_map.index(category.trim())?, col_map.index(volume.trim())?))
}

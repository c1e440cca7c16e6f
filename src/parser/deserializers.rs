/// Parse a volume cell that may contain spaces, non-breaking spaces or
/// thousands separators ("1 234", "1,234", "12.5").
/// Returns None for empty or non-numeric strings.
pub fn parse_volume(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Value of a cell that may be missing: None → Ok(0.0), unparseable → Err(raw).
pub fn parse_volume_cell(cell: Option<&str>) -> Result<f64, String> {
    match cell {
        None => Ok(0.0),
        Some(raw) if raw.trim().is_empty() => Ok(0.0),
        Some(raw) => parse_volume(raw).ok_or_else(|| raw.to_string()),
    }
}

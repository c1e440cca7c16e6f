use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(
        "Missing required columns: {} (observed columns: {})",
        .missing.join(", "),
        .observed.join(", ")
    )]
    MissingColumns {
        missing: Vec<String>,
        observed: Vec<String>,
    },

    #[error(
        "Statistics sheet needs the columns '{category}' and '{volume}' (observed columns: {}; sample rows: {})",
        .observed.join(", "),
        .sample.join(" / ")
    )]
    StatsMissingColumns {
        category: String,
        volume: String,
        observed: Vec<String>,
        sample: Vec<String>,
    },

    #[error("No question rows to analyse")]
    NoQuestionRows,

    #[error("Empty file or no data")]
    EmptyFile,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Custom(String),
}

impl AppError {
    /// Empty-result outcomes are surfaced as warnings, not as failures of the input.
    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::NoQuestionRows)
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

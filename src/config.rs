use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub keyword_filter: KeywordFilterConfig,
    pub stats: StatsConfig,
    /// Number of ranked terms per category group.
    pub top_keywords: usize,
    /// Questions quoted verbatim in each summary request.
    pub max_prompt_questions: usize,
    pub csv_delimiter: char,
    /// Replacement taxonomy (category maps + staff roster) in JSON.
    pub taxonomy_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordFilterConfig {
    pub target_category: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsConfig {
    pub category_column: String,
    pub volume_column: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            generation: GenerationConfig::default(),
            keyword_filter: KeywordFilterConfig::default(),
            stats: StatsConfig::default(),
            top_keywords: 10,
            max_prompt_questions: 30,
            csv_delimiter: ',',
            taxonomy_path: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            endpoint: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            timeout_secs: 60,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl Default for KeywordFilterConfig {
    fn default() -> Self {
        KeywordFilterConfig {
            target_category: "모바일 기기 - 모바일 기기".to_string(),
            keywords: vec![
                "중복".into(),
                "iOS".into(),
                "플레이어 ID".into(),
                "충돌이슈".into(),
                "초기화".into(),
            ],
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            category_column: "대분류".to_string(),
            volume_column: "건수".to_string(),
        }
    }
}

impl AppConfig {
    /// Load a JSON config file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `None` → built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(p) => Self::from_json_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let t = self.generation.temperature;
        if !(0.0..=1.0).contains(&t) {
            return Err(AppError::Config(format!(
                "temperature must be within 0.0..=1.0, got {t}"
            )));
        }
        if self.top_keywords == 0 {
            return Err(AppError::Config("topKeywords must be at least 1".into()));
        }
        if !self.csv_delimiter.is_ascii() {
            return Err(AppError::Config(format!(
                "csvDelimiter must be a single ASCII character, got {:?}",
                self.csv_delimiter
            )));
        }
        if self.stats.category_column.trim().is_empty() || self.stats.volume_column.trim().is_empty()
        {
            return Err(AppError::Config("statistics column names must not be empty".into()));
        }
        Ok(())
    }

    pub fn csv_delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.csv_delimiter as u8
    }
}

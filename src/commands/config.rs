use std::path::Path;

use serde::Serialize;

use crate::analyzer::taxonomy::Taxonomy;
use crate::config::AppConfig;
use crate::error::AppError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EffectiveConfig<'a> {
    config: &'a AppConfig,
    taxonomy_source: String,
    category_mappings: usize,
    coarse_category_mappings: usize,
    staff_names: usize,
}

/// Configuration file (or defaults) plus the taxonomy it points to.
pub fn load_settings(config_path: Option<&Path>) -> Result<(AppConfig, Taxonomy), AppError> {
    let config = AppConfig::load(config_path)?;
    let taxonomy = Taxonomy::load(&config)?;
    Ok((config, taxonomy))
}

/// Effective configuration as pretty JSON.
pub fn show_config(config: &AppConfig, taxonomy: &Taxonomy) -> Result<String, AppError> {
    let view = EffectiveConfig {
        config,
        taxonomy_source: config
            .taxonomy_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
        category_mappings: taxonomy.category_map.len(),
        coarse_category_mappings: taxonomy.coarse_category_map.len(),
        staff_names: taxonomy.staff_roster.len(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

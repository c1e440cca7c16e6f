//! Category taxonomy: fine-grained to representative category tables.
//!
//! Two independent lookup tables live here:
//! - [`CategoryMap`] keyed by the compound `"<major> - <minor>"` label, used by the
//!   ticket analysis;
//! - [`CoarseCategoryMap`] keyed by the bare major label, used only by the
//!   statistics view.
//!
//! Both are exact-match after trimming. An unmapped label comes back trimmed but
//! otherwise untouched, so taxonomy gaps stay visible in the output.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::analyzer::staff::StaffRoster;
use crate::config::AppConfig;
use crate::error::AppError;

static BUILTIN_TAXONOMY: LazyLock<Taxonomy> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../data/taxonomy.json"))
        .expect("data/taxonomy.json: invalid taxonomy")
});

// ── Lookup table ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
struct LookupTable(BTreeMap<String, String>);

impl From<BTreeMap<String, String>> for LookupTable {
    fn from(raw: BTreeMap<String, String>) -> Self {
        LookupTable(
            raw.into_iter()
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .filter(|(k, _)| !k.is_empty())
                .collect(),
        )
    }
}

impl From<LookupTable> for BTreeMap<String, String> {
    fn from(table: LookupTable) -> Self {
        table.0
    }
}

impl LookupTable {
    fn resolve(&self, raw: &str) -> String {
        let key = raw.trim();
        self.0
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

// ── Public maps ───────────────────────────────────────────────────────────────

/// Fine-grained (`"<major> - <minor>"`) → representative category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap(LookupTable);

impl CategoryMap {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let raw: BTreeMap<String, String> =
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        CategoryMap(LookupTable::from(raw))
    }

    /// Representative category for `raw`, or the trimmed input when unmapped.
    pub fn normalize(&self, raw: &str) -> String {
        self.0.resolve(raw)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0 .0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0 .0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0 .0.is_empty()
    }
}

/// Bare major category → representative category, for volume statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoarseCategoryMap(LookupTable);

impl CoarseCategoryMap {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let raw: BTreeMap<String, String> =
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        CoarseCategoryMap(LookupTable::from(raw))
    }

    pub fn normalize(&self, major: &str) -> String {
        self.0.resolve(major)
    }

    pub fn len(&self) -> usize {
        self.0 .0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0 .0.is_empty()
    }
}

// ── Taxonomy bundle ───────────────────────────────────────────────────────────

/// Everything that is reference data rather than logic: both category tables
/// and the staff roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    pub category_map: CategoryMap,
    #[serde(default)]
    pub coarse_category_map: CoarseCategoryMap,
    #[serde(default)]
    pub staff_roster: StaffRoster,
}

impl Taxonomy {
    /// Taxonomy shipped in `data/taxonomy.json`.
    pub fn builtin() -> Self {
        BUILTIN_TAXONOMY.clone()
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let taxonomy: Taxonomy = serde_json::from_str(&raw)?;
        log::info!(
            "Loaded taxonomy from {} ({} categories, {} coarse, {} staff)",
            path.display(),
            taxonomy.category_map.len(),
            taxonomy.coarse_category_map.len(),
            taxonomy.staff_roster.len()
        );
        Ok(taxonomy)
    }

    /// Taxonomy named by `config.taxonomy_path`, else the built-in one.
    pub fn load(config: &AppConfig) -> Result<Self, AppError> {
        match config.taxonomy_path.as_deref() {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::builtin()),
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

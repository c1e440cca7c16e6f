use sha2::{Digest, Sha256};

use crate::analyzer::taxonomy::Taxonomy;
use crate::commands::analyze::AnalysisReport;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::parser::dataset::Dataset;

/// Identifies one analysis: what was read, and with which parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub dataset_digest: String,
    pub params_digest: String,
}

impl CacheKey {
    pub fn new(dataset: &Dataset, config: &AppConfig, taxonomy: &Taxonomy) -> Result<Self, AppError> {
        let params = serde_json::to_vec(&(config, taxonomy))?;
        Ok(Self {
            dataset_digest: dataset.digest(),
            params_digest: format!("{:x}", Sha256::digest(&params)),
        })
    }
}

/// Single-slot cache for the latest analysis report.
///
/// Library API for embedders that re-run analyses in one process (the CLI
/// runs a single analysis and does not use it). A lookup under a different
/// key recomputes and replaces the entry.
#[derive(Default)]
pub struct AnalysisCache {
    entry: Option<(CacheKey, AnalysisReport)>,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&AnalysisReport> {
        self.entry
            .as_ref()
            .filter(|(k, _)| k == key)
            .map(|(_, report)| report)
    }

    /// Cached report for `key`, or the result of `compute` stored under it.
    /// A failed computation leaves the cache empty.
    pub fn get_or_try_insert_with<F>(
        &mut self,
        key: CacheKey,
        compute: F,
    ) -> Result<&AnalysisReport, AppError>
    where
        F: FnOnce() -> Result<AnalysisReport, AppError>,
    {
        let entry = match self.entry.take() {
            Some((k, report)) if k == key => {
                self.hits += 1;
                log::debug!("Analysis cache hit");
                (k, report)
            }
            _ => {
                self.misses += 1;
                log::debug!("Analysis cache miss, recomputing");
                (key, compute()?)
            }
        };
        Ok(&self.entry.insert(entry).1)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

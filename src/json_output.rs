//! JSON output format for analysis results
//!
//! `--format json` wraps each result in a versioned envelope.

use crate::analysis::{AnalysisKind, AnalysisOutcome};
use crate::config::AnalysisConfig;
use serde::{Deserialize, Serialize};

/// Complete JSON output document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Crate version that produced the document
    pub version: String,
    /// Format name
    pub format: String,
    pub kind: AnalysisKind,
    /// Effective configuration after file and flag overrides
    pub config: AnalysisConfig,
    pub result: AnalysisOutcome,
}

impl JsonOutput {
    /// Create a new JSON output document
    pub fn new(kind: AnalysisKind, config: &AnalysisConfig, result: AnalysisOutcome) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "simcheck-json-v1".to_string(),
            kind,
            config: config.clone(),
            result,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

//! Reference tables: condition terms, treatment descriptions, stage info.
//!
//! The three tables are plain label-keyed lookups. They ship as JSON
//! resources compiled into the binary and can be swapped for a directory
//! of the same three files at startup. Once loaded they are never mutated.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONDITION_TERMS_FILE: &str = "condition_terms.json";
pub const TREATMENTS_FILE: &str = "treatments.json";
pub const STAGES_FILE: &str = "stages.json";

const BUNDLED_CONDITION_TERMS: &str = include_str!("../../resources/condition_terms.json");
const BUNDLED_TREATMENTS: &str = include_str!("../../resources/treatments.json");
const BUNDLED_STAGES: &str = include_str!("../../resources/stages.json");

// ---------------------------------------------------------------------------
// Table entries
// ---------------------------------------------------------------------------

/// A diagnosis or report term with its plain-language wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionTerm {
    pub term: String,
    pub simple: String,
    pub explanation: String,
}

/// Stage-dependent snippets for a treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestFor {
    pub early_stage: String,
    pub advanced_stage: String,
    pub with_hiv: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentDescription {
    /// Form label the entry is keyed by.
    pub treatment: String,
    pub name: String,
    pub explanation: String,
    pub best_for: BestFor,
}

/// Keyed by stage identifier ("Stage 4"), not the full form label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInfo {
    pub stage: String,
    pub description: String,
    pub prognosis: String,
    pub typical_findings: String,
}

// ---------------------------------------------------------------------------
// ReferenceError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference data load failed ({0}): {1}")]
    Load(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Duplicate key in {file}: {key}")]
    DuplicateKey { file: String, key: String },

    #[error("Reference table is empty: {0}")]
    Empty(String),
}

// ---------------------------------------------------------------------------
// ReferenceTables
// ---------------------------------------------------------------------------

/// Loaded reference data for the explanation templates.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    conditions: Vec<ConditionTerm>,
    treatments: Vec<TreatmentDescription>,
    stages: Vec<StageInfo>,
}

impl ReferenceTables {
    /// Parse the tables compiled into the binary.
    pub fn bundled() -> Result<Self, ReferenceError> {
        Self::from_json(BUNDLED_CONDITION_TERMS, BUNDLED_TREATMENTS, BUNDLED_STAGES)
    }

    /// Load the three table files from a resources directory.
    pub fn load(resources_dir: &Path) -> Result<Self, ReferenceError> {
        let read = |file: &str| {
            let path = resources_dir.join(file);
            std::fs::read_to_string(&path)
                .map_err(|e| ReferenceError::Load(path.display().to_string(), e.to_string()))
        };

        let conditions = read(CONDITION_TERMS_FILE)?;
        let treatments = read(TREATMENTS_FILE)?;
        let stages = read(STAGES_FILE)?;

        let tables = Self::from_json(&conditions, &treatments, &stages)?;
        tracing::info!(
            dir = %resources_dir.display(),
            conditions = tables.conditions.len(),
            treatments = tables.treatments.len(),
            stages = tables.stages.len(),
            "Reference tables loaded from directory"
        );
        Ok(tables)
    }

    /// Build tables from raw JSON documents, one per table.
    pub fn from_json(
        conditions_json: &str,
        treatments_json: &str,
        stages_json: &str,
    ) -> Result<Self, ReferenceError> {
        let conditions: Vec<ConditionTerm> = parse(CONDITION_TERMS_FILE, conditions_json)?;
        let treatments: Vec<TreatmentDescription> = parse(TREATMENTS_FILE, treatments_json)?;
        let stages: Vec<StageInfo> = parse(STAGES_FILE, stages_json)?;

        check_keys(CONDITION_TERMS_FILE, conditions.iter().map(|c| c.term.as_str()))?;
        check_keys(TREATMENTS_FILE, treatments.iter().map(|t| t.treatment.as_str()))?;
        check_keys(STAGES_FILE, stages.iter().map(|s| s.stage.as_str()))?;

        Ok(Self {
            conditions,
            treatments,
            stages,
        })
    }

    pub fn condition(&self, term: &str) -> Option<&ConditionTerm> {
        self.conditions.iter().find(|c| c.term == term)
    }

    pub fn treatment(&self, label: &str) -> Option<&TreatmentDescription> {
        self.treatments.iter().find(|t| t.treatment == label)
    }

    /// Look up by stage identifier ("Stage 4").
    pub fn stage(&self, identifier: &str) -> Option<&StageInfo> {
        self.stages.iter().find(|s| s.stage == identifier)
    }

    /// All condition terms in display order.
    pub fn conditions(&self) -> &[ConditionTerm] {
        &self.conditions
    }

    pub fn treatments(&self) -> &[TreatmentDescription] {
        &self.treatments
    }

    pub fn stages(&self) -> &[StageInfo] {
        &self.stages
    }
}

fn parse<T: for<'de> Deserialize<'de>>(file: &str, json: &str) -> Result<Vec<T>, ReferenceError> {
    serde_json::from_str(json).map_err(|e| ReferenceError::Parse(file.into(), e.to_string()))
}

fn check_keys<'a>(file: &str, keys: impl Iterator<Item = &'a str>) -> Result<(), ReferenceError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(ReferenceError::DuplicateKey {
                file: file.into(),
                key: key.into(),
            });
        }
    }
    if seen.is_empty() {
        return Err(ReferenceError::Empty(file.into()));
    }
    Ok(())
}

//! Template resolver: patient report → plain-language explanation.
//!
//! Three sections are resolved independently against the reference tables
//! and joined in a fixed order: condition, stage, treatment. Unknown labels
//! never fail; they either omit their section (condition) or produce a fixed
//! "not available" message (stage, treatment).

pub mod stage;
pub mod templates;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::{HivStatus, ImagingResults, PatientReport};
use crate::reference::ReferenceTables;
use stage::{stage_identifier, StageClass};
use templates::{Templates, STAGE_NOT_AVAILABLE, STAGE_UNDETERMINED, TREATMENT_NOT_AVAILABLE};

/// Something the resolver fell back on while composing the explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionNote {
    /// Diagnosis not in the condition table; section omitted.
    ConditionOmitted,
    /// Stage identifier not in the stage table.
    StageNotAvailable,
    /// Treatment not in the treatment table.
    TreatmentNotAvailable,
    /// Stage label had no numeral; stage-specific treatment line replaced.
    StageUndetermined,
}

/// The composed explanation, kept by section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub condition: Option<String>,
    pub stage: String,
    pub treatment: String,
    pub notes: Vec<ResolutionNote>,
}

impl Explanation {
    /// Display string: sections joined by line breaks, condition first
    /// when present.
    pub fn render(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(condition) = &self.condition {
            parts.push(condition);
        }
        parts.push(&self.stage);
        parts.push(&self.treatment);
        parts.join("\n")
    }
}

/// One row of the "learn more" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub simple: String,
    pub explanation: String,
}

/// Resolver bound to a set of reference tables.
#[derive(Debug, Clone)]
pub struct Explainer {
    tables: Arc<ReferenceTables>,
}

impl Explainer {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Condition section, or `None` when the diagnosis is not in the table.
    pub fn resolve_condition_explanation(&self, diagnosis: &str) -> Option<String> {
        let Some(term) = self.tables.condition(diagnosis) else {
            tracing::debug!(diagnosis, "No condition entry, section omitted");
            return None;
        };
        Some(
            [
                Templates::condition_heading().to_string(),
                Templates::bullet(&term.explanation),
            ]
            .join("\n"),
        )
    }

    pub fn resolve_stage_explanation(&self, stage_label: &str, imaging: &ImagingResults) -> String {
        self.stage_section(stage_label, imaging).0
    }

    pub fn resolve_treatment_explanation(
        &self,
        treatment_label: &str,
        stage_label: &str,
        hiv_status: HivStatus,
    ) -> String {
        self.treatment_section(treatment_label, stage_label, hiv_status).0
    }

    /// Compose all sections. Never fails.
    pub fn explain(&self, report: &PatientReport) -> Explanation {
        let mut notes = Vec::new();

        let condition = self.resolve_condition_explanation(&report.diagnosis);
        if condition.is_none() {
            notes.push(ResolutionNote::ConditionOmitted);
        }

        let (stage, stage_note) = self.stage_section(&report.stage, &report.imaging);
        notes.extend(stage_note);

        let (treatment, treatment_notes) =
            self.treatment_section(&report.treatment, &report.stage, report.hiv_status);
        notes.extend(treatment_notes);

        tracing::info!(
            diagnosis = %report.diagnosis,
            stage = %report.stage,
            treatment = %report.treatment,
            notes = notes.len(),
            "Explanation resolved"
        );

        Explanation {
            condition,
            stage,
            treatment,
            notes,
        }
    }

    /// Full display string for a report.
    pub fn resolve_full_explanation(&self, report: &PatientReport) -> String {
        self.explain(report).render()
    }

    /// The condition table, verbatim and in display order.
    pub fn glossary(&self) -> Vec<GlossaryEntry> {
        self.tables
            .conditions()
            .iter()
            .map(|c| GlossaryEntry {
                term: c.term.clone(),
                simple: c.simple.clone(),
                explanation: c.explanation.clone(),
            })
            .collect()
    }

    /// Glossary as markdown, one term per line.
    pub fn glossary_markdown(&self) -> String {
        self.tables
            .conditions()
            .iter()
            .map(|c| Templates::glossary_line(&c.term, &c.explanation))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn stage_section(
        &self,
        stage_label: &str,
        imaging: &ImagingResults,
    ) -> (String, Option<ResolutionNote>) {
        let identifier = stage_identifier(stage_label);
        let Some(info) = self.tables.stage(identifier) else {
            tracing::debug!(identifier, "No stage entry");
            return (
                STAGE_NOT_AVAILABLE.to_string(),
                Some(ResolutionNote::StageNotAvailable),
            );
        };

        let mut lines = vec![
            Templates::stage_heading().to_string(),
            Templates::bullet(&info.description),
            Templates::prognosis(&info.prognosis),
            Templates::stage_method_heading().to_string(),
        ];

        let completed: Vec<&str> = imaging
            .completed()
            .into_iter()
            .map(|test| test.display_name())
            .collect();
        if !completed.is_empty() {
            lines.push(Templates::imaging_findings(&completed, &info.typical_findings));
        }

        (lines.join("\n"), None)
    }

    fn treatment_section(
        &self,
        treatment_label: &str,
        stage_label: &str,
        hiv_status: HivStatus,
    ) -> (String, Vec<ResolutionNote>) {
        let Some(treatment) = self.tables.treatment(treatment_label) else {
            tracing::debug!(treatment = treatment_label, "No treatment entry");
            return (
                TREATMENT_NOT_AVAILABLE.to_string(),
                vec![ResolutionNote::TreatmentNotAvailable],
            );
        };

        let mut notes = Vec::new();
        let why = match StageClass::from_label(stage_label) {
            Some(StageClass::Advanced) => {
                Templates::why_this_treatment(&treatment.best_for.advanced_stage)
            }
            Some(StageClass::Early) => {
                Templates::why_this_treatment(&treatment.best_for.early_stage)
            }
            None => {
                tracing::warn!(
                    stage = stage_label,
                    "Stage numeral missing, treatment fit undetermined"
                );
                notes.push(ResolutionNote::StageUndetermined);
                Templates::why_this_treatment(STAGE_UNDETERMINED)
            }
        };

        let mut lines = vec![
            Templates::treatment_heading(&treatment.name),
            Templates::what_it_is(&treatment.explanation),
            why,
        ];

        if hiv_status == HivStatus::Positive {
            lines.push(Templates::special_considerations(&treatment.best_for.with_hiv));
        }

        (lines.join("\n"), notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImagingTest, TestStatus};

    fn explainer() -> Explainer {
        Explainer::new(Arc::new(ReferenceTables::bundled().unwrap()))
    }

    fn report(diagnosis: &str, stage: &str, hiv: HivStatus, treatment: &str) -> PatientReport {
        PatientReport {
            age: 50,
            diagnosis: diagnosis.into(),
            stage: stage.into(),
            hiv_status: hiv,
            imaging: ImagingResults::none_done(),
            treatment: treatment.into(),
        }
    }

    // -- Condition ----------------------------------------------------------

    #[test]
    fn every_condition_resolves_verbatim() {
        let ex = explainer();
        for term in ex.tables().conditions() {
            let text = ex.resolve_condition_explanation(&term.term).unwrap();
            assert!(text.starts_with("🔬 Your Type of Cancer:\n• "));
            assert!(text.contains(&term.explanation));
        }
    }

    #[test]
    fn unknown_condition_omitted() {
        let ex = explainer();
        assert_eq!(ex.resolve_condition_explanation("Unknown Biopsy Type"), None);
        assert_eq!(ex.resolve_condition_explanation(""), None);
    }

    // -- Stage --------------------------------------------------------------

    #[test]
    fn every_stage_resolves_verbatim() {
        let ex = explainer();
        for info in ex.tables().stages() {
            let label = format!("{}: anything", info.stage);
            let text = ex.resolve_stage_explanation(&label, &ImagingResults::none_done());
            assert!(text.contains(&info.description));
            assert!(text.contains(&format!("What this means: {}", info.prognosis)));
        }
    }

    #[test]
    fn unknown_stage_falls_back() {
        let ex = explainer();
        let imaging = ImagingResults::none_done();
        assert_eq!(
            ex.resolve_stage_explanation("Unknown Stage", &imaging),
            "The staging information is not available."
        );
        assert_eq!(
            ex.resolve_stage_explanation("Stage 5: Not in table", &imaging),
            "The staging information is not available."
        );
    }

    #[test]
    fn imaging_sentence_omitted_when_nothing_done() {
        let ex = explainer();
        let imaging = ImagingResults {
            chest_xray: TestStatus::Unknown,
            ct: TestStatus::NotDone,
            mri: TestStatus::Unknown,
            ultrasound: TestStatus::NotDone,
        };
        let text = ex.resolve_stage_explanation("Stage 2: Early localized cancer", &imaging);
        assert!(!text.contains("helped us see"));
        assert!(text.ends_with("How we determined this stage:"));
    }

    #[test]
    fn imaging_sentence_lists_done_tests_in_fixed_order() {
        let ex = explainer();
        let imaging = ImagingResults {
            chest_xray: TestStatus::Done,
            ct: TestStatus::NotDone,
            mri: TestStatus::Done,
            ultrasound: TestStatus::Done,
        };
        let text = ex.resolve_stage_explanation("Stage 3: Advanced localized cancer", &imaging);
        assert!(text.contains(
            "• The chest X-ray, MRI, ultrasound helped us see Multiple imaging tests help show the extent of the cancer."
        ));
    }

    #[test]
    fn imaging_single_test() {
        let ex = explainer();
        let mut imaging = ImagingResults::none_done();
        imaging.ultrasound = TestStatus::Done;
        let text = ex.resolve_stage_explanation("Stage 6: Extensive cancer spread", &imaging);
        assert!(text.contains("• The ultrasound helped us see "));
        for other in [ImagingTest::ChestXray, ImagingTest::Ct, ImagingTest::Mri] {
            assert!(!text.contains(other.display_name()));
        }
    }

    // -- Treatment ----------------------------------------------------------

    #[test]
    fn every_treatment_resolves_verbatim() {
        let ex = explainer();
        for t in ex.tables().treatments() {
            let text = ex.resolve_treatment_explanation(
                &t.treatment,
                "Stage 2: Early localized cancer",
                HivStatus::Negative,
            );
            assert!(text.contains(&format!("About Your Treatment Plan: {}", t.name)));
            assert!(text.contains(&t.explanation));
            assert!(text.contains(&t.best_for.early_stage));
        }
    }

    #[test]
    fn unknown_treatment_falls_back() {
        let ex = explainer();
        assert_eq!(
            ex.resolve_treatment_explanation(
                "Unknown Treatment Type",
                "Stage 4: Regional spread of cancer",
                HivStatus::Positive
            ),
            "The treatment information is not available."
        );
    }

    #[test]
    fn stage_three_uses_early_snippet_stage_four_advanced() {
        let ex = explainer();
        let radiation = ex.tables().treatment("Radiation Therapy").unwrap().clone();

        let early = ex.resolve_treatment_explanation(
            "Radiation Therapy",
            "Stage 3: Advanced localized cancer",
            HivStatus::Negative,
        );
        assert!(early.contains(&radiation.best_for.early_stage));
        assert!(!early.contains(&radiation.best_for.advanced_stage));

        let advanced = ex.resolve_treatment_explanation(
            "Radiation Therapy",
            "Stage 4: Regional spread of cancer",
            HivStatus::Negative,
        );
        assert!(advanced.contains(&radiation.best_for.advanced_stage));
        assert!(!advanced.contains(&radiation.best_for.early_stage));
    }

    #[test]
    fn hiv_line_only_for_positive() {
        let ex = explainer();
        let stage = "Stage 7: Widespread metastasis";
        let positive = ex.resolve_treatment_explanation("Immunotherapy", stage, HivStatus::Positive);
        assert!(positive.contains("• Special considerations: "));

        for status in [HivStatus::Negative, HivStatus::Unknown] {
            let text = ex.resolve_treatment_explanation("Immunotherapy", stage, status);
            assert!(!text.contains("Special considerations"));
        }
    }

    #[test]
    fn unknown_stage_treatment_is_handled() {
        let ex = explainer();
        let t = ex.tables().treatment("Hormone Therapy").unwrap().clone();
        let text =
            ex.resolve_treatment_explanation("Hormone Therapy", "Unknown Stage", HivStatus::Positive);
        assert!(text.contains(STAGE_UNDETERMINED));
        assert!(!text.contains(&t.best_for.early_stage));
        assert!(!text.contains(&t.best_for.advanced_stage));
        assert!(text.contains(&t.best_for.with_hiv));
    }

    #[test]
    fn huge_stage_numeral_uses_advanced_snippet() {
        let ex = explainer();
        let t = ex.tables().treatment("Chemotherapy").unwrap().clone();
        let text = ex.resolve_treatment_explanation(
            "Chemotherapy",
            "Stage 99999999999999999999: hypothetical",
            HivStatus::Negative,
        );
        assert!(text.contains(&t.best_for.advanced_stage));
        assert!(!text.contains(STAGE_UNDETERMINED));
    }

    // -- Full explanation ---------------------------------------------------

    #[test]
    fn end_to_end_adenocarcinoma_stage_four() {
        let ex = explainer();
        let mut r = report(
            "Adenocarcinoma",
            "Stage 4: Regional spread of cancer",
            HivStatus::Positive,
            "Chemotherapy",
        );
        r.imaging.chest_xray = TestStatus::Done;

        let text = ex.resolve_full_explanation(&r);
        let tables = ex.tables();

        assert!(text.contains(&tables.condition("Adenocarcinoma").unwrap().explanation));
        let stage = tables.stage("Stage 4").unwrap();
        assert!(text.contains(&stage.description));
        assert!(text.contains(&stage.prognosis));
        assert!(text.contains(&format!(
            "• The chest X-ray helped us see {}",
            stage.typical_findings
        )));
        let chemo = tables.treatment("Chemotherapy").unwrap();
        assert!(text.contains(&chemo.explanation));
        assert!(text.contains(&chemo.best_for.advanced_stage));
        assert!(text.contains(&format!(
            "• Special considerations: {}",
            chemo.best_for.with_hiv
        )));

        let condition_at = text.find("Your Type of Cancer").unwrap();
        let stage_at = text.find("Understanding the Cancer Stage").unwrap();
        let treatment_at = text.find("About Your Treatment Plan").unwrap();
        assert!(condition_at < stage_at && stage_at < treatment_at);
    }

    #[test]
    fn end_to_end_all_unknown() {
        let ex = explainer();
        let r = report(
            "Unknown Biopsy Type",
            "Unknown Stage",
            HivStatus::Unknown,
            "Unknown Treatment Type",
        );

        let explanation = ex.explain(&r);
        assert_eq!(explanation.condition, None);
        assert_eq!(explanation.stage, STAGE_NOT_AVAILABLE);
        assert_eq!(explanation.treatment, TREATMENT_NOT_AVAILABLE);
        assert_eq!(
            explanation.render(),
            "The staging information is not available.\nThe treatment information is not available."
        );
        assert_eq!(
            explanation.notes,
            vec![
                ResolutionNote::ConditionOmitted,
                ResolutionNote::StageNotAvailable,
                ResolutionNote::TreatmentNotAvailable
            ]
        );
    }

    #[test]
    fn stage_note_follows_stage_section() {
        let ex = explainer();
        let known = report(
            "Adenocarcinoma",
            "Stage 8: Critical condition",
            HivStatus::Negative,
            "Chemotherapy",
        );
        let explanation = ex.explain(&known);
        assert_ne!(explanation.stage, STAGE_NOT_AVAILABLE);
        assert!(explanation.notes.is_empty());

        let missing = report(
            "Adenocarcinoma",
            "Stage 5: Not in table",
            HivStatus::Negative,
            "Chemotherapy",
        );
        let explanation = ex.explain(&missing);
        assert_eq!(explanation.stage, STAGE_NOT_AVAILABLE);
        assert_eq!(explanation.notes, vec![ResolutionNote::StageNotAvailable]);
    }

    #[test]
    fn render_matches_resolve_full() {
        let ex = explainer();
        let r = report(
            "Squamous Cell Carcinoma",
            "Stage 9: End-stage cancer",
            HivStatus::Negative,
            "Targeted Therapy",
        );
        assert_eq!(ex.explain(&r).render(), ex.resolve_full_explanation(&r));
    }

    #[test]
    fn explain_is_idempotent() {
        let ex = explainer();
        let r = report(
            "Adenocarcinoma",
            "Unknown Stage",
            HivStatus::Positive,
            "Chemotherapy",
        );
        let first = ex.explain(&r);
        assert_eq!(first, ex.explain(&r));
        assert_eq!(
            first.notes,
            vec![
                ResolutionNote::StageNotAvailable,
                ResolutionNote::StageUndetermined
            ]
        );
    }

    // -- Glossary -----------------------------------------------------------

    #[test]
    fn glossary_is_condition_table_verbatim() {
        let ex = explainer();
        let glossary = ex.glossary();
        assert_eq!(glossary.len(), ex.tables().conditions().len());
        for (entry, term) in glossary.iter().zip(ex.tables().conditions()) {
            assert_eq!(entry.term, term.term);
            assert_eq!(entry.simple, term.simple);
            assert_eq!(entry.explanation, term.explanation);
        }
    }

    #[test]
    fn glossary_markdown_one_line_per_term() {
        let ex = explainer();
        let md = ex.glossary_markdown();
        assert_eq!(md.lines().count(), 9);
        assert!(md.lines().next().unwrap().starts_with("**Adenocarcinoma**: "));
    }
}

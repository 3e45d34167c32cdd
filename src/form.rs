//! Report form: allowed option labels, help texts and defaults.
//!
//! The lists mirror what the form page offers. Validation in
//! `models::report` accepts nothing outside them, so the resolver only
//! ever sees labels from this module.

use serde::Serialize;

use crate::models::{HivStatus, ImagingTest};

pub const PAGE_TITLE: &str = "Friendly Medical Report Explainer";
pub const PAGE_INTRO: &str =
    "This tool explains medical reports in simple terms that anyone can understand! 🏥";

pub const AGE_MIN: u8 = 0;
pub const AGE_MAX: u8 = 100;
pub const AGE_DEFAULT: u8 = 50;

pub const UNKNOWN_DIAGNOSIS: &str = "Unknown Biopsy Type";
pub const UNKNOWN_STAGE: &str = "Unknown Stage";
pub const UNKNOWN_TREATMENT: &str = "Unknown Treatment Type";

pub const DIAGNOSIS_OPTIONS: [&str; 3] =
    ["Adenocarcinoma", "Squamous Cell Carcinoma", UNKNOWN_DIAGNOSIS];

pub const STAGE_OPTIONS: [&str; 8] = [
    "Stage 2: Early localized cancer",
    "Stage 3: Advanced localized cancer",
    "Stage 4: Regional spread of cancer",
    "Stage 6: Extensive cancer spread",
    "Stage 7: Widespread metastasis",
    "Stage 8: Critical condition",
    "Stage 9: End-stage cancer",
    UNKNOWN_STAGE,
];

pub const TREATMENT_OPTIONS: [&str; 6] = [
    "Chemotherapy",
    "Radiation Therapy",
    "Immunotherapy",
    "Hormone Therapy",
    "Targeted Therapy",
    UNKNOWN_TREATMENT,
];

pub const DIAGNOSIS_HELP: &str =
    "A biopsy is when doctors take a tiny sample of tissue to check for cancer";
pub const STAGE_HELP: &str = "The stage tells us how far the cancer has spread in the body";
pub const HIV_HELP: &str =
    "HIV affects the body's immune system (our natural defense against illness)";
pub const TREATMENT_HELP: &str =
    "Different types of treatment work in different ways to fight cancer";

/// One select control on the form.
#[derive(Debug, Clone, Serialize)]
pub struct SelectField {
    pub field: &'static str,
    pub caption: &'static str,
    pub options: Vec<String>,
    pub help: Option<&'static str>,
}

/// Everything the page needs to draw the form.
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub title: &'static str,
    pub intro: &'static str,
    pub age: AgeField,
    pub selects: Vec<SelectField>,
    pub imaging: Vec<SelectField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgeField {
    pub field: &'static str,
    pub caption: &'static str,
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl FormOptions {
    pub fn build() -> Self {
        Self {
            title: PAGE_TITLE,
            intro: PAGE_INTRO,
            age: AgeField {
                field: "age",
                caption: "Patient's age:",
                min: AGE_MIN,
                max: AGE_MAX,
                default: AGE_DEFAULT,
            },
            selects: vec![
                SelectField {
                    field: "biopsyhisto",
                    caption: "Type of cancer found in biopsy:",
                    options: owned(&DIAGNOSIS_OPTIONS),
                    help: Some(DIAGNOSIS_HELP),
                },
                SelectField {
                    field: "stage",
                    caption: "Cancer Stage:",
                    options: owned(&STAGE_OPTIONS),
                    help: Some(STAGE_HELP),
                },
                SelectField {
                    field: "hiv",
                    caption: "HIV Status:",
                    options: HivStatus::ALL.iter().map(|h| h.as_str().to_string()).collect(),
                    help: Some(HIV_HELP),
                },
                SelectField {
                    field: "txtype",
                    caption: "Treatment Type:",
                    options: owned(&TREATMENT_OPTIONS),
                    help: Some(TREATMENT_HELP),
                },
            ],
            imaging: ImagingTest::ALL
                .iter()
                .map(|test| SelectField {
                    field: test.form_field(),
                    caption: test.form_caption(),
                    options: test.options(),
                    help: None,
                })
                .collect(),
        }
    }
}

fn owned(options: &[&str]) -> Vec<String> {
    options.iter().map(|s| s.to_string()).collect()
}

use serde::{Deserialize, Serialize};

use super::{FormError, HivStatus, ImagingTest, TestStatus};
use crate::form::{
    AGE_DEFAULT, AGE_MAX, AGE_MIN, DIAGNOSIS_OPTIONS, STAGE_OPTIONS, TREATMENT_OPTIONS,
};

/// Status of the four imaging tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagingResults {
    pub chest_xray: TestStatus,
    pub ct: TestStatus,
    pub mri: TestStatus,
    pub ultrasound: TestStatus,
}

impl ImagingResults {
    pub fn none_done() -> Self {
        Self {
            chest_xray: TestStatus::NotDone,
            ct: TestStatus::NotDone,
            mri: TestStatus::NotDone,
            ultrasound: TestStatus::NotDone,
        }
    }

    pub fn status(&self, test: ImagingTest) -> TestStatus {
        match test {
            ImagingTest::ChestXray => self.chest_xray,
            ImagingTest::Ct => self.ct,
            ImagingTest::Mri => self.mri,
            ImagingTest::Ultrasound => self.ultrasound,
        }
    }

    /// Tests marked done, always in `ImagingTest::ALL` order.
    pub fn completed(&self) -> Vec<ImagingTest> {
        ImagingTest::ALL
            .into_iter()
            .filter(|test| self.status(*test).is_done())
            .collect()
    }
}

/// Validated input record for one explanation.
///
/// Diagnosis, stage and treatment stay as labels: the reference tables
/// decide whether they are known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientReport {
    pub age: u8,
    pub diagnosis: String,
    pub stage: String,
    pub hiv_status: HivStatus,
    pub imaging: ImagingResults,
    pub treatment: String,
}

/// Raw form submission, field names as posted by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportForm {
    pub age: i64,
    pub biopsyhisto: String,
    pub stage: String,
    pub hiv: String,
    pub cxrdone: String,
    pub ctdone: String,
    pub mridone: String,
    pub usdone: String,
    pub txtype: String,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            age: i64::from(AGE_DEFAULT),
            biopsyhisto: DIAGNOSIS_OPTIONS[0].into(),
            stage: STAGE_OPTIONS[0].into(),
            hiv: HivStatus::Positive.as_str().into(),
            cxrdone: TestStatus::Done.label(ImagingTest::ChestXray),
            ctdone: TestStatus::Done.label(ImagingTest::Ct),
            mridone: TestStatus::Done.label(ImagingTest::Mri),
            usdone: TestStatus::Done.label(ImagingTest::Ultrasound),
            txtype: TREATMENT_OPTIONS[0].into(),
        }
    }
}

impl ReportForm {
    /// Check every value against its allowed labels.
    pub fn validate(&self) -> Result<PatientReport, FormError> {
        let age = u8::try_from(self.age)
            .ok()
            .filter(|a| (AGE_MIN..=AGE_MAX).contains(a))
            .ok_or(FormError::AgeOutOfRange {
                value: self.age,
                min: AGE_MIN,
                max: AGE_MAX,
            })?;

        let diagnosis = one_of("biopsyhisto", &self.biopsyhisto, &DIAGNOSIS_OPTIONS)?;
        let stage = one_of("stage", &self.stage, &STAGE_OPTIONS)?;
        let treatment = one_of("txtype", &self.txtype, &TREATMENT_OPTIONS)?;
        let hiv_status = self.hiv.parse::<HivStatus>().map_err(|_| FormError::InvalidLabel {
            field: "hiv".into(),
            value: self.hiv.clone(),
        })?;

        let imaging = ImagingResults {
            chest_xray: TestStatus::parse(ImagingTest::ChestXray, &self.cxrdone)?,
            ct: TestStatus::parse(ImagingTest::Ct, &self.ctdone)?,
            mri: TestStatus::parse(ImagingTest::Mri, &self.mridone)?,
            ultrasound: TestStatus::parse(ImagingTest::Ultrasound, &self.usdone)?,
        };

        Ok(PatientReport {
            age,
            diagnosis,
            stage,
            hiv_status,
            imaging,
            treatment,
        })
    }
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<String, FormError> {
    if allowed.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(FormError::InvalidLabel {
            field: field.into(),
            value: value.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_is_valid() {
        let report = ReportForm::default().validate().unwrap();
        assert_eq!(report.age, 50);
        assert_eq!(report.diagnosis, "Adenocarcinoma");
        assert_eq!(report.hiv_status, HivStatus::Positive);
        assert_eq!(report.imaging.completed().len(), 4);
    }

    #[test]
    fn unknown_sentinels_pass_validation() {
        let form = ReportForm {
            biopsyhisto: "Unknown Biopsy Type".into(),
            stage: "Unknown Stage".into(),
            hiv: "Unknown HIV Status".into(),
            cxrdone: "Unknown CXR Status".into(),
            txtype: "Unknown Treatment Type".into(),
            ..ReportForm::default()
        };
        let report = form.validate().unwrap();
        assert_eq!(report.stage, "Unknown Stage");
        assert_eq!(report.imaging.chest_xray, TestStatus::Unknown);
    }

    #[test]
    fn rejects_label_outside_options() {
        let form = ReportForm {
            stage: "Stage 5: Made up".into(),
            ..ReportForm::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::InvalidLabel {
                field: "stage".into(),
                value: "Stage 5: Made up".into()
            }
        );
    }

    #[test]
    fn rejects_bad_hiv_label_with_form_field_name() {
        let form = ReportForm {
            hiv: "positive".into(),
            ..ReportForm::default()
        };
        match form.validate().unwrap_err() {
            FormError::InvalidLabel { field, .. } => assert_eq!(field, "hiv"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_swapped_imaging_label() {
        let form = ReportForm {
            usdone: "CT Done".into(),
            ..ReportForm::default()
        };
        match form.validate().unwrap_err() {
            FormError::InvalidLabel { field, .. } => assert_eq!(field, "usdone"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn age_bounds_enforced() {
        for age in [-1, 101, 300] {
            let form = ReportForm {
                age,
                ..ReportForm::default()
            };
            assert!(matches!(
                form.validate(),
                Err(FormError::AgeOutOfRange { .. })
            ));
        }
        for age in [0, 100] {
            let form = ReportForm {
                age,
                ..ReportForm::default()
            };
            assert_eq!(form.validate().unwrap().age as i64, age);
        }
    }

    #[test]
    fn completed_tests_in_fixed_order() {
        let imaging = ImagingResults {
            chest_xray: TestStatus::NotDone,
            ct: TestStatus::Unknown,
            mri: TestStatus::Done,
            ultrasound: TestStatus::Done,
        };
        assert_eq!(
            imaging.completed(),
            vec![ImagingTest::Mri, ImagingTest::Ultrasound]
        );
        assert!(ImagingResults::none_done().completed().is_empty());
    }

    #[test]
    fn form_deserializes_from_posted_json() {
        let json = r#"{
            "age": 62,
            "biopsyhisto": "Squamous Cell Carcinoma",
            "stage": "Stage 3: Advanced localized cancer",
            "hiv": "HIV Negative",
            "cxrdone": "CXR Not Done",
            "ctdone": "CT Done",
            "mridone": "Unknown MRI Status",
            "usdone": "US Not Done",
            "txtype": "Immunotherapy"
        }"#;
        let form: ReportForm = serde_json::from_str(json).unwrap();
        let report = form.validate().unwrap();
        assert_eq!(report.imaging.completed(), vec![ImagingTest::Ct]);
        assert_eq!(report.hiv_status, HivStatus::Negative);
    }
}

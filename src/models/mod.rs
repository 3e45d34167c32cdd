pub mod enums;
pub mod report;

pub use enums::{HivStatus, ImagingTest, TestStatus};
pub use report::{ImagingResults, PatientReport, ReportForm};

use thiserror::Error;

/// A submitted form value outside the allowed set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Invalid value for {field}: {value}")]
    InvalidLabel { field: String, value: String },

    #[error("Age must be between {min} and {max}, got {value}")]
    AgeOutOfRange { value: i64, min: u8, max: u8 },
}

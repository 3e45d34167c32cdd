use std::fmt;

use serde::{Deserialize, Serialize};

use super::FormError;

/// Macro to generate a label enum with as_str + std::str::FromStr pattern.
/// Serde uses the same display labels the form submits.
macro_rules! label_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = FormError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(FormError::InvalidLabel {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_enum!(HivStatus {
    Positive => "HIV Positive",
    Negative => "HIV Negative",
    Unknown => "Unknown HIV Status",
});

// ---------------------------------------------------------------------------
// Imaging tests
// ---------------------------------------------------------------------------

/// Imaging test that may appear on the report.
///
/// `ALL` is the fixed order completed tests are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagingTest {
    ChestXray,
    Ct,
    Mri,
    Ultrasound,
}

impl ImagingTest {
    pub const ALL: [ImagingTest; 4] = [
        ImagingTest::ChestXray,
        ImagingTest::Ct,
        ImagingTest::Mri,
        ImagingTest::Ultrasound,
    ];

    /// Abbreviation used in the form labels ("CXR Done").
    pub fn code(self) -> &'static str {
        match self {
            ImagingTest::ChestXray => "CXR",
            ImagingTest::Ct => "CT",
            ImagingTest::Mri => "MRI",
            ImagingTest::Ultrasound => "US",
        }
    }

    /// Name used in the patient-facing sentence.
    pub fn display_name(self) -> &'static str {
        match self {
            ImagingTest::ChestXray => "chest X-ray",
            ImagingTest::Ct => "CT scan",
            ImagingTest::Mri => "MRI",
            ImagingTest::Ultrasound => "ultrasound",
        }
    }

    /// Caption of the form control.
    pub fn form_caption(self) -> &'static str {
        match self {
            ImagingTest::ChestXray => "Chest X-ray:",
            ImagingTest::Ct => "CT Scan:",
            ImagingTest::Mri => "MRI Scan:",
            ImagingTest::Ultrasound => "Ultrasound:",
        }
    }

    /// Submitted field name.
    pub fn form_field(self) -> &'static str {
        match self {
            ImagingTest::ChestXray => "cxrdone",
            ImagingTest::Ct => "ctdone",
            ImagingTest::Mri => "mridone",
            ImagingTest::Ultrasound => "usdone",
        }
    }

    /// The selectable labels for this test, in form order.
    pub fn options(self) -> Vec<String> {
        TestStatus::ALL.iter().map(|s| s.label(self)).collect()
    }
}

/// Three-way status of an imaging test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Done,
    NotDone,
    Unknown,
}

impl TestStatus {
    pub const ALL: [TestStatus; 3] = [TestStatus::Done, TestStatus::NotDone, TestStatus::Unknown];

    /// Form label for this status of `test`, e.g. "MRI Not Done".
    pub fn label(self, test: ImagingTest) -> String {
        let code = test.code();
        match self {
            TestStatus::Done => format!("{code} Done"),
            TestStatus::NotDone => format!("{code} Not Done"),
            TestStatus::Unknown => format!("Unknown {code} Status"),
        }
    }

    /// Parse a form label for `test`. Labels of other tests are rejected.
    pub fn parse(test: ImagingTest, label: &str) -> Result<Self, FormError> {
        Self::ALL
            .into_iter()
            .find(|status| status.label(test) == label)
            .ok_or_else(|| FormError::InvalidLabel {
                field: test.form_field().into(),
                value: label.into(),
            })
    }

    pub fn is_done(self) -> bool {
        self == TestStatus::Done
    }
}

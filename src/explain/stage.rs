//! Stage label parsing.
//!
//! Form labels look like "Stage 4: Regional spread of cancer". The part
//! before the first colon is the stage identifier used for table lookups;
//! its last word is the stage numeral used for treatment classification.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

/// First numeral classified as advanced.
pub const ADVANCED_STAGE_THRESHOLD: i64 = 4;

/// Which `best_for` snippet a treatment explanation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageClass {
    Early,
    Advanced,
}

impl StageClass {
    pub fn from_number(number: i64) -> Self {
        if number >= ADVANCED_STAGE_THRESHOLD {
            StageClass::Advanced
        } else {
            StageClass::Early
        }
    }

    /// Classify a stage label. `None` when the label carries no numeral,
    /// as with "Unknown Stage".
    pub fn from_label(label: &str) -> Option<Self> {
        stage_number(label).map(Self::from_number)
    }
}

/// "Stage 4: Regional spread" → "Stage 4". Labels without a colon are
/// returned trimmed.
pub fn stage_identifier(label: &str) -> &str {
    label.split(':').next().unwrap_or(label).trim()
}

/// Numeral at the end of the stage identifier. Integers beyond the `i64`
/// range saturate, so they still land on the correct side of the threshold.
pub fn stage_number(label: &str) -> Option<i64> {
    let token = stage_identifier(label).split_whitespace().last()?;
    match token.parse::<i64>() {
        Ok(number) => Some(number),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_truncates_at_first_colon() {
        assert_eq!(stage_identifier("Stage 4: Regional spread of cancer"), "Stage 4");
        assert_eq!(stage_identifier("Stage 9: End-stage: cancer"), "Stage 9");
        assert_eq!(stage_identifier("  Stage 2  : x"), "Stage 2");
    }

    #[test]
    fn identifier_without_colon() {
        assert_eq!(stage_identifier("Unknown Stage"), "Unknown Stage");
        assert_eq!(stage_identifier(""), "");
    }

    #[test]
    fn number_parsed_from_last_token() {
        assert_eq!(stage_number("Stage 4: Regional spread of cancer"), Some(4));
        assert_eq!(stage_number("Stage 10: Hypothetical"), Some(10));
        assert_eq!(stage_number("Unknown Stage"), None);
        assert_eq!(stage_number("Stage IV: roman"), None);
        assert_eq!(stage_number(""), None);
    }

    #[test]
    fn boundary_three_early_four_advanced() {
        assert_eq!(
            StageClass::from_label("Stage 3: Advanced localized cancer"),
            Some(StageClass::Early)
        );
        assert_eq!(
            StageClass::from_label("Stage 4: Regional spread of cancer"),
            Some(StageClass::Advanced)
        );
    }

    #[test]
    fn classification_over_range() {
        for n in -2..=12 {
            let expected = if n >= 4 {
                StageClass::Advanced
            } else {
                StageClass::Early
            };
            assert_eq!(StageClass::from_label(&format!("Stage {n}: x")), Some(expected));
        }
    }

    #[test]
    fn overflowing_numerals_saturate() {
        assert_eq!(stage_number("Stage 99999999999999999999: x"), Some(i64::MAX));
        assert_eq!(stage_number("Stage -99999999999999999999: x"), Some(i64::MIN));
        assert_eq!(
            StageClass::from_label("Stage 99999999999999999999: hypothetical"),
            Some(StageClass::Advanced)
        );
        assert_eq!(
            StageClass::from_label("Stage -99999999999999999999: hypothetical"),
            Some(StageClass::Early)
        );
    }

    #[test]
    fn unknown_stage_is_unclassified() {
        assert_eq!(StageClass::from_label("Unknown Stage"), None);
    }
}

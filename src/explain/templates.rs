/// Fixed wording of the explanation sections.
///
/// Plain text with "• " bullets; headings carry a leading emoji marker.
pub struct Templates;

pub const BULLET: &str = "• ";

pub const STAGE_NOT_AVAILABLE: &str = "The staging information is not available.";
pub const TREATMENT_NOT_AVAILABLE: &str = "The treatment information is not available.";
pub const STAGE_UNDETERMINED: &str =
    "How this treatment fits depends on the cancer stage, which has not been determined yet.";

impl Templates {
    pub fn condition_heading() -> &'static str {
        "🔬 Your Type of Cancer:"
    }

    pub fn stage_heading() -> &'static str {
        "\n🔍 Understanding the Cancer Stage:"
    }

    pub fn stage_method_heading() -> &'static str {
        "\nHow we determined this stage:"
    }

    pub fn treatment_heading(name: &str) -> String {
        format!("\n💊 About Your Treatment Plan: {name}")
    }

    pub fn bullet(text: &str) -> String {
        format!("{BULLET}{text}")
    }

    pub fn prognosis(prognosis: &str) -> String {
        format!("{BULLET}What this means: {prognosis}")
    }

    /// `tests` already in display order.
    pub fn imaging_findings(tests: &[&str], typical_findings: &str) -> String {
        format!(
            "{BULLET}The {} helped us see {typical_findings}",
            tests.join(", ")
        )
    }

    pub fn what_it_is(explanation: &str) -> String {
        format!("{BULLET}What it is: {explanation}")
    }

    pub fn why_this_treatment(snippet: &str) -> String {
        format!("{BULLET}Why this treatment: {snippet}")
    }

    pub fn special_considerations(snippet: &str) -> String {
        format!("{BULLET}Special considerations: {snippet}")
    }

    /// One glossary line for the "learn more" panel.
    pub fn glossary_line(term: &str, explanation: &str) -> String {
        format!("**{term}**: {explanation}")
    }
}

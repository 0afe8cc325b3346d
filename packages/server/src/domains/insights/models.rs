use serde::{Deserialize, Serialize};

/// Financial snapshot an insight request is generated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRequest {
    /// Monthly budget in dollars
    pub budget: f64,
    /// Amount spent so far this month
    pub spent: f64,
    /// Savings goal
    pub goal: f64,
    /// Outstanding debt (loans or credit card)
    pub debt: f64,
    /// Financial topic the student asked about
    pub topic: String,
}

/// Structured result of parsing an AI coaching response.
///
/// Each tip field is independent: `None` means the section was absent from
/// the response, while `Some("")` means the marker was present with an empty
/// value. `raw_response` always carries the verbatim source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedInsight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_tip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_tip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_suggestion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub earn_extra_suggestion: Option<String>,

    /// The untouched model output
    pub raw_response: String,

    /// Set when the provider call or response handling failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParsedInsight {
    /// An insight with every tip absent, used as the parse starting point.
    pub fn empty(raw_response: impl Into<String>) -> Self {
        Self {
            budget_tip: None,
            savings_tip: None,
            explanation: None,
            scholarship_suggestion: None,
            earn_extra_suggestion: None,
            raw_response: raw_response.into(),
            error: None,
        }
    }

    /// True when no tip field was extracted.
    pub fn is_empty(&self) -> bool {
        self.budget_tip.is_none()
            && self.savings_tip.is_none()
            && self.explanation.is_none()
            && self.scholarship_suggestion.is_none()
            && self.earn_extra_suggestion.is_none()
    }

    /// Generic fallback served when the provider call fails. Keeps the
    /// response usable so the route layer returns a partial success, not a
    /// server error.
    pub fn provider_fallback(error: impl Into<String>, topic: &str) -> Self {
        Self {
            budget_tip: Some(
                "We're having trouble generating personalized advice right now. Try again later."
                    .to_string(),
            ),
            savings_tip: Some(
                "Consider setting aside a small amount each week for emergencies.".to_string(),
            ),
            explanation: Some(format!(
                "We couldn't provide a specific explanation for '{}' at this time.",
                topic
            )),
            scholarship_suggestion: None,
            earn_extra_suggestion: None,
            raw_response: String::new(),
            error: Some(error.into()),
        }
    }
}

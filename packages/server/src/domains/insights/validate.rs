//! Insight request validation.

use super::models::InsightRequest;
pub use crate::common::validate::ValidationErrors;

/// Longest topic the coach prompt accepts.
const MAX_TOPIC_LEN: usize = 100;

/// Validate a financial snapshot before it reaches the prompt builder.
pub fn validate_insight_request(request: &InsightRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for (field, value, message) in [
        ("budget", request.budget, "Budget cannot be negative"),
        ("spent", request.spent, "Spent amount cannot be negative"),
        ("goal", request.goal, "Goal amount cannot be negative"),
        ("debt", request.debt, "Debt amount cannot be negative"),
    ] {
        if !value.is_finite() {
            errors.add(field, format!("{} must be a number", field));
        } else if value < 0.0 {
            errors.add(field, message);
        }
    }

    if !request.topic.is_empty() && request.topic.chars().count() > MAX_TOPIC_LEN {
        errors.add("topic", "Topic is too long (max 100 characters)");
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> InsightRequest {
        InsightRequest {
            budget: 800.0,
            spent: 300.0,
            goal: 150.0,
            debt: 0.0,
            topic: "emergency funds".to_string(),
        }
    }

    #[test]
    fn accepts_valid_request() {
        assert!(validate_insight_request(&snapshot()).is_ok());
    }

    #[test]
    fn rejects_negative_amounts_per_field() {
        let mut request = snapshot();
        request.budget = -1.0;
        request.spent = -2.0;
        request.goal = -3.0;
        request.debt = -4.0;

        let errors = validate_insight_request(&request).unwrap_err();
        for field in ["budget", "spent", "goal", "debt"] {
            assert!(errors.fields.contains_key(field), "missing error for {}", field);
        }
    }

    #[test]
    fn rejects_overlong_topic() {
        let mut request = snapshot();
        request.topic = "x".repeat(101);

        let errors = validate_insight_request(&request).unwrap_err();
        assert_eq!(errors.fields["topic"], "Topic is too long (max 100 characters)");
    }

    #[test]
    fn topic_at_limit_is_accepted() {
        let mut request = snapshot();
        request.topic = "x".repeat(100);
        assert!(validate_insight_request(&request).is_ok());
    }

    #[test]
    fn rejects_non_finite_amounts() {
        let mut request = snapshot();
        request.debt = f64::INFINITY;

        let errors = validate_insight_request(&request).unwrap_err();
        assert!(errors.fields.contains_key("debt"));
    }
}

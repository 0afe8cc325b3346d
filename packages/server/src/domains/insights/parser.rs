//! Best-effort structuring of free-form coaching responses.
//!
//! The prompt asks the model to answer in five labeled sections
//! (`BUDGET_TIP:` etc.). Markers are matched independently, so a response
//! with only some sections still yields those fields. When no marker is
//! present at all, a positional line heuristic handles unformatted output.

use super::models::ParsedInsight;

/// Section marker for the weekly budgeting tip
pub const BUDGET_TIP: &str = "BUDGET_TIP:";
/// Section marker for the savings tip
pub const SAVINGS_TIP: &str = "SAVINGS_TIP:";
/// Section marker for the topic explanation
pub const EXPLANATION: &str = "EXPLANATION:";
/// Section marker for the scholarship suggestion
pub const SCHOLARSHIP: &str = "SCHOLARSHIP:";
/// Section marker for the extra-income suggestion
pub const EARN_EXTRA: &str = "EARN_EXTRA:";

/// Extract the rest of the line following the first occurrence of `marker`.
///
/// An empty remainder is a real value: `Some("")` records that the marker was
/// present, which callers treat differently from an absent section.
fn section(text: &str, marker: &str) -> Option<String> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let line = rest.split('\n').next().unwrap_or("");
    Some(line.trim().to_string())
}

/// Parse a raw model response into a [`ParsedInsight`].
///
/// Total function: every input, including the empty string, produces a
/// result with `raw_response` set to the verbatim input.
pub fn parse(text: &str) -> ParsedInsight {
    let mut insight = ParsedInsight::empty(text);

    insight.budget_tip = section(text, BUDGET_TIP);
    insight.savings_tip = section(text, SAVINGS_TIP);
    insight.explanation = section(text, EXPLANATION);
    insight.scholarship_suggestion = section(text, SCHOLARSHIP);
    insight.earn_extra_suggestion = section(text, EARN_EXTRA);

    // No marker matched: fall back to positional lines for models that
    // ignored the format instruction. Fewer than five lines means nothing is
    // fabricated and every field stays absent.
    if insight.is_empty() {
        let lines: Vec<&str> = text.trim().split('\n').collect();
        if lines.len() >= 5 {
            insight.budget_tip = Some(lines[0].to_string());
            insight.savings_tip = Some(lines[1].to_string());
            insight.explanation = Some(lines[2].to_string());
            insight.scholarship_suggestion = Some(lines[3].to_string());
            insight.earn_extra_suggestion = Some(lines[4].to_string());
        }
    }

    insight
}

//! Prompt construction for the financial coach.

use super::models::InsightRequest;

/// System role for every coaching exchange.
pub const SYSTEM_PROMPT: &str =
    "You are a smart and friendly AI financial coach for college students.";

/// Build the user prompt for a financial snapshot.
///
/// The format instruction at the end is what the response parser keys on;
/// keep the marker labels in sync with [`parser`](super::parser).
pub fn financial_prompt(request: &InsightRequest) -> String {
    format!(
        "The student has:\n\
         - Monthly Budget: ${budget}\n\
         - Spent this month: ${spent}\n\
         - Savings Goal: ${goal}\n\
         - Debt Level: ${debt} (loans or credit card)\n\
         - Interest Topic: {topic}\n\
         \n\
         Give them:\n\
         1. A simple budgeting tip for this week.\n\
         2. A small way to save (realistic).\n\
         3. A short explanation of {topic} (1-2 sentences).\n\
         4. One scholarship they should look into based on need.\n\
         5. One way to earn a little extra money this week (e.g., online tutoring, surveys, reselling books).\n\
         \n\
         Format your response in this structure to make it easier to parse:\n\
         BUDGET_TIP: [Your budget tip here]\n\
         SAVINGS_TIP: [Your savings tip here]\n\
         EXPLANATION: [Your explanation here]\n\
         SCHOLARSHIP: [Your scholarship suggestion here]\n\
         EARN_EXTRA: [Your extra earning suggestion here]\n\
         \n\
         Be casual, supportive, and practical. Avoid pressure. Use clear, student-friendly language.",
        budget = request.budget,
        spent = request.spent,
        goal = request.goal,
        debt = request.debt,
        topic = request.topic,
    )
}

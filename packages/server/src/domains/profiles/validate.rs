//! Signup and expense data validation.

use lazy_static::lazy_static;
use regex::Regex;

use super::models::{Expense, NewProfile};
pub use crate::common::validate::ValidationErrors;

lazy_static! {
    // RFC 5322 simplified
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

fn digits(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Validate a signup payload. Collects every failure rather than stopping at
/// the first, so the client can show all field errors at once.
pub fn validate_profile(profile: &NewProfile) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for (field, value) in [
        ("firstName", &profile.first_name),
        ("lastName", &profile.last_name),
        ("email", &profile.email),
        ("password", &profile.password),
    ] {
        if value.trim().is_empty() {
            errors.add(field, format!("{} is required", field));
        }
    }

    if !profile.email.is_empty() && !EMAIL_REGEX.is_match(&profile.email) {
        errors.add("email", "Invalid email format");
    }

    if !profile.password.is_empty() && profile.password.len() < 8 {
        errors.add("password", "Password must be at least 8 characters long");
    }

    if let Some(phone) = profile.phone.as_deref().filter(|p| !p.is_empty()) {
        if digits(phone) != 10 {
            errors.add("phone", "Phone number must be 10 digits");
        }
    }

    if let Some(ssn) = profile.ssn.as_deref().filter(|s| !s.is_empty()) {
        if digits(ssn) != 9 {
            errors.add("ssn", "SSN must be 9 digits");
        }
    }

    if let Some(budget) = profile.budget {
        if budget < 0.0 {
            errors.add("budget", "Budget cannot be negative");
        }
    }

    if let Some(goal) = profile.savings_goal {
        if goal < 0.0 {
            errors.add("savingsGoal", "Savings goal cannot be negative");
        }
    }

    errors.into_result()
}

/// Validate an expense entry before it is persisted.
pub fn validate_expense(expense: &Expense) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if expense.category.trim().is_empty() {
        errors.add("category", "category is required");
    }

    if !expense.amount.is_finite() {
        errors.add("amount", "Amount must be a number");
    } else if expense.amount <= 0.0 {
        errors.add("amount", "Amount must be positive");
    }

    errors.into_result()
}

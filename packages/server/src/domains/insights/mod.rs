//! AI-generated budgeting insights.
//!
//! The LLM is asked to answer in five labeled sections; [`parser`] turns that
//! free-form text into a [`ParsedInsight`], and [`InsightsService`] wires the
//! provider call, parsing, and tip history together.

pub mod models;
pub mod parser;
pub mod prompt;
pub mod service;
pub mod validate;

pub use models::{InsightRequest, ParsedInsight};
pub use parser::parse;
pub use service::InsightsService;
pub use validate::validate_insight_request;

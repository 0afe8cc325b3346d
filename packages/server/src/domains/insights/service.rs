//! Insight generation and tip history.

use chrono::Utc;
use llm_client::ChatProvider;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use super::models::{InsightRequest, ParsedInsight};
use super::parser;
use super::prompt::{financial_prompt, SYSTEM_PROMPT};
use super::validate::{validate_insight_request, ValidationErrors};
use crate::config::Config;
use crate::kernel::{Direction, Document, DocumentStore, StoreError};

/// Subcollection under a user document holding generated tips.
const TIPS_SUBCOLLECTION: &str = "ai_tips";

/// Generates budgeting insights via a chat provider and manages tip history.
pub struct InsightsService {
    provider: Arc<dyn ChatProvider>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl InsightsService {
    pub fn new(provider: Arc<dyn ChatProvider>, config: &Config) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Ask the coach for insights on a financial snapshot.
    ///
    /// A malformed snapshot is a caller error and is rejected up front.
    /// Provider failures are absorbed into a generic fallback insight with
    /// the `error` field set; past validation, callers always get a usable
    /// response.
    pub async fn financial_insights(
        &self,
        request: &InsightRequest,
    ) -> Result<ParsedInsight, ValidationErrors> {
        validate_insight_request(request)?;

        let user_prompt = financial_prompt(request);

        let insight = match self
            .provider
            .complete(
                SYSTEM_PROMPT,
                &user_prompt,
                &self.model,
                self.max_tokens,
                self.temperature,
            )
            .await
        {
            Ok(text) => {
                debug!(topic = %request.topic, chars = text.len(), "received coaching response");
                parser::parse(&text)
            }
            Err(e) => {
                warn!(error = %e, topic = %request.topic, "insight generation failed, serving fallback");
                ParsedInsight::provider_fallback(e.to_string(), &request.topic)
            }
        };

        Ok(insight)
    }

    /// Persist a generated tip to the user's history, returning the new id.
    pub async fn save_tip(
        &self,
        store: &dyn DocumentStore,
        user_id: &str,
        insight: &ParsedInsight,
        request: &InsightRequest,
    ) -> Result<String, StoreError> {
        let record = json!({
            "topic": request.topic,
            "budget_tip": insight.budget_tip,
            "savings_tip": insight.savings_tip,
            "explanation": insight.explanation,
            "scholarship_suggestion": insight.scholarship_suggestion,
            "earn_extra_suggestion": insight.earn_extra_suggestion,
            "created_at": Utc::now().to_rfc3339(),
        });

        store
            .append_to_subcollection(&format!("users/{}", user_id), TIPS_SUBCOLLECTION, record)
            .await
    }

    /// Most recent tips first.
    pub async fn tips_history(
        &self,
        store: &dyn DocumentStore,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        store
            .query_ordered(
                &format!("users/{}/{}", user_id, TIPS_SUBCOLLECTION),
                &[],
                "created_at",
                Direction::Descending,
                limit,
            )
            .await
    }
}

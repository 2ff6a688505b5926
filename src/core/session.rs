use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::core::context::build_trip_context;
use crate::core::history::{ConversationHistory, Role};
use crate::core::prompts::chat_system_message;
use crate::error::{ApiError, Result};
use crate::services::completion_client::{
    first_choice_text, ChatCompletionRequest, CompletionClient,
};
use crate::services::trip_client::TripClient;
use crate::types::trip::{Activity, TripSummary};

const CHAT_TIMEOUT: Duration = Duration::from_secs(60);
const CHAT_MAX_TOKENS: u32 = 150;
const CHAT_TEMPERATURE: f32 = 0.7;

/// Reply used when the completion API answers with an empty choices array.
pub const EMPTY_CHOICES_REPLY: &str = "Sorry, no response from the AI service.";

/// Inbound chat request body. `trip`/`activities` are the legacy inline
/// sourcing path; `trip_id` wins when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub session_id: Option<String>,
    pub trip_id: Option<String>,
    pub trip: Option<TripSummary>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// The chat side of the proxy: resolves trip context, keeps the caller's
/// history current, and forwards the conversation to the completion API.
///
/// The session itself is stateless; history is owned by the caller and
/// passed into [`ChatSession::submit`] explicitly.
#[derive(Debug)]
pub struct ChatSession {
    completions: Option<CompletionClient>,
    trips: TripClient,
    model: String,
}

impl ChatSession {
    pub fn new(config: &AppConfig) -> Self {
        let completions = config.api_key.as_ref().map(|key| {
            let mut client = CompletionClient::new(key.clone());
            client.set_base_url(config.completion_base_url.clone());
            client
        });

        Self {
            completions,
            trips: TripClient::new(config.trip_api_base.clone()),
            model: config.model.clone(),
        }
    }

    /// Handle one chat turn.
    ///
    /// Validation failures and a missing credential are the only errors that
    /// escape; upstream failures are absorbed into a descriptive fallback
    /// reply. The user turn is recorded before the outbound call and is not
    /// rolled back on failure.
    pub async fn submit(
        &self,
        history: &mut ConversationHistory,
        request: &ChatRequest,
    ) -> Result<String> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ApiError::InvalidInput(
                "Please send a valid message.".to_string(),
            ));
        }

        let (trip, activities) = self.resolve_trip_context(request).await;
        let trip_context = build_trip_context(trip.as_ref(), &activities);

        let Some(client) = &self.completions else {
            error!(target: "tripflow::chat", "GROQ_API_KEY is not set");
            return Err(ApiError::Config(
                "Groq API key is not configured. Please set GROQ_API_KEY environment variable."
                    .to_string(),
            ));
        };

        history.push(Role::User, message);

        let mut messages = vec![json!({
            "role": "system",
            "content": chat_system_message(&trip_context),
        })];
        messages.extend(history.as_messages());

        let body = ChatCompletionRequest::new(self.model.as_str(), messages)
            .with_max_tokens(CHAT_MAX_TOKENS)
            .with_temperature(CHAT_TEMPERATURE)
            .into_value();

        match client.chat_completion(&body, CHAT_TIMEOUT).await {
            Ok(payload) => {
                let reply = first_choice_text(&payload)
                    .unwrap_or_else(|| EMPTY_CHOICES_REPLY.to_string());
                history.push(Role::Ai, reply.as_str());
                info!(target: "tripflow::chat", turns = history.len(), "Chat turn completed");
                Ok(reply)
            }
            Err(ApiError::UpstreamApi { message }) => {
                warn!(target: "tripflow::chat", error = %message, "Completion API returned an error payload");
                Ok(format!("API Error: {message}"))
            }
            Err(ApiError::UpstreamTransport(details)) => {
                warn!(target: "tripflow::chat", error = %details, "Completion request failed");
                Ok(format!("Connection error: {details}"))
            }
            Err(err) => {
                error!(target: "tripflow::chat", error = %err, "Unexpected chat failure");
                Ok(format!("An unexpected error occurred: {err}"))
            }
        }
    }

    /// Resolve the trip context for a request. A `trip_id` takes priority
    /// and its lookup failure degrades to no context rather than falling
    /// back to the inline fields.
    async fn resolve_trip_context(
        &self,
        request: &ChatRequest,
    ) -> (Option<TripSummary>, Vec<Activity>) {
        if let Some(trip_id) = request.trip_id.as_deref().filter(|id| !id.is_empty()) {
            return match self.trips.fetch_trip(trip_id).await {
                Ok(record) => (Some(record.summary), record.activities),
                Err(err) => {
                    warn!(
                        target: "tripflow::chat",
                        trip_id,
                        error = %err,
                        "Trip lookup failed; continuing without trip context"
                    );
                    (None, Vec::new())
                }
            };
        }

        (request.trip.clone(), request.activities.clone())
    }
}

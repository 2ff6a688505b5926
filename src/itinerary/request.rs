use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::json;
use tracing::info;

use crate::config::AppConfig;
use crate::core::prompts::{itinerary_user_prompt, ITINERARY_SYSTEM_PROMPT};
use crate::error::{ApiError, Result};
use crate::itinerary::normalize::normalize_itinerary;
use crate::services::completion_client::{
    first_choice_text, ChatCompletionRequest, CompletionClient,
};
use crate::types::itinerary::{ItineraryDocument, ItineraryParams};

const ITINERARY_TIMEOUT: Duration = Duration::from_secs(120);
const ITINERARY_MAX_TOKENS: u32 = 4000;
const ITINERARY_TEMPERATURE: f32 = 0.7;

/// Itinerary parameters that passed validation, with parsed dates and the
/// inclusive day count.
#[derive(Debug, Clone)]
pub struct ValidatedItinerary {
    pub params: ItineraryParams,
    pub start: NaiveDate,
    pub num_days: i64,
}

/// Parse a trip date in either RFC 3339 timestamp or plain `YYYY-MM-DD`
/// form. Unlike the chat context's rendering helper, failure here is a
/// client-input error carrying the underlying cause.
pub fn parse_trip_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.contains('T') {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(parsed.date_naive());
        }
        // Timestamps without an offset still count as the timestamp form.
        return NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|parsed| parsed.date())
            .map_err(|err| ApiError::InvalidInput(format!("Invalid date format: {err}")));
    }

    let prefix = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .map_err(|err| ApiError::InvalidInput(format!("Invalid date format: {err}")))
}

/// Validate inbound parameters. Runs before any network call: required
/// fields, both dates parseable, and a positive inclusive day count.
pub fn validate_params(params: ItineraryParams) -> Result<ValidatedItinerary> {
    if params.destination.trim().is_empty()
        || params.start_date.trim().is_empty()
        || params.end_date.trim().is_empty()
    {
        return Err(ApiError::InvalidInput(
            "Missing required fields: destination, startDate, endDate".to_string(),
        ));
    }

    let start = parse_trip_date(&params.start_date)?;
    let end = parse_trip_date(&params.end_date)?;
    let num_days = (end - start).num_days() + 1;
    if num_days < 1 {
        return Err(ApiError::InvalidInput(
            "endDate must not be earlier than startDate".to_string(),
        ));
    }

    Ok(ValidatedItinerary {
        params,
        start,
        num_days,
    })
}

/// The itinerary side of the proxy: translates trip parameters into the
/// strict-JSON prompt, calls the completion API with the long output cap,
/// and normalizes the reply.
#[derive(Debug)]
pub struct ItineraryService {
    completions: Option<CompletionClient>,
    model: String,
}

impl ItineraryService {
    pub fn new(config: &AppConfig) -> Self {
        let completions = config.api_key.as_ref().map(|key| {
            let mut client = CompletionClient::new(key.clone());
            client.set_base_url(config.completion_base_url.clone());
            client
        });

        Self {
            completions,
            model: config.model.clone(),
        }
    }

    pub async fn generate(&self, params: ItineraryParams) -> Result<ItineraryDocument> {
        let validated = validate_params(params)?;

        let Some(client) = &self.completions else {
            return Err(ApiError::Config("GROQ_API_KEY is not set".to_string()));
        };

        let messages = vec![
            json!({ "role": "system", "content": ITINERARY_SYSTEM_PROMPT }),
            json!({
                "role": "user",
                "content": itinerary_user_prompt(&validated.params, validated.num_days),
            }),
        ];
        let body = ChatCompletionRequest::new(self.model.as_str(), messages)
            .with_max_tokens(ITINERARY_MAX_TOKENS)
            .with_temperature(ITINERARY_TEMPERATURE)
            .into_value();

        info!(
            target: "tripflow::itinerary",
            destination = %validated.params.destination,
            days = validated.num_days,
            "Requesting itinerary generation"
        );

        let payload = client.chat_completion(&body, ITINERARY_TIMEOUT).await?;
        let raw_text = first_choice_text(&payload).ok_or_else(|| ApiError::UpstreamApi {
            message: "No choices in AI response".to_string(),
        })?;

        normalize_itinerary(&raw_text, validated.start, &validated.params.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_params() -> ItineraryParams {
        ItineraryParams {
            destination: "Munnar".to_string(),
            current_location: "Kochi".to_string(),
            start_date: "2024-03-01".to_string(),
            end_date: "2024-03-05".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_destination_is_rejected() {
        let params = ItineraryParams {
            destination: String::new(),
            ..valid_params()
        };
        let err = validate_params(params).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn test_inclusive_day_count() {
        let validated = validate_params(valid_params()).unwrap();
        assert_eq!(validated.num_days, 5);
        assert_eq!(
            validated.start,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );

        let single_day = validate_params(ItineraryParams {
            end_date: "2024-03-01".to_string(),
            ..valid_params()
        })
        .unwrap();
        assert_eq!(single_day.num_days, 1);
    }

    #[test]
    fn test_date_forms() {
        assert_eq!(
            parse_trip_date("2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            parse_trip_date("2024-03-01T00:00:00Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            parse_trip_date("2024-03-01T08:15:00").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_unparseable_date_reports_cause() {
        let err = validate_params(ItineraryParams {
            start_date: "March first".to_string(),
            ..valid_params()
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert!(err.to_string().contains("Invalid date format"));
    }

    #[test]
    fn test_reversed_dates_are_rejected() {
        let err = validate_params(ItineraryParams {
            start_date: "2024-03-05".to_string(),
            end_date: "2024-03-01".to_string(),
            ..valid_params()
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}

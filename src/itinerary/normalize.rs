use chrono::{Days, NaiveDate};
use serde::Deserialize;
use tracing::error;

use crate::error::{ApiError, Result};
use crate::types::itinerary::{
    ActivityCategory, ItineraryActivity, ItineraryDay, ItineraryDocument, TransportationPlan,
};

const RAW_PREVIEW_CHARS: usize = 500;

const DEFAULT_TIME: &str = "9:00 AM";
const DEFAULT_TITLE: &str = "Activity";
const DEFAULT_DURATION: &str = "1 hour";

/// Partially-known shape of the model's reply. Everything is optional here;
/// reconciliation into [`ItineraryDocument`] is where defaults happen. The
/// model's own `day`/`date` fields are not even declared — they are dropped
/// at deserialization along with any other unknown key.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItinerary {
    #[serde(default)]
    itinerary: Vec<RawDay>,
    total_estimated_cost: Option<String>,
    transportation: Option<TransportationPlan>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDay {
    #[serde(default)]
    activities: Vec<RawActivity>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawActivity {
    time: Option<String>,
    #[serde(rename = "type")]
    category: Option<String>,
    title: Option<String>,
    location: Option<String>,
    description: Option<String>,
    estimated_cost: Option<String>,
    duration: Option<String>,
}

/// Strip a single wrapping markdown code fence, with or without a language
/// tag, then trim. The only deviation from pure JSON the parser tolerates.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Reshape the model's raw reply into the document the front end expects.
///
/// Day indices are assigned positionally starting at 1 and each day's date
/// is `start + (position - 1)` — whatever the model claimed is discarded.
/// Missing activity fields get defaults; no activity is dropped.
pub fn normalize_itinerary(
    raw_text: &str,
    start: NaiveDate,
    destination: &str,
) -> Result<ItineraryDocument> {
    let cleaned = strip_code_fence(raw_text);

    let mut deserializer = serde_json::Deserializer::from_str(cleaned);
    let raw: RawItinerary =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            let path = err.path().to_string();
            let location = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            error!(target: "tripflow::itinerary", location = %location, "Failed to parse itinerary reply");
            ApiError::MalformedReply {
                message: format!("at {location}: {}", err.into_inner()),
                raw: truncate_chars(cleaned, RAW_PREVIEW_CHARS),
            }
        })?;

    let days = raw
        .itinerary
        .into_iter()
        .enumerate()
        .map(|(index, day)| ItineraryDay {
            day: index as u32 + 1,
            date: start + Days::new(index as u64),
            activities: day
                .activities
                .into_iter()
                .map(|activity| normalize_activity(activity, destination))
                .collect(),
        })
        .collect();

    Ok(ItineraryDocument {
        itinerary: days,
        total_estimated_cost: raw.total_estimated_cost,
        transportation: raw.transportation,
    })
}

fn normalize_activity(raw: RawActivity, destination: &str) -> ItineraryActivity {
    ItineraryActivity {
        time: raw.time.unwrap_or_else(|| DEFAULT_TIME.to_string()),
        category: ActivityCategory::from_raw(raw.category.as_deref()),
        title: raw.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        location: raw.location.unwrap_or_else(|| destination.to_string()),
        description: raw.description.unwrap_or_default(),
        estimated_cost: raw.estimated_cost.unwrap_or_default(),
        duration: raw.duration.unwrap_or_else(|| DEFAULT_DURATION.to_string()),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```json\n{\"a\":1}\n```  "), "{\"a\":1}");
    }

    #[test]
    fn test_fenced_and_unfenced_parse_identically() {
        let plain = r#"{"itinerary": [{"activities": [{"title": "Hike"}]}]}"#;
        let fenced = format!("```json\n{plain}\n```");

        let a = normalize_itinerary(plain, start(), "Munnar").unwrap();
        let b = normalize_itinerary(&fenced, start(), "Munnar").unwrap();
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_dates_derived_from_start_not_model() {
        let raw = r#"{
            "itinerary": [
                {"day": 7, "date": "1999-01-01", "activities": []},
                {"day": 1, "date": "2031-12-25", "activities": []},
                {"day": 4, "date": "not even a date", "activities": []}
            ]
        }"#;
        let document = normalize_itinerary(raw, start(), "Munnar").unwrap();

        let days: Vec<u32> = document.itinerary.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![1, 2, 3]);

        let dates: Vec<NaiveDate> = document.itinerary.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            ]
        );
    }

    #[test]
    fn test_missing_activity_fields_get_defaults() {
        let raw = r#"{
            "itinerary": [{"activities": [
                {"time": "7:30 PM", "type": "meal", "description": "Seafood dinner"}
            ]}]
        }"#;
        let document = normalize_itinerary(raw, start(), "Kochi").unwrap();
        let activity = &document.itinerary[0].activities[0];

        assert_eq!(activity.title, "Activity");
        assert_eq!(activity.location, "Kochi");
        assert_eq!(activity.estimated_cost, "");
        // Present fields survive untouched.
        assert_eq!(activity.time, "7:30 PM");
        assert_eq!(activity.category, ActivityCategory::Meal);
        assert_eq!(activity.description, "Seafood dinner");
        assert_eq!(activity.duration, "1 hour");
    }

    #[test]
    fn test_day_without_activities_array_is_empty() {
        let raw = r#"{"itinerary": [{"day": 1}]}"#;
        let document = normalize_itinerary(raw, start(), "Kochi").unwrap();
        assert!(document.itinerary[0].activities.is_empty());
    }

    #[test]
    fn test_cost_and_transportation_pass_through() {
        let raw = r#"{
            "itinerary": [],
            "totalEstimatedCost": "₹5800",
            "transportation": {
                "toDestination": {"type": "train", "departureTime": "6:00 AM"}
            }
        }"#;
        let document = normalize_itinerary(raw, start(), "Kochi").unwrap();
        assert_eq!(document.total_estimated_cost.as_deref(), Some("₹5800"));

        let plan = document.transportation.unwrap();
        let leg = plan.to_destination.unwrap();
        assert_eq!(leg.mode.as_deref(), Some("train"));
        assert_eq!(leg.arrival_time, None);
        assert!(plan.from_destination.is_none());

        let absent = normalize_itinerary(r#"{"itinerary": []}"#, start(), "Kochi").unwrap();
        let value = serde_json::to_value(&absent).unwrap();
        assert!(value["totalEstimatedCost"].is_null());
        assert!(value["transportation"].is_null());
    }

    #[test]
    fn test_malformed_json_yields_parse_error_with_preview() {
        let raw = "Here is your itinerary! Day 1 you should visit the fort.";
        let err = normalize_itinerary(raw, start(), "Kochi").unwrap_err();
        match err {
            ApiError::MalformedReply { raw: preview, .. } => {
                assert!(preview.starts_with("Here is your itinerary!"));
                assert!(preview.chars().count() <= RAW_PREVIEW_CHARS);
            }
            other => panic!("expected MalformedReply, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category_folds_to_activity() {
        let raw = r#"{"itinerary": [{"activities": [{"type": "shopping"}]}]}"#;
        let document = normalize_itinerary(raw, start(), "Kochi").unwrap();
        assert_eq!(
            document.itinerary[0].activities[0].category,
            ActivityCategory::Activity
        );
    }
}

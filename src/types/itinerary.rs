use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inbound parameters for itinerary generation.
///
/// `destination`, `start_date` and `end_date` are required by validation;
/// the remaining fields carry the same defaults whether the key is absent
/// or the whole body omits it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItineraryParams {
    pub destination: String,
    pub current_location: String,
    pub start_date: String,
    pub end_date: String,
    pub travelers: u32,
    pub daily_budget: f64,
    pub budget_range: String,
    pub interests: Vec<String>,
    pub additional_notes: String,
}

impl Default for ItineraryParams {
    fn default() -> Self {
        Self {
            destination: String::new(),
            current_location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            travelers: 1,
            daily_budget: 0.0,
            budget_range: "midrange".to_string(),
            interests: Vec::new(),
            additional_notes: String::new(),
        }
    }
}

/// Category an itinerary activity belongs to. Serialized under the wire key
/// `type`, matching the shape the prompt demands of the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Transportation,
    #[default]
    Activity,
    Meal,
    Accommodation,
}

impl ActivityCategory {
    /// Map a raw model-supplied category string. Missing or unknown values
    /// fold into `Activity`, the same default used for an absent field.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("transportation") => Self::Transportation,
            Some("meal") => Self::Meal,
            Some("accommodation") => Self::Accommodation,
            _ => Self::Activity,
        }
    }
}

/// A fully-defaulted activity in the normalized itinerary. Every field is
/// guaranteed present; the normalizer fills gaps before this type is built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryActivity {
    pub time: String,
    #[serde(rename = "type")]
    pub category: ActivityCategory,
    pub title: String,
    pub location: String,
    pub description: String,
    pub estimated_cost: String,
    pub duration: String,
}

/// One day of the normalized itinerary. `day` is positional (1-based) and
/// `date` is derived from the trip start, never taken from the model.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryDay {
    pub day: u32,
    #[serde(serialize_with = "serialize_display_date")]
    pub date: NaiveDate,
    pub activities: Vec<ItineraryActivity>,
}

/// Outbound transportation summary. Legs pass through from the model without
/// defaulting; absent fields stay null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationPlan {
    pub to_destination: Option<TransportLeg>,
    pub from_destination: Option<TransportLeg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportLeg {
    #[serde(rename = "type")]
    pub mode: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub estimated_cost: Option<String>,
}

/// The normalized document handed to the front end.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDocument {
    pub itinerary: Vec<ItineraryDay>,
    pub total_estimated_cost: Option<String>,
    pub transportation: Option<TransportationPlan>,
}

/// Day dates render in the long form the front end displays, e.g.
/// "Friday, March 01, 2024".
fn serialize_display_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&date.format("%A, %B %d, %Y"))
}

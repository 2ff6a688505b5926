use serde::{Deserialize, Serialize};

/// Summary of a saved trip, as returned by the trip-data service or sent
/// inline by legacy chat clients.
///
/// Every field is optional. Absent fields are skipped when the trip is
/// rendered into prompt context; they are never filled with placeholder text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub current_location: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub travelers: Option<u32>,
    pub budget_range: Option<String>,
    pub daily_budget: Option<f64>,
}

impl TripSummary {
    pub fn is_empty(&self) -> bool {
        self.current_location.is_none()
            && self.destination.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.travelers.is_none()
            && self.budget_range.is_none()
            && self.daily_budget.is_none()
    }
}

/// A planned activity attached to a trip. Clients are loose about which of
/// `name`/`title` they send, so both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activity {
    pub name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl Activity {
    /// Display name: `name`, falling back to `title`, then a generic label.
    /// Empty strings count as absent.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.title.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("Activity")
    }
}

/// Response shape of the trip-data service: a trip summary plus its
/// activities array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripRecord {
    #[serde(flatten)]
    pub summary: TripSummary,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

use chrono::{DateTime, NaiveDate};

use crate::types::trip::{Activity, TripSummary};

/// Fixed context returned when there is no trip data at all. Downstream
/// prompt assembly assumes a non-empty context block.
pub const NO_TRIP_CONTEXT: &str = "No saved trip or activities were provided.";

/// Render an ISO-8601 date string (with or without a UTC suffix) as
/// `YYYY-MM-DD`. Anything unparseable comes back unchanged — the raw string
/// is the explicit fallback representation, never an error.
pub fn render_trip_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Some(prefix) = trimmed.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    raw.to_string()
}

/// Assemble the trip + activities context block injected into the chat
/// system prompt. Returns [`NO_TRIP_CONTEXT`] when both inputs are empty.
pub fn build_trip_context(trip: Option<&TripSummary>, activities: &[Activity]) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(trip) = trip.filter(|t| !t.is_empty()) {
        lines.push("Current trip details:".to_string());
        if let Some(from) = &trip.current_location {
            lines.push(format!("- From: {from}"));
        }
        if let Some(to) = &trip.destination {
            lines.push(format!("- To: {to}"));
        }
        if let (Some(start), Some(end)) = (&trip.start_date, &trip.end_date) {
            lines.push(format!(
                "- Dates: {} to {}",
                render_trip_date(start),
                render_trip_date(end)
            ));
        }
        if let Some(travelers) = trip.travelers {
            lines.push(format!("- Travelers: {travelers}"));
        }
        if let Some(range) = &trip.budget_range {
            lines.push(format!("- Budget range: {range}"));
        }
        if let Some(budget) = trip.daily_budget {
            lines.push(format!("- Approx daily budget: ₹{budget}"));
        }
        lines.push(String::new());
    }

    if !activities.is_empty() {
        // Missing dates sort as empty keys, placing them first. The sort is
        // stable so undated activities keep their insertion order.
        let mut sorted: Vec<&Activity> = activities.iter().collect();
        sorted.sort_by_key(|activity| activity.date.clone().unwrap_or_default());

        lines.push("Planned activities for this trip:".to_string());
        let mut current_date: Option<String> = None;
        let mut day_counter = 1;

        for activity in sorted {
            let date_text = match activity.date.as_deref() {
                Some(raw) => render_trip_date(raw),
                None => "Unknown date".to_string(),
            };

            // A day header is emitted only when the rendered date changes.
            if current_date.as_deref() != Some(date_text.as_str()) {
                lines.push(format!("\nDay {day_counter} ({date_text}):"));
                current_date = Some(date_text);
                day_counter += 1;
            }

            let mut line = format!("- {}", activity.display_name());
            if let Some(location) = activity.location.as_deref().filter(|s| !s.is_empty()) {
                line.push_str(&format!(" at {location}"));
            }
            if let Some(description) = activity.description.as_deref().filter(|s| !s.is_empty()) {
                line.push_str(&format!(" | {description}"));
            }
            lines.push(line);
        }
    }

    if lines.is_empty() {
        return NO_TRIP_CONTEXT.to_string();
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(name: &str, date: Option<&str>) -> Activity {
        Activity {
            name: Some(name.to_string()),
            date: date.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_data_returns_fixed_sentence() {
        assert_eq!(build_trip_context(None, &[]), NO_TRIP_CONTEXT);
        assert_eq!(
            build_trip_context(Some(&TripSummary::default()), &[]),
            NO_TRIP_CONTEXT
        );
    }

    #[test]
    fn test_absent_trip_fields_are_skipped() {
        let trip = TripSummary {
            destination: Some("Kerala".to_string()),
            travelers: Some(2),
            ..Default::default()
        };
        let context = build_trip_context(Some(&trip), &[]);
        assert!(context.contains("- To: Kerala"));
        assert!(context.contains("- Travelers: 2"));
        assert!(!context.contains("From:"));
        assert!(!context.contains("Dates:"));
        assert!(!context.contains("Unknown"));
    }

    #[test]
    fn test_day_counter_increments_on_date_transitions_only() {
        let activities = vec![
            activity("Beach walk", Some("2024-03-01")),
            activity("Museum", Some("2024-03-01")),
            activity("Hike", Some("2024-03-02")),
        ];
        let context = build_trip_context(None, &activities);
        assert!(context.contains("Day 1 (2024-03-01):"));
        assert!(context.contains("Day 2 (2024-03-02):"));
        assert!(!context.contains("Day 3"));
    }

    #[test]
    fn test_activity_line_separators() {
        let full = Activity {
            name: Some("Dinner".to_string()),
            location: Some("Fort Kochi".to_string()),
            description: Some("Seafood".to_string()),
            ..Default::default()
        };
        let bare = Activity {
            title: Some("Sunset".to_string()),
            ..Default::default()
        };
        let context = build_trip_context(None, &[full, bare]);
        assert!(context.contains("- Dinner at Fort Kochi | Seafood"));
        assert!(context.contains("- Sunset"));
        assert!(!context.contains("- Sunset at"));
        assert!(!context.contains("- Sunset |"));
    }

    #[test]
    fn test_undated_activities_sort_first_in_insertion_order() {
        let activities = vec![
            activity("Dated", Some("2024-03-01")),
            activity("First undated", None),
            activity("Second undated", None),
        ];
        let context = build_trip_context(None, &activities);
        let undated_header = context.find("Day 1 (Unknown date):").unwrap();
        let first = context.find("First undated").unwrap();
        let second = context.find("Second undated").unwrap();
        let dated = context.find("- Dated").unwrap();
        assert!(undated_header < first && first < second && second < dated);
    }

    #[test]
    fn test_render_trip_date_forms() {
        assert_eq!(render_trip_date("2024-03-01T00:00:00Z"), "2024-03-01");
        assert_eq!(render_trip_date("2024-03-01T10:30:00+05:30"), "2024-03-01");
        assert_eq!(render_trip_date("2024-03-01"), "2024-03-01");
        // Unparseable input falls back to the raw string unchanged.
        assert_eq!(render_trip_date("next friday"), "next friday");
        assert_eq!(render_trip_date(""), "");
    }
}

use crate::types::itinerary::ItineraryParams;

/// Base instruction for the chat path: travel topics only, short answers,
/// with a worked example of the expected reply shape.
pub const CHAT_SYSTEM_PROMPT: &str = r#"You are a helpful assistant specialized in trip planning.
Your job is to answer travel-related questions only and do not answer any other questions.
Use the user's trip details and planned activities to give personalized answers.

Guidelines:
- If you are unsure, say: "I'm not sure about that. Please try again."
- Keep responses short, simple, and clear.
- Avoid long paragraphs or unnecessary details.
- Prefer concise bullet-point or one-line answers when suggesting itineraries.
- Example:
    Instead of: "Based on your trip details, I recommend spending 7-10 days in Kerala..."
    You should reply like:
    - Day 1-2: Cochin
    - Day 3-4: Munnar
    - Day 5-6: Thekkady
    - Day 7-8: Alleppey
    - Day 9-10: Trivandrum
- Respond in a single, straightforward sentence when possible."#;

/// Strict-JSON instruction for the itinerary path. The normalizer relies on
/// the three top-level keys named here.
pub const ITINERARY_SYSTEM_PROMPT: &str = r#"You are an expert travel itinerary planner and a STRICT JSON generator.

Always respond with a single valid JSON object.
Do NOT include markdown, comments, or any text outside the JSON.
Do NOT include a top-level "trip" field.
Use only these top-level keys:
- "itinerary" (array of days)
- "totalEstimatedCost" (string)
- "transportation" (object)

All string values MUST be on a single line (no raw newlines inside strings).
Use double quotes for all keys and string values.
Do NOT add trailing commas."#;

/// Build the full chat system message: base instructions plus the rendered
/// trip context.
pub fn chat_system_message(trip_context: &str) -> String {
    format!("{CHAT_SYSTEM_PROMPT}\n\nHere is the user's current trip and activities:\n{trip_context}")
}

/// Build the itinerary user prompt. Encodes the day-count-aware structural
/// rules and the exact field names the normalizer expects back.
pub fn itinerary_user_prompt(params: &ItineraryParams, num_days: i64) -> String {
    let destination = &params.destination;
    let current_location = &params.current_location;
    let interests = if params.interests.is_empty() {
        "General travel".to_string()
    } else {
        params.interests.join(", ")
    };
    let notes = if params.additional_notes.is_empty() {
        "None"
    } else {
        params.additional_notes.as_str()
    };

    format!(
        r#"Create a detailed {num_days}-day travel itinerary for a trip from "{current_location}" to "{destination}".

Trip Details:
- Destination: {destination}
- Starting Location: {current_location}
- Start Date: {start_date}
- End Date: {end_date}
- Number of Days: {num_days}
- Number of Travelers: {travelers}
- Daily Budget: ₹{daily_budget} per person
- Budget Range: {budget_range}
- Interests: {interests}
- Additional Notes: {notes}

Itinerary requirements:

1. Day 1 (Arrival Day):
   - Include transportation from {current_location} to {destination} (train/bus/flight) depending on budget.
   - Specify departure and arrival times.
   - Include hotel check-in (type = "accommodation").
   - Plan afternoon/evening activities with specific times.
   - Include dinner time and location (type = "meal").

2. Middle Days (if any):
   - Morning activity with specific time.
   - Breakfast time and location (type = "meal").
   - Afternoon activity with time.
   - Lunch time and location (type = "meal").
   - Evening activity with time.
   - Dinner time and location (type = "meal").
   - Activities should be realistic, specific to {destination}, and match the interests and budget.

3. Last Day (Departure Day):
   - Morning activity if time permits.
   - Check-out from accommodation (type = "accommodation").
   - Transportation back to {current_location} with departure and arrival times.

You MUST return a single JSON object with exactly these top-level keys:
- "itinerary": an array of day objects
- "totalEstimatedCost": string like "₹5800"
- "transportation": an object with "toDestination" and "fromDestination"

Each item in "itinerary" must be an object with:
- "day": integer (1, 2, 3, ...)
- "date": string in "YYYY-MM-DD" format
- "activities": array of activity objects

Each activity object must have:
- "time": "HH:MM AM/PM"
- "type": one of "transportation", "activity", "meal", "accommodation"
- "title": short title on one line
- "location": specific location on one line
- "description": short description on one line (no line breaks)
- "estimatedCost": string like "₹XXX per person"
- "duration": string like "X hours"

Additional rules:
- All times must be in 12-hour format with AM/PM.
- Strings must NOT contain newline characters; keep each value on a single line.
- Do NOT include any extra top-level fields.
- Return ONLY this JSON object, nothing else."#,
        start_date = params.start_date,
        end_date = params.end_date,
        travelers = params.travelers,
        daily_budget = params.daily_budget,
        budget_range = params.budget_range,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_system_message_includes_context() {
        let message = chat_system_message("Current trip details:\n- To: Kerala");
        assert!(message.starts_with(CHAT_SYSTEM_PROMPT));
        assert!(message.contains("Here is the user's current trip and activities:"));
        assert!(message.ends_with("- To: Kerala"));
    }

    #[test]
    fn test_itinerary_prompt_defaults() {
        let params = ItineraryParams {
            destination: "Munnar".to_string(),
            current_location: "Kochi".to_string(),
            start_date: "2024-03-01".to_string(),
            end_date: "2024-03-03".to_string(),
            ..Default::default()
        };
        let prompt = itinerary_user_prompt(&params, 3);
        assert!(prompt.contains("3-day travel itinerary"));
        assert!(prompt.contains("- Interests: General travel"));
        assert!(prompt.contains("- Additional Notes: None"));
        assert!(prompt.contains("- Budget Range: midrange"));
    }

    #[test]
    fn test_itinerary_prompt_joins_interests() {
        let params = ItineraryParams {
            destination: "Munnar".to_string(),
            current_location: "Kochi".to_string(),
            start_date: "2024-03-01".to_string(),
            end_date: "2024-03-03".to_string(),
            interests: vec!["hiking".to_string(), "tea estates".to_string()],
            ..Default::default()
        };
        let prompt = itinerary_user_prompt(&params, 3);
        assert!(prompt.contains("- Interests: hiking, tea estates"));
    }
}

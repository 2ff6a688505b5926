use std::time::Duration;

use tracing::debug;

use crate::error::{ApiError, Result};
use crate::types::trip::TripRecord;

const TRIP_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the external trip-data service. Lookups are best effort:
/// callers degrade to an empty context when one fails.
#[derive(Clone, Debug)]
pub struct TripClient {
    base_url: String,
}

impl TripClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Fetch a saved trip with its activities by identifier.
    pub async fn fetch_trip(&self, trip_id: &str) -> Result<TripRecord> {
        let client = reqwest::Client::builder()
            .timeout(TRIP_LOOKUP_TIMEOUT)
            .build()
            .map_err(|err| ApiError::Internal(format!("Failed to build HTTP client: {err}")))?;

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), trip_id);
        debug!(target: "tripflow::chat", url = %url, "Fetching trip for chat context");

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::TripService(format!("request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(ApiError::TripService(format!("HTTP {}", response.status())));
        }

        response
            .json::<TripRecord>()
            .await
            .map_err(|err| ApiError::TripService(format!("invalid trip payload: {err}")))
    }
}

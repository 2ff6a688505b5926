use tracing::{info, warn};

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TRIP_API_BASE: &str = "http://127.0.0.1:3000/api/trips";

/// Process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Completion API credential. Absence disables the completion paths at
    /// request time rather than aborting startup.
    pub api_key: Option<String>,
    pub model: String,
    pub completion_base_url: String,
    pub trip_api_base: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_key = read_env("GROQ_API_KEY");
        let model = read_env("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let completion_base_url =
            read_env("GROQ_API_URL").unwrap_or_else(|| DEFAULT_COMPLETION_BASE_URL.to_string());
        let trip_api_base =
            read_env("TRIP_API_BASE").unwrap_or_else(|| DEFAULT_TRIP_API_BASE.to_string());

        match &api_key {
            Some(_) => {
                info!(model = %model, "Groq API key loaded");
            }
            None => {
                warn!("GROQ_API_KEY not found in environment variables; completion requests will be rejected");
            }
        }

        Self {
            api_key,
            model,
            completion_base_url,
            trip_api_base,
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

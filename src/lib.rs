//! tripflow: a lightweight travel-assistant backend
//!
//! This library proxies two workflows to an OpenAI-compatible completion
//! API: a bounded conversational chat session grounded in a user's saved
//! trip data, and one-shot itinerary generation whose loosely-structured
//! reply is normalized into the exact document the front end consumes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tripflow::{AppConfig, ChatRequest, ChatSession, ConversationHistory};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env();
//!     let session = ChatSession::new(&config);
//!     let mut history = ConversationHistory::new();
//!
//!     let request = ChatRequest {
//!         message: "What should I pack for Kerala?".to_string(),
//!         ..Default::default()
//!     };
//!     let reply = session.submit(&mut history, &request).await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod itinerary;
pub mod server;
pub(crate) mod services;
pub mod types;

pub use config::AppConfig;
pub use core::{
    build_trip_context, ChatRequest, ChatSession, ConversationHistory, ConversationTurn, Role,
    SessionStore, HISTORY_CAPACITY, NO_TRIP_CONTEXT,
};
pub use error::{ApiError, Result};
pub use itinerary::{normalize_itinerary, strip_code_fence, ItineraryService};
pub use server::{router, run_server, AppState};
pub use types::itinerary::{ItineraryDocument, ItineraryParams};
pub use types::trip::{Activity, TripRecord, TripSummary};

#[cfg(feature = "cli")]
pub mod cli;

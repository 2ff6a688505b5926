pub mod normalize;
pub mod request;

pub use normalize::{normalize_itinerary, strip_code_fence};
pub use request::{parse_trip_date, validate_params, ItineraryService, ValidatedItinerary};

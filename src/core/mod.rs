// Core algorithm exports
pub mod availability;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod matching;
pub mod triage;

pub use availability::{compute_available_slots, AvailabilityError, DEFAULT_SLOT_SIZE_MINUTES};
pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use filters::{is_eligible_candidate, within_search_area};
pub use matcher::{MatchResult, Matcher};
pub use matching::{score_compatibility, score_compatibility_weighted, shared_temperament};
pub use triage::{question_bank, score_triage};

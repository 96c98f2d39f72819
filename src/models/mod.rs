// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ActivityLevel, BookedInterval, BoundingBox, DayRule, DogGender, DogProfile, DogSize, GeoPoint,
    QuestionKind, ScoredMatch, ScoringWeights, TriageAnswer, TriageQuestion, TriageResponse,
    TriageResult, UrgencyLevel, WeeklySchedule,
};
pub use requests::{AvailabilityQuery, FindMatchesRequest, ScorePairRequest, TriageRequest};
pub use responses::{
    AvailableSlotsResponse, CompatibilityResponse, ErrorResponse, FindMatchesResponse,
    HealthResponse, TriageResultResponse,
};

//! TinDog Algo - scheduling, matching and triage service for the TinDog
//! pet care platform
//!
//! This library provides the platform's algorithmic core: veterinarian
//! slot availability, dog-to-dog compatibility matching, and medical
//! triage scoring. All three engines are pure functions over explicit
//! snapshots; persistence and delivery live behind the service traits.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    compute_available_slots, question_bank, score_compatibility, score_triage, Matcher,
    distance::haversine_distance,
};
pub use models::{
    BookedInterval, DayRule, DogProfile, ScoredMatch, ScoringWeights, TriageResponse,
    TriageResult, UrgencyLevel, WeeklySchedule,
};

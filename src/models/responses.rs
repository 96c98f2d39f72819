use serde::{Deserialize, Serialize};

use crate::models::domain::{ScoredMatch, TriageResult};

/// Response for the availability endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    #[serde(rename = "vetId")]
    pub vet_id: String,
    pub date: String,
    #[serde(rename = "slotSizeMinutes")]
    pub slot_size_minutes: u32,
    /// Free slot labels, `HH:MM`, ascending
    pub slots: Vec<String>,
}

/// Response for the pairwise scoring endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    #[serde(rename = "dogAId")]
    pub dog_a_id: String,
    #[serde(rename = "dogBId")]
    pub dog_b_id: String,
    pub score: u8,
    #[serde(rename = "sharedTemperament")]
    pub shared_temperament: Vec<String>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// Response for the discovery endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<ScoredMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the triage scoring endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageResultResponse {
    #[serde(rename = "assessmentId")]
    pub assessment_id: String,
    #[serde(flatten)]
    pub result: TriageResult,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::TriageResponse;

/// Query parameters for the availability endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AvailabilityQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "vet_id", rename = "vetId")]
    pub vet_id: String,
    /// Requested day, `YYYY-MM-DD`
    pub date: String,
    #[serde(alias = "slot_size", rename = "slotSize")]
    pub slot_size: Option<u32>,
}

/// Request to score a specific pair of dogs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScorePairRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "dog_a_id", rename = "dogAId")]
    pub dog_a_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "dog_b_id", rename = "dogBId")]
    pub dog_b_id: String,
}

/// Request to find ranked matches for a dog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "dog_id", rename = "dogId")]
    pub dog_id: String,
    /// Falls back to the configured `matching.default_limit` when omitted
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default)]
    #[serde(alias = "exclude_dog_ids", rename = "excludeDogIds")]
    pub exclude_dog_ids: Vec<String>,
}

/// Request to score a triage questionnaire
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TriageRequest {
    #[serde(alias = "dog_id", rename = "dogId", default)]
    pub dog_id: Option<String>,
    #[serde(default)]
    pub responses: Vec<TriageResponse>,
}

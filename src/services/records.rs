use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::distance::calculate_bounding_box;
use crate::models::{BookedInterval, DogProfile, WeeklySchedule};

/// Errors that can occur when talking to the platform record store
#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Narrow read interface the engines' callers need from the record store.
///
/// The engines themselves never query; handlers fetch one consistent
/// snapshot through this trait and pass it in.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// A veterinarian's recurring weekly schedule
    async fn get_schedule(&self, vet_id: &str) -> Result<WeeklySchedule, RecordStoreError>;

    /// Non-cancelled bookings for a veterinarian on a given day
    async fn get_booked_intervals(
        &self,
        vet_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<BookedInterval>, RecordStoreError>;

    /// A single dog profile
    async fn get_dog(&self, dog_id: &str) -> Result<DogProfile, RecordStoreError>;

    /// Active candidate dogs for the subject's discovery feed
    async fn query_match_candidates(
        &self,
        subject: &DogProfile,
        exclude_dog_ids: &[String],
    ) -> Result<Vec<DogProfile>, RecordStoreError>;
}

/// Collection slugs in the CMS
#[derive(Debug, Clone)]
pub struct PayloadCollections {
    pub veterinarians: String,
    pub bookings: String,
    pub dogs: String,
}

/// Payload CMS REST API client
///
/// Handles all communication with the platform backend including:
/// - Fetching veterinarian working hours
/// - Querying a day's bookings
/// - Fetching dog profiles and match candidates
pub struct PayloadClient {
    base_url: String,
    api_key: String,
    client: Client,
    collections: PayloadCollections,
    candidate_limit: usize,
    search_radius_km: f64,
}

impl PayloadClient {
    pub fn new(
        base_url: String,
        api_key: String,
        collections: PayloadCollections,
        candidate_limit: usize,
        search_radius_km: f64,
    ) -> Result<Self, RecordStoreError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            collections,
            candidate_limit,
            search_radius_km,
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url.trim_end_matches('/'),
            collection
        )
    }

    /// GET a collection with Payload-style `where[...]` predicates,
    /// returning the `docs` array.
    async fn fetch_docs(&self, url: &str) -> Result<Vec<Value>, RecordStoreError> {
        tracing::debug!("Querying record store: {}", url);

        let response = self
            .client
            .get(url)
            .header(
                "Authorization",
                format!("users API-Key {}", self.api_key),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecordStoreError::ApiError(format!(
                "Record store query failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        json.get("docs")
            .and_then(|d| d.as_array())
            .cloned()
            .ok_or_else(|| RecordStoreError::InvalidResponse("Missing docs array".into()))
    }
}

/// Shape of a veterinarian document, reduced to what the engine needs
#[derive(Debug, Deserialize)]
struct VetDocument {
    #[serde(rename = "workingHours", default)]
    working_hours: Vec<crate::models::DayRule>,
}

#[async_trait]
impl RecordStore for PayloadClient {
    async fn get_schedule(&self, vet_id: &str) -> Result<WeeklySchedule, RecordStoreError> {
        let url = format!(
            "{}?{}&limit=1",
            self.collection_url(&self.collections.veterinarians),
            format!("where[id][equals]={}", urlencoding::encode(vet_id)),
        );

        let docs = self.fetch_docs(&url).await?;
        let doc = docs.first().ok_or_else(|| {
            RecordStoreError::NotFound(format!("Veterinarian {} not found", vet_id))
        })?;

        let vet: VetDocument = serde_json::from_value(doc.clone()).map_err(|e| {
            RecordStoreError::InvalidResponse(format!("Failed to parse veterinarian: {}", e))
        })?;

        Ok(WeeklySchedule::new(vet.working_hours))
    }

    async fn get_booked_intervals(
        &self,
        vet_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<BookedInterval>, RecordStoreError> {
        let day_start = format!("{}T00:00:00.000Z", date);
        let day_end = format!("{}T00:00:00.000Z", date + chrono::Duration::days(1));

        let predicates = [
            format!(
                "where[veterinarian][equals]={}",
                urlencoding::encode(vet_id)
            ),
            "where[status][not_equals]=cancelled".to_string(),
            format!(
                "where[startTime][greater_than_equal]={}",
                urlencoding::encode(&day_start)
            ),
            format!(
                "where[startTime][less_than]={}",
                urlencoding::encode(&day_end)
            ),
        ];

        let url = format!(
            "{}?{}&limit=200&sort=startTime",
            self.collection_url(&self.collections.bookings),
            predicates.join("&"),
        );

        let docs = self.fetch_docs(&url).await?;

        let intervals: Vec<BookedInterval> = docs
            .iter()
            .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
            .collect();

        tracing::debug!(
            "Fetched {} booked intervals for vet {} on {}",
            intervals.len(),
            vet_id,
            date
        );

        Ok(intervals)
    }

    async fn get_dog(&self, dog_id: &str) -> Result<DogProfile, RecordStoreError> {
        let url = format!(
            "{}?{}&limit=1",
            self.collection_url(&self.collections.dogs),
            format!("where[id][equals]={}", urlencoding::encode(dog_id)),
        );

        let docs = self.fetch_docs(&url).await?;
        let doc = docs
            .first()
            .ok_or_else(|| RecordStoreError::NotFound(format!("Dog {} not found", dog_id)))?;

        serde_json::from_value(doc.clone())
            .map_err(|e| RecordStoreError::InvalidResponse(format!("Failed to parse dog: {}", e)))
    }

    async fn query_match_candidates(
        &self,
        subject: &DogProfile,
        exclude_dog_ids: &[String],
    ) -> Result<Vec<DogProfile>, RecordStoreError> {
        let mut predicates = vec![
            "where[isActive][equals]=true".to_string(),
            format!(
                "where[owner][not_equals]={}",
                urlencoding::encode(&subject.owner_id)
            ),
        ];

        // Push the bounding box down to the store when the subject has a
        // location; the in-memory pipeline re-checks it anyway.
        if let Some(location) = &subject.owner_location {
            let bbox = calculate_bounding_box(location, self.search_radius_km);
            predicates.push(format!(
                "where[ownerLocation.latitude][greater_than]={}",
                bbox.min_lat
            ));
            predicates.push(format!(
                "where[ownerLocation.latitude][less_than]={}",
                bbox.max_lat
            ));
            predicates.push(format!(
                "where[ownerLocation.longitude][greater_than]={}",
                bbox.min_lon
            ));
            predicates.push(format!(
                "where[ownerLocation.longitude][less_than]={}",
                bbox.max_lon
            ));
        }

        let url = format!(
            "{}?{}&limit={}",
            self.collection_url(&self.collections.dogs),
            predicates.join("&"),
            self.candidate_limit,
        );

        let docs = self.fetch_docs(&url).await?;

        let candidates: Vec<DogProfile> = docs
            .iter()
            .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
            .filter(|d: &DogProfile| {
                d.dog_id != subject.dog_id && !exclude_dog_ids.contains(&d.dog_id)
            })
            .collect();

        tracing::debug!(
            "Queried {} match candidates for dog {}",
            candidates.len(),
            subject.dog_id
        );

        Ok(candidates)
    }
}

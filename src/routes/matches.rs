use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::distance::haversine_distance;
use crate::core::matching::{score_compatibility_weighted, shared_temperament};
use crate::models::{
    CompatibilityResponse, DogProfile, ErrorResponse, FindMatchesRequest, FindMatchesResponse,
    ScorePairRequest,
};
use crate::routes::AppState;
use crate::services::RecordStoreError;

/// Configure match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches/score", web::post().to(score_pair))
        .route("/matches/find", web::post().to(find_matches));
}

async fn fetch_dog(state: &AppState, dog_id: &str) -> Result<DogProfile, HttpResponse> {
    match state.records.get_dog(dog_id).await {
        Ok(dog) => Ok(dog),
        Err(RecordStoreError::NotFound(message)) => {
            Err(HttpResponse::NotFound().json(ErrorResponse {
                error: "Dog not found".to_string(),
                message,
                status_code: 404,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to fetch dog {}: {}", dog_id, e);
            Err(HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch dog".to_string(),
                message: e.to_string(),
                status_code: 500,
            }))
        }
    }
}

/// Score a specific pair of dogs
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// { "dogAId": "string", "dogBId": "string" }
/// ```
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScorePairRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let dog_a = match fetch_dog(&state, &req.dog_a_id).await {
        Ok(dog) => dog,
        Err(response) => return response,
    };
    let dog_b = match fetch_dog(&state, &req.dog_b_id).await {
        Ok(dog) => dog,
        Err(response) => return response,
    };

    let as_of = state.clock.now().date_naive();
    let score = score_compatibility_weighted(&dog_a, &dog_b, as_of, &state.weights);

    let distance_km = match (&dog_a.owner_location, &dog_b.owner_location) {
        (Some(a), Some(b)) => Some(haversine_distance(a, b)),
        _ => None,
    };

    tracing::info!(
        "Scored pair {} / {}: {}",
        req.dog_a_id,
        req.dog_b_id,
        score
    );

    HttpResponse::Ok().json(CompatibilityResponse {
        dog_a_id: req.dog_a_id.clone(),
        dog_b_id: req.dog_b_id.clone(),
        score,
        shared_temperament: shared_temperament(&dog_a, &dog_b),
        distance_km,
    })
}

/// Find ranked matches for a dog
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "dogId": "string",
///   "limit": 20,
///   "excludeDogIds": ["string"]
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = req
        .limit
        .map(|l| l as usize)
        .unwrap_or(state.default_limit)
        .min(state.max_limit);

    tracing::info!("Finding matches for dog: {}, limit: {}", req.dog_id, limit);

    let subject = match fetch_dog(&state, &req.dog_id).await {
        Ok(dog) => dog,
        Err(response) => return response,
    };

    let candidates = match state
        .records
        .query_match_candidates(&subject, &req.exclude_dog_ids)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", req.dog_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Found {} candidates for {}", candidates.len(), req.dog_id);

    let as_of = state.clock.now().date_naive();
    let result =
        state
            .matcher
            .find_matches(&subject, candidates, &req.exclude_dog_ids, as_of, limit);

    tracing::info!(
        "Returning {} matches for dog {} (from {} candidates)",
        result.matches.len(),
        req.dog_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Matcher;
    use crate::models::{
        ActivityLevel, BookedInterval, DogGender, DogSize, FindMatchesResponse, GeoPoint,
        ScoringWeights, WeeklySchedule,
    };
    use crate::services::{FixedClock, NullDispatcher, RecordStore, RecordStoreError};
    use actix_web::{test, web, App};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Arc;

    struct StubStore {
        subject: DogProfile,
        candidates: Vec<DogProfile>,
    }

    #[async_trait]
    impl RecordStore for StubStore {
        async fn get_schedule(&self, vet_id: &str) -> Result<WeeklySchedule, RecordStoreError> {
            Err(RecordStoreError::NotFound(format!(
                "Veterinarian {} not found",
                vet_id
            )))
        }

        async fn get_booked_intervals(
            &self,
            _vet_id: &str,
            _date: NaiveDate,
        ) -> Result<Vec<BookedInterval>, RecordStoreError> {
            Ok(Vec::new())
        }

        async fn get_dog(&self, dog_id: &str) -> Result<DogProfile, RecordStoreError> {
            if dog_id == self.subject.dog_id {
                Ok(self.subject.clone())
            } else {
                Err(RecordStoreError::NotFound(format!(
                    "Dog {} not found",
                    dog_id
                )))
            }
        }

        async fn query_match_candidates(
            &self,
            _subject: &DogProfile,
            _exclude_dog_ids: &[String],
        ) -> Result<Vec<DogProfile>, RecordStoreError> {
            Ok(self.candidates.clone())
        }
    }

    fn dog(id: &str, owner: &str, gender: DogGender) -> DogProfile {
        DogProfile {
            dog_id: id.to_string(),
            name: format!("Dog {}", id),
            owner_id: owner.to_string(),
            size: DogSize::Medium,
            birth_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            activity_level: ActivityLevel::High,
            temperament: vec!["friendly".to_string()],
            gender,
            owner_location: Some(GeoPoint {
                latitude: 45.4642,
                longitude: 9.1900,
            }),
            is_active: true,
        }
    }

    fn app_state(default_limit: usize) -> AppState {
        let candidates = (0..10)
            .map(|i| dog(&format!("c{}", i), &format!("o{}", i), DogGender::Female))
            .collect();

        AppState {
            records: Arc::new(StubStore {
                subject: dog("subject", "owner_s", DogGender::Male),
                candidates,
            }),
            notifier: Arc::new(NullDispatcher),
            clock: Arc::new(FixedClock("2024-06-01T12:00:00Z".parse().unwrap())),
            matcher: Matcher::with_default_weights(),
            weights: ScoringWeights::default(),
            slot_size_minutes: 30,
            default_limit,
            max_limit: 100,
            emergency_contact: None,
        }
    }

    #[actix_web::test]
    async fn test_omitted_limit_uses_configured_default() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(3)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({ "dogId": "subject" }))
            .to_request();

        let resp: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.matches.len(), 3);
        assert_eq!(resp.total_candidates, 10);
    }

    #[actix_web::test]
    async fn test_explicit_limit_overrides_default() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(3)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({ "dogId": "subject", "limit": 5 }))
            .to_request();

        let resp: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.matches.len(), 5);
    }
}

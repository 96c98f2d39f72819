use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::triage::{question_bank, score_triage};
use crate::models::{ErrorResponse, TriageRequest, TriageResultResponse};
use crate::routes::AppState;

/// Configure triage routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/triage/questions", web::get().to(get_questions))
        .route("/triage/score", web::post().to(score_assessment));
}

/// The fixed question bank, for clients to render the questionnaire
///
/// GET /api/v1/triage/questions
async fn get_questions() -> impl Responder {
    HttpResponse::Ok().json(question_bank())
}

/// Score a submitted questionnaire
///
/// POST /api/v1/triage/score
///
/// Request body:
/// ```json
/// {
///   "dogId": "string",
///   "responses": [{ "questionId": "string", "answer": true }]
/// }
/// ```
async fn score_assessment(
    state: web::Data<AppState>,
    req: web::Json<TriageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let result = score_triage(&req.responses);

    tracing::info!(
        "Triage assessment scored {} ({:?}) from {} responses",
        result.score,
        result.urgency_level,
        req.responses.len()
    );

    // Critical assessments page the on-call contact; best-effort, the
    // owner still gets their result if delivery fails.
    if result.requires_emergency_services {
        if let Some(contact) = &state.emergency_contact {
            let dog = req.dog_id.as_deref().unwrap_or("unknown dog");
            let message = format!(
                "Critical triage assessment (score {}) submitted for {}",
                result.score, dog
            );
            if let Err(e) = state.notifier.dispatch(contact, &message).await {
                tracing::warn!("Failed to dispatch emergency notification: {}", e);
            }
        }
    }

    HttpResponse::Ok().json(TriageResultResponse {
        assessment_id: uuid::Uuid::new_v4().to_string(),
        result,
    })
}

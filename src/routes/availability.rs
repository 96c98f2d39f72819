use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use validator::Validate;

use crate::core::availability::compute_available_slots;
use crate::models::{AvailabilityQuery, AvailableSlotsResponse, ErrorResponse};
use crate::routes::AppState;
use crate::services::RecordStoreError;

/// Configure availability routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/availability/slots", web::get().to(get_available_slots));
}

/// Free slots for a veterinarian on a day
///
/// GET /api/v1/availability/slots?vetId={id}&date=YYYY-MM-DD[&slotSize=30]
async fn get_available_slots(
    state: web::Data<AppState>,
    query: web::Query<AvailabilityQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let date = match NaiveDate::parse_from_str(&query.date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid date".to_string(),
                message: format!("Expected YYYY-MM-DD: {}", e),
                status_code: 400,
            });
        }
    };

    let slot_size = query.slot_size.unwrap_or(state.slot_size_minutes);

    tracing::info!(
        "Computing availability for vet {} on {} ({}-minute slots)",
        query.vet_id,
        date,
        slot_size
    );

    let schedule = match state.records.get_schedule(&query.vet_id).await {
        Ok(schedule) => schedule,
        Err(RecordStoreError::NotFound(message)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Veterinarian not found".to_string(),
                message,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch schedule for {}: {}", query.vet_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch schedule".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let booked = match state
        .records
        .get_booked_intervals(&query.vet_id, date)
        .await
    {
        Ok(booked) => booked,
        Err(e) => {
            tracing::error!("Failed to fetch bookings for {}: {}", query.vet_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch bookings".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    match compute_available_slots(&schedule, &booked, date, slot_size) {
        Ok(slots) => {
            tracing::debug!(
                "Vet {} has {} free slots on {}",
                query.vet_id,
                slots.len(),
                date
            );
            HttpResponse::Ok().json(AvailableSlotsResponse {
                vet_id: query.vet_id.clone(),
                date: query.date.clone(),
                slot_size_minutes: slot_size,
                slots,
            })
        }
        // Malformed stored schedule or bad slot size: surface, don't guess
        Err(e) => HttpResponse::UnprocessableEntity().json(ErrorResponse {
            error: "Invalid schedule".to_string(),
            message: e.to_string(),
            status_code: 422,
        }),
    }
}

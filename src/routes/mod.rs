// Route exports
pub mod availability;
pub mod matches;
pub mod triage;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::Matcher;
use crate::models::{HealthResponse, ScoringWeights};
use crate::services::{Clock, NotificationDispatcher, RecordStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    pub notifier: Arc<dyn NotificationDispatcher>,
    pub clock: Arc<dyn Clock>,
    pub matcher: Matcher,
    pub weights: ScoringWeights,
    pub slot_size_minutes: u32,
    pub default_limit: usize,
    pub max_limit: usize,
    pub emergency_contact: Option<String>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(availability::configure)
            .configure(matches::configure)
            .configure(triage::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: state.clock.now(),
    })
}

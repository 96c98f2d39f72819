mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use core::{Matcher, DEFAULT_SLOT_SIZE_MINUTES};
use models::ScoringWeights;
use routes::AppState;
use services::{
    NotificationDispatcher, NullDispatcher, PayloadClient, PayloadCollections, SystemClock,
    WebhookDispatcher,
};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration (logging setup reads from it)
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging; RUST_LOG still overrides the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting TinDog Algo service...");
    info!("Configuration loaded successfully");

    // Initialize record store client (Payload CMS REST API)
    let collections = PayloadCollections {
        veterinarians: settings.collection.veterinarians,
        bookings: settings.collection.bookings,
        dogs: settings.collection.dogs,
    };

    let search_radius_km = settings.matching.search_radius_km.unwrap_or(50.0);
    let candidate_limit = settings.matching.candidate_fetch_limit.unwrap_or(200);

    let records = Arc::new(
        PayloadClient::new(
            settings.payload.endpoint,
            settings.payload.api_key,
            collections,
            candidate_limit,
            search_radius_km,
        )
        .unwrap_or_else(|e| {
            error!("Failed to initialize record store client: {}", e);
            panic!("Record store client error: {}", e);
        }),
    );

    info!("Record store client initialized");

    // Initialize notification dispatcher (optional - app works without it)
    let notifier: Arc<dyn NotificationDispatcher> = match &settings.notifications.webhook_url {
        Some(url) => match WebhookDispatcher::new(url.clone()) {
            Ok(dispatcher) => {
                info!("Webhook notification dispatcher initialized");
                Arc::new(dispatcher)
            }
            Err(e) => {
                error!("Failed to initialize webhook dispatcher ({}), notifications disabled", e);
                Arc::new(NullDispatcher)
            }
        },
        None => {
            info!("No notification webhook configured, notifications disabled");
            Arc::new(NullDispatcher)
        }
    };

    // Initialize matcher with configured weights
    let weights = ScoringWeights {
        size: settings.scoring.weights.size,
        age: settings.scoring.weights.age,
        activity: settings.scoring.weights.activity,
        temperament: settings.scoring.weights.temperament,
        distance: settings.scoring.weights.distance,
        gender: settings.scoring.weights.gender,
    };

    let min_score = settings.matching.min_score.unwrap_or(5);
    let matcher = Matcher::new(weights, search_radius_km, min_score);

    info!("Matcher initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        records,
        notifier,
        clock: Arc::new(SystemClock),
        matcher,
        weights,
        slot_size_minutes: settings
            .scheduling
            .slot_size_minutes
            .unwrap_or(DEFAULT_SLOT_SIZE_MINUTES),
        default_limit: settings.matching.default_limit.unwrap_or(20) as usize,
        max_limit: settings.matching.max_limit.unwrap_or(100) as usize,
        emergency_contact: settings.notifications.emergency_contact,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use validator::Validate;

use crate::core::Recommender;
use crate::models::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse, StudentProfile, UploadResponse};
use crate::services::{FirebaseClient, GeminiClient};
use std::sync::Arc;

/// Schools serialized into the chatbot context, at most. Bounds the prompt
/// on stores far larger than the feature realistically serves.
const CHAT_CONTEXT_LIMIT: usize = 50;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FirebaseClient>,
    pub assistant: Arc<GeminiClient>,
    pub recommender: Recommender,
    pub upload_max_bytes: usize,
}

/// Configure all school-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/schools", web::get().to(list_schools))
        .route("/recommend", web::post().to(recommend))
        .route("/chatbot/ask", web::post().to(ask_assistant))
        .route("/upload", web::post().to(upload_file));
}

/// Liveness probe
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Full unfiltered school collection
///
/// GET /api/schools
async fn list_schools(state: web::Data<AppState>) -> impl Responder {
    match state.store.fetch_all_schools().await {
        Ok(schools) => HttpResponse::Ok().json(schools),
        Err(e) => {
            tracing::error!("Failed to fetch schools: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch schools".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Score and rank schools for a profile
///
/// POST /api/recommend
///
/// Request body: a preference profile, all fields optional:
/// ```json
/// {
///   "class": 10,
///   "location": "delhi",
///   "type": "public",
///   "maxDistance": 10,
///   "fee": "free",
///   "middayMeal": true,
///   "girlChild": true
/// }
/// ```
///
/// Response: schools scoring at or above the threshold, best first.
async fn recommend(
    state: web::Data<AppState>,
    profile: web::Json<StudentProfile>,
) -> impl Responder {
    let schools = match state.store.fetch_all_schools().await {
        Ok(schools) => schools,
        Err(e) => {
            tracing::error!("Failed to fetch schools for recommendation: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch schools".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let result = state.recommender.recommend(&profile, schools);

    tracing::info!(
        "Returning {} recommendations (from {} schools)",
        result.schools.len(),
        result.total_considered
    );

    HttpResponse::Ok().json(result.schools)
}

/// Ask the assistant a free-text question about the schools
///
/// POST /api/chatbot/ask
///
/// Request body:
/// ```json
/// { "query": "Which schools near me are free?", "language": "Hindi" }
/// ```
async fn ask_assistant(
    state: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let schools = match state.store.fetch_all_schools().await {
        Ok(schools) => schools,
        Err(e) => {
            tracing::error!("Failed to fetch schools for chatbot: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch schools".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let context_slice = &schools[..schools.len().min(CHAT_CONTEXT_LIMIT)];
    let context = match serde_json::to_string(context_slice) {
        Ok(context) => context,
        Err(e) => {
            tracing::error!("Failed to serialize school context: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to build context".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    match state.assistant.complete(&context, &req.query, &req.language).await {
        Ok(reply) => HttpResponse::Ok().json(ChatResponse { reply }),
        Err(e) => {
            tracing::error!("Assistant request failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Assistant request failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Accept a single uploaded file
///
/// POST /api/upload
///
/// One multipart file field, capped at the configured size (10 MiB by
/// default). Storage is delegated to the media backend; the service
/// validates the payload and acknowledges receipt.
async fn upload_file(state: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    let mut field = match payload.try_next().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing file".to_string(),
                message: "Request must contain one file field".to_string(),
                status_code: 400,
            });
        }
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid multipart payload".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or("upload")
        .to_string();

    let mut size_bytes: usize = 0;
    loop {
        match field.try_next().await {
            Ok(Some(chunk)) => {
                size_bytes += chunk.len();
                if size_bytes > state.upload_max_bytes {
                    tracing::info!("Rejected upload '{}': exceeds {} bytes", file_name, state.upload_max_bytes);
                    return HttpResponse::PayloadTooLarge().json(ErrorResponse {
                        error: "File too large".to_string(),
                        message: format!("File exceeds the {} byte limit", state.upload_max_bytes),
                        status_code: 413,
                    });
                }
            }
            Ok(None) => break,
            Err(e) => {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid multipart payload".to_string(),
                    message: e.to_string(),
                    status_code: 400,
                });
            }
        }
    }

    tracing::info!("Accepted upload '{}' ({} bytes)", file_name, size_bytes);

    HttpResponse::Ok().json(UploadResponse {
        success: true,
        file_id: uuid::Uuid::new_v4().to_string(),
        file_name,
        size_bytes,
    })
}

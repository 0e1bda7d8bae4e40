//! Health check endpoint

use actix_web::HttpResponse;
use chrono::Utc;
use serde_json::json;

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "turnkey-api",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

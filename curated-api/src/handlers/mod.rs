pub mod community;
pub mod gallery;
pub mod proxy;

use actix_web::{web, HttpResponse, Responder};

use crate::state::AppState;

pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "projectsApi": if state.proxy.is_configured() { "configured" } else { "missing" },
    }))
}

/// Every route the server exposes. The proxy is also mounted under the
/// serverless functions path so existing frontends keep working.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/projects", web::route().to(proxy::projects))
        .route("/.netlify/functions/projects", web::route().to(proxy::projects))
        .route("/api/gallery", web::get().to(gallery::get_gallery))
        .route("/api/gallery/reload", web::post().to(gallery::reload))
        .route("/api/gallery/submit", web::post().to(gallery::submit))
        .route("/api/gallery/{id}", web::get().to(gallery::get_project))
        .route("/api/community", web::get().to(community::get_community));
}

use actix_web::{http::StatusCode, web, HttpResponse, Result as ActixResult};
use shared_types::{CatalogError, ErrorResponse};

use crate::state::AppState;

pub async fn get_community(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    match state.community.fetch().await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            tracing::warn!("Community feed unavailable: {}", e);
            let status = match e {
                CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_GATEWAY,
            };
            Ok(HttpResponse::build(status).json(ErrorResponse {
                error: e.to_string(),
            }))
        }
    }
}

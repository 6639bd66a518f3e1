use actix_web::{http::StatusCode, web, HttpResponse, Result as ActixResult};
use curated_catalog::{CatalogFilter, GalleryView, SubmissionForm};
use serde::Deserialize;
use shared_types::{
    CatalogError, CategoryFilter, ErrorResponse, SubmitProjectResponse, ValidationErrorResponse,
};
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

fn gallery(state: &AppState) -> ActixResult<&Arc<GalleryView>> {
    state
        .gallery
        .as_ref()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Missing PROJECTS_API_URL"))
}

pub async fn get_gallery(
    state: web::Data<AppState>,
    query: web::Query<GalleryQuery>,
) -> ActixResult<HttpResponse> {
    let view = gallery(&state)?;
    let GalleryQuery { category, q } = query.into_inner();

    let category = match category.as_deref() {
        Some(raw) => CategoryFilter::parse(raw).ok_or_else(|| {
            actix_web::error::ErrorBadRequest(format!("Unknown category: {}", raw))
        })?,
        None => CategoryFilter::All,
    };

    let filter = CatalogFilter::new(category, q.unwrap_or_default());
    Ok(HttpResponse::Ok().json(view.render_filtered(&filter)))
}

pub async fn get_project(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let view = gallery(&state)?;
    let id = path.into_inner();

    let card = view
        .open(&id)
        .ok_or_else(|| actix_web::error::ErrorNotFound(format!("Project {} not found", id)))?;

    Ok(HttpResponse::Ok().json(card))
}

pub async fn reload(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let view = gallery(&state)?;
    Ok(HttpResponse::Ok().json(view.reload().await))
}

pub async fn submit(
    state: web::Data<AppState>,
    form: web::Json<SubmissionForm>,
) -> ActixResult<HttpResponse> {
    let view = gallery(&state)?;

    match view.submit(&form.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Created().json(SubmitProjectResponse { ok: true, page })),
        Err(CatalogError::Validation(errors)) => Ok(HttpResponse::UnprocessableEntity()
            .json(ValidationErrorResponse { ok: false, errors })),
        Err(e) => {
            tracing::warn!("Project submission failed: {}", e);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::proxy::ProjectsProxy;
    use crate::state::AppState;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use curated_catalog::{CommunityFeed, ProjectSource, TracingEmbedRenderer};
    use shared_types::{Category, GalleryPage, Project, ProjectDraft};
    use std::sync::Mutex;

    struct MemorySource {
        projects: Mutex<Vec<Project>>,
        reject: bool,
    }

    #[async_trait]
    impl ProjectSource for MemorySource {
        async fn fetch_all(&self) -> Result<Vec<Project>, CatalogError> {
            Ok(self.projects.lock().unwrap().clone())
        }

        async fn submit(&self, draft: &ProjectDraft) -> Result<(), CatalogError> {
            if self.reject {
                return Err(CatalogError::transport(Some(500), "Sheet is read-only"));
            }
            let mut projects = self.projects.lock().unwrap();
            let id = format!("p{}", projects.len() + 1);
            projects.insert(0, Project::from_draft(id, draft.clone()));
            Ok(())
        }
    }

    fn state(reject: bool) -> AppState {
        let source = Arc::new(MemorySource {
            projects: Mutex::new(vec![Project::from_draft(
                "p1",
                ProjectDraft {
                    title: "Urban Garden".to_string(),
                    description: "Rooftop planting".to_string(),
                    category: Category::Landscape,
                    ..Default::default()
                },
            )]),
            reject,
        });
        let embeds = Arc::new(TracingEmbedRenderer::new());
        AppState {
            proxy: Arc::new(ProjectsProxy::new(None)),
            gallery: Some(AppState::gallery_for(source, embeds.clone())),
            community: Arc::new(CommunityFeed::new(None, None, embeds)),
        }
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .route("/api/gallery", web::get().to(get_gallery))
                    .route("/api/gallery/reload", web::post().to(reload))
                    .route("/api/gallery/submit", web::post().to(submit))
                    .route("/api/gallery/{id}", web::get().to(get_project)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_reload_and_filter() {
        let app = app!(state(false));

        let req = test::TestRequest::post().uri("/api/gallery/reload").to_request();
        let page: GalleryPage = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page.cards.len(), 1);
        assert_eq!(page.cards[0].project.title, "Urban Garden");

        let req = test::TestRequest::get()
            .uri("/api/gallery?category=architecture")
            .to_request();
        let page: GalleryPage = test::call_and_read_body_json(&app, req).await;
        assert!(page.cards.is_empty());
        assert!(page.empty);

        let req = test::TestRequest::get().uri("/api/gallery?category=villas").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_project_detail() {
        let app = app!(state(false));
        test::call_service(&app, test::TestRequest::post().uri("/api/gallery/reload").to_request()).await;

        let req = test::TestRequest::get().uri("/api/gallery/p1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/gallery/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_submit_invalid_form() {
        let app = app!(state(false));

        let req = test::TestRequest::post()
            .uri("/api/gallery/submit")
            .set_json(serde_json::json!({"title": "Villa", "imageUrl": "villa.jpg"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: ValidationErrorResponse = test::read_body_json(resp).await;
        assert!(!body.ok);
        let fields: Vec<_> = body.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["description", "imageUrl"]);
    }

    #[actix_web::test]
    async fn test_submit_accepted() {
        let app = app!(state(false));

        let req = test::TestRequest::post()
            .uri("/api/gallery/submit")
            .set_json(serde_json::json!({
                "title": "Harbour Steps",
                "description": "Terraced public space",
                "category": "landscape"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: SubmitProjectResponse = test::read_body_json(resp).await;
        assert!(body.ok);
        assert_eq!(body.page.cards[0].project.title, "Harbour Steps");
        assert_eq!(body.page.cards.len(), 2);
    }

    #[actix_web::test]
    async fn test_submit_rejected_upstream() {
        let app = app!(state(true));

        let req = test::TestRequest::post()
            .uri("/api/gallery/submit")
            .set_json(serde_json::json!({
                "title": "Harbour Steps",
                "description": "Terraced public space"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Sheet is read-only");
    }

    #[actix_web::test]
    async fn test_gallery_disabled_without_upstream() {
        let state = AppState {
            gallery: None,
            ..state(false)
        };
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/gallery").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

use actix_web::http::{header, Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use reqwest::Client;
use shared_types::ProxyErrorResponse;
use std::sync::Arc;

/// Same-origin relay to the projects web app, so browsers never call the
/// upstream directly
pub struct ProjectsProxy {
    client: Client,
    upstream: Option<String>,
}

impl ProjectsProxy {
    pub fn new(upstream: Option<String>) -> Self {
        Self {
            client: Client::new(),
            upstream: upstream.filter(|u| !u.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.upstream.is_some()
    }

    async fn forward(&self, upstream: &str, method: &Method, body: web::Bytes) -> Result<(u16, String), reqwest::Error> {
        let request = if method == Method::POST {
            let body = if body.is_empty() {
                web::Bytes::from_static(b"{}")
            } else {
                body
            };
            self.client
                .post(upstream)
                .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
                .body(body.to_vec())
        } else {
            self.client.get(upstream)
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok((status, text))
    }
}

/// GET lists projects, POST adds one. Upstream status and body pass through
/// unchanged.
pub async fn projects(
    proxy: web::Data<Arc<ProjectsProxy>>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let upstream = match proxy.upstream.as_deref() {
        Some(upstream) => upstream,
        None => {
            tracing::error!("Projects proxy called without PROJECTS_API_URL");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ProxyErrorResponse::new("Missing PROJECTS_API_URL"),
            );
        }
    };

    let method = req.method();
    if method != Method::GET && method != Method::POST {
        return error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            ProxyErrorResponse::new("Method not allowed"),
        );
    }

    match proxy.forward(upstream, method, body).await {
        Ok((status, text)) => {
            tracing::debug!("Proxied {} to projects upstream: {}", method, status);
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status)
                .insert_header((header::CONTENT_TYPE, "application/json"))
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .body(text)
        }
        Err(e) => {
            tracing::warn!("Projects proxy fetch failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ProxyErrorResponse::new("Proxy fetch failed").with_detail(e.to_string()),
            )
        }
    }
}

fn error_response(status: StatusCode, body: ProxyErrorResponse) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .json(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App, HttpServer};

    fn app_with(proxy: ProjectsProxy) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::new(proxy)))
            .route("/api/projects", web::route().to(projects))
    }

    #[actix_web::test]
    async fn test_missing_upstream() {
        let app = test::init_service(app_with(ProjectsProxy::new(Some("  ".to_string())))).await;

        let req = test::TestRequest::get().uri("/api/projects").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"ok": false, "error": "Missing PROJECTS_API_URL"}));
    }

    #[actix_web::test]
    async fn test_method_not_allowed() {
        let proxy = ProjectsProxy::new(Some("http://127.0.0.1:9/exec".to_string()));
        let app = test::init_service(app_with(proxy)).await;

        let req = test::TestRequest::put().uri("/api/projects").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"ok": false, "error": "Method not allowed"}));
    }

    #[actix_web::test]
    async fn test_unreachable_upstream() {
        let proxy = ProjectsProxy::new(Some("http://127.0.0.1:9/exec".to_string()));
        let app = test::init_service(app_with(proxy)).await;

        let req = test::TestRequest::get().uri("/api/projects").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Proxy fetch failed");
        assert!(body["detail"].as_str().is_some());
    }

    async fn echo(req: HttpRequest, body: web::Bytes) -> HttpResponse {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        HttpResponse::Created().body(format!(
            "{{\"method\":\"{}\",\"contentType\":\"{}\",\"body\":{}}}",
            req.method(),
            content_type,
            String::from_utf8_lossy(&body)
        ))
    }

    #[actix_web::test]
    async fn test_forwards_verbatim() {
        let server = HttpServer::new(|| App::new().route("/exec", web::route().to(echo)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        let handle = server.run();
        let server_handle = handle.handle();
        actix_web::rt::spawn(handle);

        let proxy = ProjectsProxy::new(Some(format!("http://{}/exec", addr)));
        let app = test::init_service(app_with(proxy)).await;

        let req = test::TestRequest::post().uri("/api/projects").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/json");

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["method"], "POST");
        assert_eq!(body["contentType"], "text/plain;charset=utf-8");
        assert_eq!(body["body"], serde_json::json!({}));

        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_payload(r#"{"title":"Villa"}"#)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["body"]["title"], "Villa");

        server_handle.stop(false).await;
    }
}

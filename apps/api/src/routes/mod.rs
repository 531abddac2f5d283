pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Skill catalog API
        .route("/api/v1/skills/catalog", get(handlers::handle_get_catalog))
        .route("/api/v1/skills/derive", post(handlers::handle_derive))
        // Analysis API
        .route("/api/v1/analyze/text", post(handlers::handle_analyze_text))
        .route("/api/v1/analyze", post(handlers::handle_analyze_upload))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::catalog::SkillCatalog;
    use crate::analysis::normalizer::LexicalNormalizer;
    use crate::analysis::pipeline::SkillAnalyzer;
    use crate::config::Config;
    use crate::extraction::{DocumentOrigin, ExtractionError, TextExtractor};

    /// Treats uploads as UTF-8 text; the literal body "broken" fails extraction.
    struct StubExtractor;

    #[async_trait]
    impl TextExtractor for StubExtractor {
        async fn extract(
            &self,
            _origin: DocumentOrigin,
            bytes: Bytes,
        ) -> Result<String, ExtractionError> {
            if bytes.as_ref() == b"broken" {
                return Err(ExtractionError::Pdf("corrupt xref table".to_string()));
            }
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }

    fn test_state() -> AppState {
        let catalog = SkillCatalog::default_catalog();
        let fallback = SkillCatalog::common_skills();
        let normalizer = LexicalNormalizer::for_catalogs(&[&catalog, &fallback]);
        AppState {
            config: Config::default(),
            analyzer: Arc::new(SkillAnalyzer::new(Arc::new(normalizer), catalog, fallback)),
            extractor: Arc::new(StubExtractor),
        }
    }

    const BOUNDARY: &str = "skill-analyzer-test-boundary";

    fn multipart_body(fields: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, filename, value) in fields {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/pdf\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(fields: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        Request::post("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_catalog_lists_terms_in_order() {
        let (status, body) =
            send(Request::get("/api/v1/skills/catalog").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"][0], "python");
        assert_eq!(body["fallback"][7], "machine learning");
    }

    #[tokio::test]
    async fn test_derive_falls_back_for_unknown_skills() {
        let (status, body) = send(json_request(
            "/api/v1/skills/derive",
            json!({"jd_text": "Friendly barista wanted"}),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["required"].as_array().unwrap().len(), 15);
        assert_eq!(body["warnings"][0]["code"], "fallback_requirements");
    }

    #[tokio::test]
    async fn test_analyze_text_against_job_description() {
        let (status, body) = send(json_request(
            "/api/v1/analyze/text",
            json!({
                "resume_text": "Python developer with SQL and Docker experience.",
                "jd_text": "Looking for Python, SQL, Docker and Kubernetes skills."
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "job_description");
        assert_eq!(body["required_source"], "job_description");
        assert_eq!(body["matched"], json!(["python", "sql", "docker"]));
        assert_eq!(body["missing"], json!(["kubernetes"]));
        assert_eq!(body["score"], 75.0);
        assert_eq!(body["band"], "fair");
        assert_eq!(body["matched_count"], 3);
        assert_eq!(body["required_count"], 4);
    }

    #[tokio::test]
    async fn test_analyze_text_common_skills_mode() {
        let (status, body) = send(json_request(
            "/api/v1/analyze/text",
            json!({
                "resume_text": "Python",
                "jd_text": "Kubernetes",
                "mode": "common_skills"
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["required_source"], "fallback");
        assert_eq!(body["score"], 6.7);
        assert_eq!(body["tokens"], json!(["python"]));
        assert_eq!(body["token_count"], 1);
        assert_eq!(body["band"], "weak");
        assert!(body["guidance"].as_str().unwrap().starts_with("Low match"));
    }

    #[tokio::test]
    async fn test_upload_analysis() {
        let (status, body) = send(multipart_request(&[
            ("resume", Some("resume.pdf"), "Rust and Docker on Linux"),
            ("jd_text", None, "Rust, Docker, Linux"),
        ]))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 100.0);
        assert_eq!(body["band"], "strong");
        assert_eq!(body["resume_preview"], "Rust and Docker on Linux");
    }

    #[tokio::test]
    async fn test_upload_with_unreadable_jd_file_warns() {
        let (status, body) = send(multipart_request(&[
            ("resume", Some("resume.pdf"), "SQL analyst"),
            ("jd_text", None, "SQL"),
            ("jd_file", Some("jd.pdf"), "broken"),
        ]))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["required"], json!(["sql"]));
        assert_eq!(body["warnings"][0]["code"], "job_description_extraction_failed");
    }

    #[tokio::test]
    async fn test_upload_with_unreadable_resume_is_rejected() {
        let (status, body) = send(multipart_request(&[(
            "resume",
            Some("resume.pdf"),
            "broken",
        )]))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "RESUME_EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_upload_without_resume_is_rejected() {
        let (status, body) = send(multipart_request(&[("jd_text", None, "SQL")])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_with_bad_mode_is_rejected() {
        let (status, _) = send(multipart_request(&[
            ("resume", Some("resume.pdf"), "SQL"),
            ("mode", None, "everything"),
        ]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

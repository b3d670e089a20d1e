//! HTTP API tests
//!
//! Runs the router against in-memory stores through `axum-test`.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_warranty::{
    ClaimStorePort, InMemoryClaimStore, InMemoryServiceRequestStore, ServiceRequestPort,
};
use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::{FailingClaimStore, PayloadFixtures, MIB, STORE_FAILURE_MESSAGE};

struct TestApp {
    server: TestServer,
    token: String,
}

fn build_app(claim_store: Arc<dyn ClaimStorePort>) -> TestApp {
    let config = ApiConfig::default();
    let token = create_token(
        "vendor-42",
        vec!["vendor".to_string()],
        &config.jwt_secret,
        config.jwt_expiration_secs,
    )
    .unwrap();
    let request_store: Arc<dyn ServiceRequestPort> = Arc::new(InMemoryServiceRequestStore::new());
    let router = create_router(AppState::new(claim_store, request_store, config));

    TestApp {
        server: TestServer::new(router).unwrap(),
        token,
    }
}

fn app() -> TestApp {
    build_app(Arc::new(InMemoryClaimStore::new()))
}

impl TestApp {
    async fn save_draft(&self, payload: Value) -> Value {
        let response = self
            .server
            .post("/api/v1/warranty/draft")
            .authorization_bearer(&self.token)
            .json(&payload)
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }
}

fn hsrp_form(document: Option<Part>) -> MultipartForm {
    let mut form = MultipartForm::new();
    if let Value::Object(fields) = PayloadFixtures::hsrp_request() {
        for (name, value) in fields {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            form = form.add_text(name, text);
        }
    }
    match document {
        Some(part) => form.add_part("document", part),
        None => form,
    }
}

fn document(size: usize, file_name: &str, mime: &str) -> Part {
    Part::bytes(vec![0u8; size]).file_name(file_name).mime_type(mime)
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = app();

        let response = app.server.get("/api/v1/warranty/drafts").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_bad_token_is_unauthorized() {
        let app = app();

        let response = app
            .server
            .get("/api/v1/warranty/drafts")
            .authorization_bearer("not-a-jwt")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = app();

        app.server.get("/health").await.assert_status_ok();
        let ready = app.server.get("/health/ready").await;
        ready.assert_status_ok();
        assert_eq!(ready.json::<Value>()["status"], "ready");
    }
}

mod drafts {
    use super::*;

    #[tokio::test]
    async fn test_save_draft_returns_created_envelope() {
        let app = app();

        let response = app
            .server
            .post("/api/v1/warranty/draft")
            .authorization_bearer(&app.token)
            .json(&PayloadFixtures::warranty_draft())
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Draft saved successfully");
        assert_eq!(body["data"]["isDraft"], true);
        assert_eq!(body["data"]["status"], "Draft");
        assert_eq!(body["data"]["vehicleNumber"], "MH02AB1234");
        assert!(body["data"]["draftSavedAt"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_draft_lists_violations() {
        let app = app();

        let response = app
            .server
            .post("/api/v1/warranty/draft")
            .authorization_bearer(&app.token)
            .json(&json!({ "vehicleNumber": "ABC", "customerPhone": "123" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Validation failed");
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"vehicleNumber"));
        assert!(fields.contains(&"customerPhone"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app();

        let response = app
            .server
            .post("/api/v1/warranty/draft")
            .authorization_bearer(&app.token)
            .content_type("application/json")
            .bytes("{ not json".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["success"], false);
    }

    #[tokio::test]
    async fn test_list_drafts_newest_first() {
        let app = app();
        let first = app.save_draft(json!({ "description": "first" })).await;
        let second = app.save_draft(json!({ "description": "second" })).await;
        let published = app.save_draft(json!({ "description": "published" })).await;
        app.server
            .put(&format!("/api/v1/warranty/{}/publish", published["id"].as_str().unwrap()))
            .authorization_bearer(&app.token)
            .await
            .assert_status_ok();

        let response = app
            .server
            .get("/api/v1/warranty/drafts")
            .authorization_bearer(&app.token)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["id"], second["id"]);
        assert_eq!(body["data"][1]["id"], first["id"]);
    }
}

mod publish {
    use super::*;

    #[tokio::test]
    async fn test_publish_moves_draft_to_pending() {
        let app = app();
        let draft = app.save_draft(PayloadFixtures::warranty_draft()).await;
        let id = draft["id"].as_str().unwrap();

        let response = app
            .server
            .put(&format!("/api/v1/warranty/{}/publish", id))
            .authorization_bearer(&app.token)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["message"], "Draft published successfully");
        assert_eq!(body["data"]["isDraft"], false);
        assert_eq!(body["data"]["status"], "Pending");
        assert!(body["data"]["submittedDate"].is_string());

        let fetched = app
            .server
            .get(&format!("/api/v1/warranty/{}", id))
            .authorization_bearer(&app.token)
            .await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>()["data"]["status"], "Pending");
    }

    #[tokio::test]
    async fn test_publish_twice_is_rejected() {
        let app = app();
        let draft = app.save_draft(PayloadFixtures::warranty_draft()).await;
        let path = format!("/api/v1/warranty/{}/publish", draft["id"].as_str().unwrap());
        app.server
            .put(&path)
            .authorization_bearer(&app.token)
            .await
            .assert_status_ok();

        let response = app.server.put(&path).authorization_bearer(&app.token).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "This is not a draft");
    }

    #[tokio::test]
    async fn test_unknown_or_garbled_id_is_not_found() {
        let app = app();

        for id in ["0191d9d0-0000-7000-8000-000000000000", "not-an-id"] {
            let response = app
                .server
                .put(&format!("/api/v1/warranty/{}/publish", id))
                .authorization_bearer(&app.token)
                .await;

            response.assert_status(StatusCode::NOT_FOUND);
            assert_eq!(response.json::<Value>()["error"], "Draft not found");
        }
    }
}

mod submission {
    use super::*;

    #[tokio::test]
    async fn test_direct_submission_is_pending() {
        let app = app();

        let response = app
            .server
            .post("/api/v1/warranty")
            .authorization_bearer(&app.token)
            .json(&PayloadFixtures::warranty_submission())
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["data"]["status"], "Pending");
        assert_eq!(body["data"]["isDraft"], false);
    }

    #[tokio::test]
    async fn test_missing_claim_is_not_found() {
        let app = app();

        let response = app
            .server
            .get("/api/v1/warranty/0191d9d0-0000-7000-8000-000000000000")
            .authorization_bearer(&app.token)
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "Claim not found");
    }
}

mod uploads {
    use super::*;

    #[tokio::test]
    async fn test_oversized_document_is_rejected() {
        let app = app();

        let response = app
            .server
            .post("/api/v1/hsrp/requests")
            .authorization_bearer(&app.token)
            .multipart(hsrp_form(Some(document(6 * MIB as usize, "scan.pdf", "application/pdf"))))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "File size exceeds 5MB limit");
    }

    #[tokio::test]
    async fn test_text_document_is_rejected() {
        let app = app();

        let response = app
            .server
            .post("/api/v1/hsrp/requests")
            .authorization_bearer(&app.token)
            .multipart(hsrp_form(Some(document(128, "notes.txt", "text/plain"))))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Invalid file type. Only PDF, JPEG, PNG, DOC and DOCX files are allowed"
        );
    }

    #[tokio::test]
    async fn test_missing_document_is_rejected() {
        let app = app();

        let response = app
            .server
            .post("/api/v1/hsrp/requests")
            .authorization_bearer(&app.token)
            .multipart(hsrp_form(None))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "No file uploaded");
    }

    #[tokio::test]
    async fn test_pdf_is_accepted_and_listed() {
        let app = app();

        let response = app
            .server
            .post("/api/v1/hsrp/requests")
            .authorization_bearer(&app.token)
            .multipart(hsrp_form(Some(document(MIB as usize, "rc.pdf", "application/pdf"))))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["data"]["kind"], "hsrp");
        assert_eq!(body["data"]["attachment"]["fileName"], "rc.pdf");
        assert_eq!(body["data"]["attachment"]["sizeBytes"], MIB);

        let listed = app
            .server
            .get("/api/v1/service-requests")
            .add_query_param("kind", "hsrp")
            .authorization_bearer(&app.token)
            .await;
        listed.assert_status_ok();
        assert_eq!(listed.json::<Value>()["count"], 1);
    }

    #[tokio::test]
    async fn test_die_plan_is_json() {
        let app = app();

        let response = app
            .server
            .post("/api/v1/die-plans")
            .authorization_bearer(&app.token)
            .json(&PayloadFixtures::die_plan())
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["data"]["kind"], "die_plan");
    }

    #[tokio::test]
    async fn test_unknown_kind_filter_is_bad_request() {
        let app = app();

        let response = app
            .server
            .get("/api/v1/service-requests")
            .add_query_param("kind", "warranty")
            .authorization_bearer(&app.token)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Unknown service request kind: warranty");
    }

    #[tokio::test]
    async fn test_non_multipart_body_gets_error_envelope() {
        let app = app();

        let response = app
            .server
            .post("/api/v1/hsrp/requests")
            .authorization_bearer(&app.token)
            .json(&json!({ "vehicleNumber": "MH02AB1234" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().is_some_and(|e| e.contains("boundary")));
        assert!(body.get("errors").is_none());
    }
}

mod store_failure {
    use super::*;

    #[tokio::test]
    async fn test_failing_store_is_server_error() {
        let app = build_app(Arc::new(FailingClaimStore));

        let response = app
            .server
            .post("/api/v1/warranty/draft")
            .authorization_bearer(&app.token)
            .json(&PayloadFixtures::warranty_draft())
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains(STORE_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_readiness_reports_unhealthy_store() {
        let app = build_app(Arc::new(FailingClaimStore));

        let response = app.server.get("/health/ready").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<Value>()["status"], "unavailable");
    }
}

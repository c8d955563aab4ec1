//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Registration and enumeration
        .route("/api/v1/names", post(handlers::register))
        .route("/api/v1/names", get(handlers::list_names))
        // Per-name reads
        .route("/api/v1/names/:name", get(handlers::get_entry))
        .route("/api/v1/names/:name/owner", get(handlers::get_owner))
        .route("/api/v1/names/:name/record", get(handlers::get_record))
        // Record mutation (owner only)
        .route("/api/v1/names/:name/record", put(handlers::set_record))
        // Pricing
        .route("/api/v1/names/:name/quote", get(handlers::get_quote))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::state::ApiConfig;
    use wyrm_core::constants::{FEE_BASE, FEE_PREMIUM};

    const ALICE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const BOB: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn test_app() -> Router {
        let state = Arc::new(AppState::new(ApiConfig::default()));
        create_router(state)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn put_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn register_body(name: &str, owner: &str, payment: u128) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "owner": owner,
            "payment": payment.to_string(),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app().oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_and_resolve() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/names",
                register_body("abc", ALICE, FEE_PREMIUM),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let entry = body_json(response).await;
        assert_eq!(entry["name"], "abc");
        assert_eq!(entry["owner"], ALICE);
        assert_eq!(entry["record"], "");

        let response = app
            .oneshot(get_req("/api/v1/names/abc/owner"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["owner"], ALICE);
    }

    #[tokio::test]
    async fn test_register_underpayment_is_402() {
        let response = test_app()
            .oneshot(post_json(
                "/api/v1/names",
                register_body("abc", ALICE, FEE_PREMIUM - 1),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INSUFFICIENT_PAYMENT");
    }

    #[tokio::test]
    async fn test_register_duplicate_is_409() {
        let app = test_app();

        app.clone()
            .oneshot(post_json(
                "/api/v1/names",
                register_body("abc", ALICE, FEE_PREMIUM),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(post_json(
                "/api/v1/names",
                register_body("abc", BOB, FEE_PREMIUM),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_invalid_name_is_400() {
        let response = test_app()
            .oneshot(post_json(
                "/api/v1/names",
                register_body("", ALICE, FEE_PREMIUM),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_bad_address_is_400() {
        let response = test_app()
            .oneshot(post_json(
                "/api/v1/names",
                register_body("abc", "0x1234", FEE_PREMIUM),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_name_is_404() {
        let response = test_app()
            .oneshot(get_req("/api/v1/names/ghost/owner"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_set_record_requires_ownership() {
        let app = test_app();

        app.clone()
            .oneshot(post_json(
                "/api/v1/names",
                register_body("abc", ALICE, FEE_PREMIUM),
            ))
            .await
            .unwrap();

        // Bob cannot write Alice's record
        let response = app
            .clone()
            .oneshot(put_json(
                "/api/v1/names/abc/record",
                serde_json::json!({ "caller": BOB, "record": "hijacked" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Alice can
        let response = app
            .clone()
            .oneshot(put_json(
                "/api/v1/names/abc/record",
                serde_json::json!({ "caller": ALICE, "record": "hello" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(get_req("/api/v1/names/abc/record"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["record"], "hello");
    }

    #[tokio::test]
    async fn test_list_preserves_registration_order() {
        let app = test_app();

        for name in ["abc", "defg", "hijkl"] {
            app.clone()
                .oneshot(post_json(
                    "/api/v1/names",
                    register_body(name, ALICE, FEE_PREMIUM),
                ))
                .await
                .unwrap();
        }

        let response = app.oneshot(get_req("/api/v1/names")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["count"], 3);
        let names: Vec<&str> = body["names"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["abc", "defg", "hijkl"]);
    }

    #[tokio::test]
    async fn test_quote_endpoint() {
        let response = test_app()
            .oneshot(get_req("/api/v1/names/hijkl/quote"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["tier"], "base");
        assert_eq!(body["required_fee"], FEE_BASE.to_string());
    }
}

//! # till-api: HTTP Server for Till Checkout
//!
//! Exposes the checkout engine over HTTP.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Router                                         │
//! │                                                                         │
//! │  POST /checkout   CheckoutRequest (JSON)                               │
//! │       │                                                                 │
//! │       ├── 200 { "total": 240, "freight": 150,                          │
//! │       │         "orderCode": "20240000001" }                           │
//! │       └── 400 { "message": "Invalid Product ID" }                      │
//! │                                                                         │
//! │  GET /health      "OK"                                                 │
//! │                                                                         │
//! │  Layers: TraceLayer (tower-http)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are plain JSON numbers in currency units (`240`, `10.135`).

pub mod config;
pub mod error;

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use till_core::{CheckoutEngine, CheckoutRequest, CheckoutResult};
use till_db::Database;

use crate::config::CheckoutSettings;
use crate::error::ApiError;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: Arc<CheckoutEngine>,
}

impl AppState {
    pub fn new(engine: CheckoutEngine) -> Self {
        AppState {
            engine: Arc::new(engine),
        }
    }
}

/// Builds an engine that reads the catalog and coupons from `db`.
pub fn engine_for(db: &Database, settings: &CheckoutSettings) -> CheckoutEngine {
    CheckoutEngine::new(Arc::new(db.products()), Arc::new(db.coupons()))
        .with_policy(settings.freight_policy())
        .with_order_codes(settings.order_codes.generator())
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/checkout", post(checkout_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves once `signal` fires.
///
/// If the signal cannot be installed the server keeps running instead of
/// shutting down straight away.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for shutdown signal; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    "OK"
}

async fn checkout_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResult>, ApiError> {
    let Json(request) = payload?;
    let result = state.engine.execute(&request).await?;
    Ok(Json(result))
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::time::Duration;
    use till_core::lookup::FixedClock;
    use till_core::memory::{demo_coupons, demo_products, InMemoryCatalog, InMemoryPromotions};
    use till_db::DbConfig;
    use tower::ServiceExt;

    fn fixed_now() -> Arc<FixedClock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()))
    }

    fn app() -> Router {
        let engine = CheckoutEngine::new(
            Arc::new(InMemoryCatalog::with_products(demo_products()).unwrap()),
            Arc::new(InMemoryPromotions::with_coupons(demo_coupons()).unwrap()),
        )
        .with_clock(fixed_now());
        router(AppState::new(engine))
    }

    async fn post_checkout(app: Router, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/checkout")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_signal() {
        shutdown_on(async { Ok(()) }).await;

        let failed = async { Err(std::io::Error::other("signal handler unavailable")) };
        let waited = tokio::time::timeout(Duration::from_millis(50), shutdown_on(failed)).await;
        assert!(waited.is_err(), "a failed signal must not trigger shutdown");
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_checkout_ok() {
        let body = json!({
            "customerDocument": "347.867.458-12",
            "items": [
                { "productId": "product_1", "quantity": 3 },
                { "productId": "product_2", "quantity": 4 }
            ],
            "couponCode": "10OFF"
        });

        let (status, json) = post_checkout(app(), body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 231);
        assert_eq!(json["freight"], 150);
        assert_eq!(json["orderCode"], "20240000001");
    }

    #[tokio::test]
    async fn test_checkout_rejection_message() {
        let body = json!({
            "customerDocument": "347.867.458-12",
            "items": [{ "id": "product_1", "quantity": 0 }]
        });

        let (status, json) = post_checkout(app(), body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({ "message": "Invalid Product Quantity" }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, json) = post_checkout(app(), "{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn test_checkout_against_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for product in demo_products() {
            db.products().insert(&product).await.unwrap();
        }

        let engine = engine_for(&db, &CheckoutSettings::default());
        let body = json!({
            "customerDocument": "347.867.458-12",
            "items": [{ "productId": "product_1", "quantity": 1 }]
        });

        let (status, json) = post_checkout(router(AppState::new(engine)), body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 20);
        assert_eq!(json["freight"], 10);
    }
}

//! RSVP HTTP API.
//!
//! | Method | Path             | Response                      |
//! |--------|------------------|-------------------------------|
//! | GET    | `/`              | 200 welcome text              |
//! | GET    | `/api/rsvps`     | 200 JSON array                |
//! | POST   | `/api/rsvps`     | 201 created record / 400      |
//! | DELETE | `/api/rsvps/{id}`| 204 empty / 500               |

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use chrono::Utc;
use tower_http::cors::CorsLayer;

use crate::models::{Rsvp, validate_rsvp};
use crate::server::error::ApiError;
use crate::storage::RsvpStore;

pub const WELCOME: &str = "Welcome to the server!";

pub type SharedStore = Arc<dyn RsvpStore>;

/// Build the RSVP router. Any origin may call it.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/rsvps", get(list_handler).post(create_handler))
        .route("/api/rsvps/{id}", delete(delete_handler))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

async fn root_handler() -> &'static str {
    WELCOME
}

async fn list_handler(State(store): State<SharedStore>) -> Result<Json<Vec<Rsvp>>, ApiError> {
    match store.list().await {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            log::error!("Error fetching RSVPs: {e}");
            Err(ApiError::store("Failed to fetch RSVPs", e))
        }
    }
}

async fn create_handler(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        log::warn!("Rejected RSVP with malformed body: {e}");
        ApiError::CreateFailed
    })?;

    let new = validate_rsvp(&value, Utc::now()).map_err(|errors| {
        let detail: Vec<String> = errors.iter().map(ToString::to_string).collect();
        log::warn!("Rejected RSVP: {}", detail.join(" "));
        ApiError::CreateFailed
    })?;

    let rsvp = store.insert(new).await.map_err(|e| {
        log::error!("Error saving RSVP: {e}");
        ApiError::CreateFailed
    })?;

    log::info!("Created RSVP {}", rsvp.id);
    Ok((StatusCode::CREATED, Json(rsvp)))
}

async fn delete_handler(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match store.delete(&id).await {
        Ok(removed) => {
            log::debug!("Delete {id}: removed={removed}");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            log::error!("Error deleting RSVP {id}: {e}");
            Err(ApiError::store("Failed to delete RSVP", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, RedisStore};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, Response, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(MemoryStore::new()))
    }

    async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/rsvps")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete(id: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/rsvps/{id}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_welcome() {
        let response = send(&app(), get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], WELCOME.as_bytes());
    }

    #[tokio::test]
    async fn test_create_returns_201_with_id() {
        let app = app();
        let response = send(
            &app,
            post(json!({"name": "Alice", "phone": "555-1234", "plusOne": true})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert!(body["_id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["phone"], "555-1234");
        assert_eq!(body["plusOne"], true);
        assert!(body["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_create_missing_phone_is_400() {
        let response = send(&app(), post(json!({"name": "Alice", "plusOne": true}))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Failed to create RSVP"})
        );
    }

    #[tokio::test]
    async fn test_create_malformed_json_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/rsvps")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{name: "))
            .unwrap();

        let response = send(&app(), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_then_delete_removes_record() {
        let app = app();
        let created = json_body(
            send(
                &app,
                post(json!({"name": "Alice", "phone": "555-1234", "plusOne": true})),
            )
            .await,
        )
        .await;
        send(
            &app,
            post(json!({"name": "Bob", "phone": "555-9999", "plusOne": false})),
        )
        .await;

        let id = created["_id"].as_str().unwrap();
        let response = send(&app, delete(id)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());

        let listed = json_body(send(&app, get("/api/rsvps")).await).await;
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["name"], "Bob");
        assert!(listed.iter().all(|r| r["_id"] != created["_id"]));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let app = app();
        for name in ["Carol", "Alice", "Bob"] {
            send(&app, post(json!({"name": name, "phone": "1", "plusOne": false}))).await;
        }

        let listed = json_body(send(&app, get("/api/rsvps")).await).await;
        let names: Vec<_> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_204() {
        let response = send(&app(), delete(&uuid::Uuid::new_v4().to_string())).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_malformed_id_is_500() {
        let response = send(&app(), delete("not-an-id")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to delete RSVP");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_store_failure_on_list_is_500_with_details() {
        let app = router(Arc::new(MemoryStore::unavailable()));
        let response = send(&app, get("/api/rsvps")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to fetch RSVPs");
        assert_eq!(body["details"], "Store error: connection refused");
    }

    #[tokio::test]
    async fn test_unreachable_redis_is_500_with_details() {
        let store = RedisStore::open("redis://127.0.0.1:1/", "rsvp-test").unwrap();
        let app = router(Arc::new(store));
        let response = send(&app, get("/api/rsvps")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to fetch RSVPs");
        assert!(body["details"].as_str().unwrap().starts_with("Redis error"));
    }

    #[tokio::test]
    async fn test_cors_is_permissive() {
        let request = Request::builder()
            .uri("/api/rsvps")
            .header(header::ORIGIN, "https://anywhere.example")
            .body(Body::empty())
            .unwrap();

        let response = send(&app(), request).await;
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}

//! HTTP API handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::routes::ENDPOINTS;
use crate::error::{ApiError, ApiResult};
use crate::family::{parse_new_member, FamilyStore, Member};
use crate::metrics;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The family store.
    pub family: Arc<RwLock<FamilyStore>>,
    /// Prometheus handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a store.
    pub fn new(store: FamilyStore) -> Self {
        metrics::set_family_size(store.len());
        Self {
            family: Arc::new(RwLock::new(store)),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// One row of the index listing.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
}

/// Index response.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    /// Family last name.
    pub family: String,
    /// Number of members.
    pub members: usize,
    /// Available endpoints.
    pub endpoints: Vec<EndpointInfo>,
}

/// Delete response.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub done: bool,
}

/// Index handler - lists the available endpoints.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let family = state.family.read().await;

    Json(IndexResponse {
        family: family.last_name().to_string(),
        members: family.len(),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path)| EndpointInfo { method, path })
            .collect(),
    })
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus scrape handler.
pub async fn metrics_text(State(state): State<AppState>) -> ApiResult<String> {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .ok_or_else(|| ApiError::not_found("metrics are disabled"))
}

/// GET /members - all members in insertion order.
pub async fn list_members(State(state): State<AppState>) -> Json<Vec<Member>> {
    let family = state.family.read().await;
    Json(family.get_all_members().to_vec())
}

/// GET /members/:id
pub async fn get_member(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Member>> {
    let family = state.family.read().await;

    parse_member_id(&raw_id)
        .and_then(|id| family.get_member(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            metrics::inc_member_lookup_misses();
            ApiError::member_not_found()
        })
}

/// POST /members - validate the body and add a member.
pub async fn create_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Member>> {
    if !is_json_content_type(&headers) {
        return Err(ApiError::bad_request("Content-Type must be application/json"));
    }

    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejected malformed JSON body: {}", e);
        ApiError::bad_request("Malformed JSON")
    })?;

    // A bare `null` carries no payload at all
    if value.is_null() {
        return Err(ApiError::bad_request("Malformed JSON"));
    }

    let new_member = parse_new_member(&value).map_err(|e| {
        warn!(field = %e.field(), "Member validation failed: {}", e);
        metrics::inc_validation_failures(e.field());
        ApiError::from(e)
    })?;

    let mut family = state.family.write().await;
    let member = family.add_member(new_member);
    metrics::inc_members_created();
    metrics::set_family_size(family.len());

    Ok(Json(member))
}

/// DELETE /members/:id
pub async fn delete_member(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let mut family = state.family.write().await;

    match parse_member_id(&raw_id).and_then(|id| family.delete_member(id)) {
        Some(_) => {
            metrics::inc_members_deleted();
            metrics::set_family_size(family.len());
            Ok(Json(DeleteResponse { done: true }))
        }
        None => {
            metrics::inc_member_lookup_misses();
            Err(ApiError::member_not_found())
        }
    }
}

/// Parse a path id. Only plain digit strings are ids; anything else can't
/// name a member.
fn parse_member_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// `application/json` or any `application/*+json`, ignoring parameters.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

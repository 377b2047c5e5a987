//! Prometheus metrics for the family API.
//!
//! This module provides:
//! - Member create/delete counters and a family size gauge
//! - Validation failure counts per field
//! - HTTP request latency, labelled by route template

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::family::MemberField;

// === Metric Name Constants ===

/// Members created counter metric name.
pub const METRIC_MEMBERS_CREATED: &str = "members_created_total";
/// Members deleted counter metric name.
pub const METRIC_MEMBERS_DELETED: &str = "members_deleted_total";
/// Lookups/deletes of unknown ids.
pub const METRIC_MEMBER_LOOKUP_MISSES: &str = "member_lookup_misses_total";
/// Rejected create payloads, labelled by field.
pub const METRIC_VALIDATION_FAILURES: &str = "validation_failures_total";
/// Current number of members.
pub const METRIC_FAMILY_SIZE: &str = "family_size";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(METRIC_MEMBERS_CREATED, "Total number of members created");
    describe_counter!(METRIC_MEMBERS_DELETED, "Total number of members deleted");
    describe_counter!(
        METRIC_MEMBER_LOOKUP_MISSES,
        "Total number of requests for members that do not exist"
    );
    describe_counter!(
        METRIC_VALIDATION_FAILURES,
        "Total number of rejected create payloads"
    );
    describe_gauge!(METRIC_FAMILY_SIZE, "Current number of family members");

    debug!("Metrics initialized");
}

/// Install the Prometheus recorder and return a handle for rendering.
pub fn install_exporter() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// How often histogram buckets are drained when nobody scrapes `/metrics`.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Periodically run exporter upkeep so histogram samples don't accumulate
/// between scrapes.
pub fn spawn_upkeep(handle: PrometheusHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Increment members created counter.
pub fn inc_members_created() {
    counter!(METRIC_MEMBERS_CREATED).increment(1);
}

/// Increment members deleted counter.
pub fn inc_members_deleted() {
    counter!(METRIC_MEMBERS_DELETED).increment(1);
}

/// Increment lookup miss counter.
pub fn inc_member_lookup_misses() {
    counter!(METRIC_MEMBER_LOOKUP_MISSES).increment(1);
}

/// Record a rejected create payload.
pub fn inc_validation_failures(field: MemberField) {
    counter!(METRIC_VALIDATION_FAILURES, "field" => field.as_ref().to_string()).increment(1);
}

/// Set the family size gauge.
pub fn set_family_size(size: usize) {
    gauge!(METRIC_FAMILY_SIZE).set(size as f64);
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &str, method: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "endpoint" => endpoint.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(latency_ms);
}

/// Label for a request: the matched route template, so ids don't explode
/// label cardinality.
fn endpoint_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string())
}

/// Latency middleware for HTTP requests.
pub async fn track_http_latency(request: Request<Body>, next: Next) -> Response<Body> {
    let endpoint = endpoint_label(&request);
    let method = request.method().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    record_http_latency(start, &endpoint, &method, response.status().as_u16());
    response
}

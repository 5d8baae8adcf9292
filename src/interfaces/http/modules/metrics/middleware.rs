//! Per-route request counters and latency histograms

use std::time::{Duration, Instant};

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

/// Route label used when the router found no match.
const UNMATCHED_ROUTE: &str = "unmatched";

/// The route template (`/api/reservations/{id}/cancel`), never the raw
/// path, so slot and reservation ids stay out of the label set.
fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_ROUTE.to_string(), |route| route.as_str().to_string())
}

fn record(method: String, route: String, status: u16, elapsed: Duration) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => route
    )
    .record(elapsed.as_secs_f64());
}

/// Counts every routed request by method, route and status, and times it.
///
/// Installed with `route_layer`, which is what makes [`MatchedPath`]
/// available here.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let route = route_label(&request);

    let started = Instant::now();
    let response = next.run(request).await;
    record(method, route, response.status().as_u16(), started.elapsed());

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_without_match_gets_fallback_label() {
        let request = Request::builder()
            .uri("/api/reservations/42/cancel")
            .body(Body::empty())
            .unwrap();
        assert_eq!(route_label(&request), UNMATCHED_ROUTE);
    }
}

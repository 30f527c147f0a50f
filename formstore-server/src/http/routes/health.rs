//! Liveness endpoint for container health checks

use axum::{routing::get, Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub const SERVICE_NAME: &str = "formstore";

/// Liveness payload; says nothing about database reachability
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339 with millisecond precision
    pub timestamp: String,
    pub service: &'static str,
}

impl HealthResponse {
    fn at(now: DateTime<Utc>) -> Self {
        Self {
            status: "OK",
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            service: SERVICE_NAME,
        }
    }
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::at(Utc::now()))
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_is_utc_with_millis() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let body = HealthResponse::at(now);

        assert_eq!(body.timestamp, "2026-10-19T08:30:00.000Z");
        assert_eq!(body.service, "formstore");
    }

    #[tokio::test]
    async fn health_reports_ok_and_current_time() {
        let before = Utc::now();
        let Json(body) = health().await;

        assert_eq!(body.status, "OK");
        let stamped = DateTime::parse_from_rfc3339(&body.timestamp).unwrap();
        assert!(stamped.with_timezone(&Utc) >= before - chrono::Duration::milliseconds(1));
    }
}

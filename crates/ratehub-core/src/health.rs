use axum::http::StatusCode;

/// `GET /healthz`. Answers 200 while the process is alive.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz`. The service takes traffic as soon as it binds, so
/// readiness and liveness currently coincide.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

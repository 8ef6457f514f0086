//! Liveness endpoint.

/// Always answers `ok`, whatever the mode or tool availability.
pub async fn ping() -> &'static str {
    "ok"
}

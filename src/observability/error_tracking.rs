use tracing::error;
use uuid::Uuid;

/// Emits a structured error-tracking event for a 5xx response so the log
/// pipeline can alert on it. Returns the generated event id.
pub fn capture_unexpected_5xx(path: &str, method: &str, status: u16, request_id: &str) -> Uuid {
    let event_id = Uuid::new_v4();
    error!(
        tracking_backend = "log",
        event_id = %event_id,
        request_id = %request_id,
        method = %method,
        path = %path,
        status = status,
        "error-tracking capture for unexpected 5xx"
    );
    event_id
}

#[cfg(test)]
mod tests {
    use super::capture_unexpected_5xx;

    #[test]
    fn capture_returns_a_fresh_event_id() {
        let first = capture_unexpected_5xx("/publications", "GET", 500, "req-1");
        let second = capture_unexpected_5xx("/publications", "GET", 500, "req-1");

        assert_ne!(first, uuid::Uuid::nil());
        assert_ne!(first, second);
    }
}

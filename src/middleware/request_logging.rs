use actix_web::dev::ServiceRequest;
use actix_web::http::header;

/// Get client IP address from request.
///
/// Uses realip_remote_addr() which respects Forwarded/X-Forwarded-For only
/// when actix is configured with a trusted proxy; the raw header is never
/// parsed here because clients can spoof it.
pub fn get_client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn get_user_agent(req: &ServiceRequest) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Get HTTP status class for grouping (2xx, 3xx, 4xx, 5xx)
pub fn get_status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}

pub mod error_tracking;

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct AppMetrics {
    request_count: AtomicU64,
    error_count: AtomicU64,
    auth_failure_count: AtomicU64,
    latency_total_ms: AtomicU64,
    latency_count: AtomicU64,
}

impl AppMetrics {
    pub fn record_request(&self, status: u16, latency_ms: u64) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        if status >= 500 {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        if status == 401 {
            self.auth_failure_count.fetch_add(1, Ordering::Relaxed);
        }
        self.latency_total_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
        self.latency_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self, db_size: u32, db_idle: usize) -> String {
        let count = self.request_count.load(Ordering::Relaxed).max(1);
        let avg_latency = self.latency_total_ms.load(Ordering::Relaxed) as f64 / count as f64;

        format!(
            concat!(
                "# TYPE http_requests_total counter\n",
                "http_requests_total {}\n",
                "# TYPE http_error_total counter\n",
                "http_error_total {}\n",
                "# TYPE auth_failures_total counter\n",
                "auth_failures_total {}\n",
                "# TYPE http_latency_avg_ms gauge\n",
                "http_latency_avg_ms {:.2}\n",
                "# TYPE db_pool_size gauge\n",
                "db_pool_size {}\n",
                "# TYPE db_pool_idle gauge\n",
                "db_pool_idle {}\n",
            ),
            self.request_count.load(Ordering::Relaxed),
            self.error_count.load(Ordering::Relaxed),
            self.auth_failure_count.load(Ordering::Relaxed),
            avg_latency,
            db_size,
            db_idle,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::AppMetrics;

    #[test]
    fn record_request_increments_request_count() {
        let metrics = AppMetrics::default();

        metrics.record_request(200, 25);

        let rendered = metrics.render_prometheus(0, 0);
        assert!(rendered.contains("http_requests_total 1"));
    }

    #[test]
    fn record_request_5xx_increments_error_count() {
        let metrics = AppMetrics::default();

        metrics.record_request(503, 12);

        let rendered = metrics.render_prometheus(0, 0);
        assert!(rendered.contains("http_error_total 1"));
    }

    #[test]
    fn record_request_401_increments_auth_failures() {
        let metrics = AppMetrics::default();

        metrics.record_request(401, 5);

        let rendered = metrics.render_prometheus(0, 0);
        assert!(rendered.contains("auth_failures_total 1"));
    }

    #[test]
    fn render_prometheus_reports_pool_gauges() {
        let metrics = AppMetrics::default();

        let rendered = metrics.render_prometheus(7, 3);

        assert!(rendered.contains("db_pool_size 7"));
        assert!(rendered.contains("db_pool_idle 3"));
    }
}

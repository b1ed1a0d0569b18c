use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

/// Pre-delete probe against the reservation service. The service being down
/// must never block a delete, so every failure path degrades to "no active
/// reservations".
#[async_trait]
pub trait ReservationsGateway: Send + Sync {
    async fn has_active_reservations(&self, publication_id: Uuid) -> bool;
}

/// Used when no reservation service base URL is configured.
pub struct DisabledReservationsClient;

#[async_trait]
impl ReservationsGateway for DisabledReservationsClient {
    async fn has_active_reservations(&self, _publication_id: Uuid) -> bool {
        false
    }
}

#[derive(Debug, Deserialize)]
struct ReservationSummary {
    status: String,
}

pub struct HttpReservationsClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpReservationsClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ReservationsGateway for HttpReservationsClient {
    async fn has_active_reservations(&self, publication_id: Uuid) -> bool {
        let url = format!("{}/reservations/publication/{publication_id}", self.base_url);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(%publication_id, %error, "reservation service unreachable, proceeding");
                return false;
            }
        };

        if !response.status().is_success() {
            return false;
        }

        match response.json::<Vec<ReservationSummary>>().await {
            Ok(reservations) => reservations
                .iter()
                .any(|r| matches!(r.status.as_str(), "pending" | "confirmed")),
            Err(error) => {
                warn!(%publication_id, %error, "reservation service returned malformed payload");
                false
            }
        }
    }
}

use async_trait::async_trait;
use rental_backend::infrastructure::reservations::ReservationsGateway;
use uuid::Uuid;

/// Reservation probe stub with a fixed answer.
pub struct StubReservations {
    pub active: bool,
}

impl StubReservations {
    pub fn none() -> Self {
        Self { active: false }
    }

    pub fn blocking() -> Self {
        Self { active: true }
    }
}

#[async_trait]
impl ReservationsGateway for StubReservations {
    async fn has_active_reservations(&self, _publication_id: Uuid) -> bool {
        self.active
    }
}

use chrono::Utc;
use rental_backend::domain::{Category, Condition, Publication, User};
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn test_user(id: Uuid) -> User {
    let now = Utc::now();
    User {
        id,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: format!("user-{id}@example.com"),
        avatar_url: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_publication(id: Uuid, owner_id: Uuid) -> Publication {
    let now = Utc::now();
    Publication {
        id,
        owner_id,
        title: "Cordless drill".to_string(),
        description: "18V drill with two batteries".to_string(),
        category: Category::Bricolage,
        price_per_day: Decimal::new(1500, 2),
        deposit_required: Decimal::ZERO,
        location: "Paris".to_string(),
        condition: Condition::Good,
        is_available: true,
        is_active: true,
        images: Vec::new(),
        view_count: 0,
        created_at: now,
        updated_at: now,
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema)]
#[sqlx(type_name = "category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bricolage,
    Sport,
    Jardinage,
    Electromenager,
    Transport,
    Autre,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Bricolage => "bricolage",
            Category::Sport => "sport",
            Category::Jardinage => "jardinage",
            Category::Electromenager => "electromenager",
            Category::Transport => "transport",
            Category::Autre => "autre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema)]
#[sqlx(type_name = "condition", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Excellent,
    Good,
    Fair,
}

/// Ordering of listing queries. `Popularity` ranks by view count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    PriceAsc,
    PriceDesc,
    Popularity,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date_desc",
            SortKey::DateAsc => "date_asc",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::Popularity => "popularity",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Publication {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price_per_day: Decimal,
    pub deposit_required: Decimal,
    pub location: String,
    pub condition: Condition,
    pub is_available: bool,
    pub is_active: bool,
    #[sqlx(json)]
    pub images: Vec<String>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Publication {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn can_be_reserved(&self) -> bool {
        self.is_active && self.is_available
    }
}

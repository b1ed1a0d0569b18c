use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::traits::{PublicationRepository, PublicationSearchParams};
use crate::domain::{Category, Publication, SortKey};
use crate::error::AppResult;

const PUBLICATION_COLUMNS: &str = "id, owner_id, title, description, category, price_per_day, \
     deposit_required, location, condition, is_available, is_active, images, view_count, \
     created_at, updated_at";

pub struct PublicationRepositoryImpl {
    pool: PgPool,
}

impl PublicationRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_search_filters<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        params: &'a PublicationSearchParams,
    ) {
        builder.push(" WHERE is_active = TRUE");

        if let Some(category) = params.category {
            builder.push(" AND category = ");
            builder.push_bind(category);
        }
        if let Some(location) = &params.location {
            builder.push(" AND location ILIKE ");
            builder.push_bind(format!("%{location}%"));
        }
        if let Some(min_price) = params.min_price {
            builder.push(" AND price_per_day >= ");
            builder.push_bind(min_price);
        }
        if let Some(max_price) = params.max_price {
            builder.push(" AND price_per_day <= ");
            builder.push_bind(max_price);
        }
        if let Some(search) = &params.search {
            let pattern = format!("%{search}%");
            builder.push(" AND (title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR description ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(conditions) = &params.conditions {
            builder.push(" AND condition = ANY(");
            builder.push_bind(conditions.as_slice());
            builder.push(")");
        }
        if params.available_only {
            builder.push(" AND is_available = TRUE");
        }
    }

    fn order_clause(sort: SortKey) -> &'static str {
        match sort {
            SortKey::DateDesc => " ORDER BY created_at DESC",
            SortKey::DateAsc => " ORDER BY created_at ASC",
            SortKey::PriceAsc => " ORDER BY price_per_day ASC",
            SortKey::PriceDesc => " ORDER BY price_per_day DESC",
            SortKey::Popularity => " ORDER BY view_count DESC, created_at DESC",
        }
    }
}

#[async_trait]
impl PublicationRepository for PublicationRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Publication>> {
        let publication = sqlx::query_as::<_, Publication>(&format!(
            "SELECT {PUBLICATION_COLUMNS} FROM publications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(publication)
    }

    async fn search(
        &self,
        params: &PublicationSearchParams,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Publication>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PUBLICATION_COLUMNS} FROM publications"
        ));
        Self::push_search_filters(&mut builder, params);
        builder.push(Self::order_clause(params.sort));
        builder.push(" LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let publications = builder
            .build_query_as::<Publication>()
            .fetch_all(&self.pool)
            .await?;
        Ok(publications)
    }

    async fn count_search(&self, params: &PublicationSearchParams) -> AppResult<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM publications");
        Self::push_search_filters(&mut builder, params);

        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn find_by_owner(
        &self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Publication>> {
        let publications = sqlx::query_as::<_, Publication>(&format!(
            "SELECT {PUBLICATION_COLUMNS} FROM publications WHERE owner_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(publications)
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM publications WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }

    async fn create(&self, publication: &Publication) -> AppResult<Publication> {
        let created = sqlx::query_as::<_, Publication>(&format!(
            "INSERT INTO publications (id, owner_id, title, description, category, \
             price_per_day, deposit_required, location, condition, is_available, is_active, \
             images, view_count, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {PUBLICATION_COLUMNS}"
        ))
        .bind(publication.id)
        .bind(publication.owner_id)
        .bind(&publication.title)
        .bind(&publication.description)
        .bind(publication.category)
        .bind(publication.price_per_day)
        .bind(publication.deposit_required)
        .bind(&publication.location)
        .bind(publication.condition)
        .bind(publication.is_available)
        .bind(publication.is_active)
        .bind(sqlx::types::Json(&publication.images))
        .bind(publication.view_count)
        .bind(publication.created_at)
        .bind(publication.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, publication: &Publication) -> AppResult<Publication> {
        let updated = sqlx::query_as::<_, Publication>(&format!(
            "UPDATE publications SET title = $2, description = $3, category = $4, \
             price_per_day = $5, deposit_required = $6, location = $7, condition = $8, \
             is_available = $9, images = $10, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PUBLICATION_COLUMNS}"
        ))
        .bind(publication.id)
        .bind(&publication.title)
        .bind(&publication.description)
        .bind(publication.category)
        .bind(publication.price_per_day)
        .bind(publication.deposit_required)
        .bind(&publication.location)
        .bind(publication.condition)
        .bind(publication.is_available)
        .bind(sqlx::types::Json(&publication.images))
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn toggle_availability(&self, id: Uuid) -> AppResult<Option<bool>> {
        let is_available: Option<bool> = sqlx::query_scalar(
            "UPDATE publications SET is_available = NOT is_available, updated_at = NOW() \
             WHERE id = $1 RETURNING is_available",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(is_available)
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE publications SET is_active = FALSE, is_available = FALSE, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn increment_view_count(&self, id: Uuid) -> AppResult<Option<i64>> {
        let view_count: Option<i64> = sqlx::query_scalar(
            "UPDATE publications SET view_count = view_count + 1 WHERE id = $1 \
             RETURNING view_count",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(view_count)
    }

    async fn count_by_category(&self) -> AppResult<HashMap<Category, i64>> {
        let rows: Vec<(Category, i64)> = sqlx::query_as(
            "SELECT category, COUNT(*) FROM publications \
             WHERE is_active = TRUE AND is_available = TRUE GROUP BY category",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().collect())
    }
}

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rental_backend::domain::{Category, Publication, SortKey};
use rental_backend::error::AppResult;
use rental_backend::infrastructure::repositories::{
    PublicationRepository, PublicationSearchParams,
};
use uuid::Uuid;

#[derive(Default)]
pub struct MockPublicationRepo {
    pub publications: Mutex<Vec<Publication>>,
}

impl MockPublicationRepo {
    pub fn push(&self, publication: Publication) {
        self.publications
            .lock()
            .expect("publications mutex poisoned")
            .push(publication);
    }

    fn filtered(&self, params: &PublicationSearchParams) -> Vec<Publication> {
        let mut rows: Vec<Publication> = self
            .publications
            .lock()
            .expect("publications mutex poisoned")
            .iter()
            .filter(|p| p.is_active)
            .filter(|p| params.category.is_none_or(|category| p.category == category))
            .filter(|p| {
                params.location.as_deref().is_none_or(|location| {
                    p.location.to_lowercase().contains(&location.to_lowercase())
                })
            })
            .filter(|p| params.min_price.is_none_or(|min| p.price_per_day >= min))
            .filter(|p| params.max_price.is_none_or(|max| p.price_per_day <= max))
            .filter(|p| {
                params.search.as_deref().is_none_or(|term| {
                    let term = term.to_lowercase();
                    p.title.to_lowercase().contains(&term)
                        || p.description.to_lowercase().contains(&term)
                })
            })
            .filter(|p| {
                params
                    .conditions
                    .as_deref()
                    .is_none_or(|conditions| conditions.contains(&p.condition))
            })
            .filter(|p| !params.available_only || p.is_available)
            .cloned()
            .collect();

        match params.sort {
            SortKey::DateDesc => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::DateAsc => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortKey::PriceAsc => rows.sort_by(|a, b| a.price_per_day.cmp(&b.price_per_day)),
            SortKey::PriceDesc => rows.sort_by(|a, b| b.price_per_day.cmp(&a.price_per_day)),
            SortKey::Popularity => rows.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
        }

        rows
    }
}

#[async_trait]
impl PublicationRepository for MockPublicationRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Publication>> {
        Ok(self
            .publications
            .lock()
            .expect("publications mutex poisoned")
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn search(
        &self,
        params: &PublicationSearchParams,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Publication>> {
        let rows = self.filtered(params);
        let start = offset.max(0) as usize;
        let limit = limit.max(0) as usize;
        Ok(rows.into_iter().skip(start).take(limit).collect())
    }

    async fn count_search(&self, params: &PublicationSearchParams) -> AppResult<i64> {
        Ok(self.filtered(params).len() as i64)
    }

    async fn find_by_owner(
        &self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Publication>> {
        let rows: Vec<Publication> = self
            .publications
            .lock()
            .expect("publications mutex poisoned")
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();

        let start = offset.max(0) as usize;
        let limit = limit.max(0) as usize;
        Ok(rows.into_iter().skip(start).take(limit).collect())
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        Ok(self
            .publications
            .lock()
            .expect("publications mutex poisoned")
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .count() as i64)
    }

    async fn create(&self, publication: &Publication) -> AppResult<Publication> {
        self.push(publication.clone());
        Ok(publication.clone())
    }

    async fn update(&self, publication: &Publication) -> AppResult<Publication> {
        let mut rows = self
            .publications
            .lock()
            .expect("publications mutex poisoned");
        if let Some(existing) = rows.iter_mut().find(|p| p.id == publication.id) {
            *existing = publication.clone();
        }
        Ok(publication.clone())
    }

    async fn toggle_availability(&self, id: Uuid) -> AppResult<Option<bool>> {
        let mut rows = self
            .publications
            .lock()
            .expect("publications mutex poisoned");
        Ok(rows.iter_mut().find(|p| p.id == id).map(|p| {
            p.is_available = !p.is_available;
            p.is_available
        }))
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self
            .publications
            .lock()
            .expect("publications mutex poisoned");
        if let Some(p) = rows.iter_mut().find(|p| p.id == id) {
            p.is_active = false;
            p.is_available = false;
        }
        Ok(())
    }

    async fn increment_view_count(&self, id: Uuid) -> AppResult<Option<i64>> {
        let mut rows = self
            .publications
            .lock()
            .expect("publications mutex poisoned");
        Ok(rows.iter_mut().find(|p| p.id == id).map(|p| {
            p.view_count += 1;
            p.view_count
        }))
    }

    async fn count_by_category(&self) -> AppResult<HashMap<Category, i64>> {
        let mut counts: HashMap<Category, i64> = HashMap::new();
        for p in self
            .publications
            .lock()
            .expect("publications mutex poisoned")
            .iter()
            .filter(|p| p.is_active && p.is_available)
        {
            *counts.entry(p.category).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

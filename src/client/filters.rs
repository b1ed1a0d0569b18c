use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, SortKey};

/// Client-side filter set for the public listing endpoint.
///
/// Encoding omits unset and empty-string values; everything that IS set is
/// passed through unmodified, with no range checks or clamping. `page = 0`
/// and `min_price > max_price` reach the server as-is, which owns the policy
/// for them. Encoding and then parsing the query string reconstructs an
/// equivalent filter set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationFilters {
    pub category: Option<Category>,
    pub location: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub available_only: Option<bool>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PublicationFilters {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(category) = self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        if let Some(location) = non_empty(&self.location) {
            pairs.push(("location", location.to_string()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("min_price", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("max_price", max_price.to_string()));
        }
        if let Some(available_only) = self.available_only {
            pairs.push(("available_only", available_only.to_string()));
        }
        if let Some(search) = non_empty(&self.search) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }

        pairs
    }

    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self.to_query_pairs())
            .expect("query pairs are always encodable")
    }

    pub fn from_query_str(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        serde_urlencoded::from_str(query)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

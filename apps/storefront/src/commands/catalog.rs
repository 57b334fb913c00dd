//! # Catalog Commands
//!
//! The home screen grid, its category chips and search box, and the
//! product detail screen.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ All ] [ Roses ] [ Bouquets ] [ Birthday ] [ Anniversary ]           │
//! │  ┌──────────────────────────────┐                                      │
//! │  │ 🔍 rose                       │                                      │
//! │  └──────────────────────────────┘                                      │
//! │        │                                                               │
//! │        ▼                                                               │
//! │  list_products(filter = Only(Roses), query = "rose")                   │
//! │        │                                                               │
//! │        ▼                                                               │
//! │  category chip AND case-insensitive name match, catalog order          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bloomy_core::validation::validate_search_query;
use bloomy_core::{CategoryFilter, CoreError, Product};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};

/// A product as the grid and detail screen show it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub is_favorite: bool,
    /// Price formatted in the configured currency.
    pub price_label: String,
}

impl ProductView {
    pub(crate) fn new(product: &Product, is_favorite: bool, config: &ConfigState) -> Self {
        ProductView {
            product: product.clone(),
            is_favorite,
            price_label: config.format_price(product.price),
        }
    }
}

/// Lists products matching a category chip and a search query.
///
/// ## Arguments
/// * `filter` - Category chip; `All` shows everything
/// * `query` - Name search, trimmed; empty matches all
///
/// ## Returns
/// Matching products in catalog order
pub fn list_products(
    store: &StoreState,
    config: &ConfigState,
    filter: CategoryFilter,
    query: &str,
) -> Result<Vec<ProductView>, ApiError> {
    debug!(?filter, query = %query, "list_products command");

    let query = validate_search_query(query)?;

    let products = store.with_store(|s| {
        s.products_in(filter, &query)
            .into_iter()
            .map(|p| ProductView::new(p, s.is_favorite(&p.id), config))
            .collect::<Vec<_>>()
    });

    debug!(count = products.len(), "Products matched");
    Ok(products)
}

/// Gets one product for the detail screen.
///
/// ## Errors
/// NOT_FOUND when the id is not in the catalog. The screen shows
/// "Product not found" with a single "Go back" action.
pub fn get_product(
    store: &StoreState,
    config: &ConfigState,
    id: &str,
) -> Result<ProductView, ApiError> {
    debug!(id = %id, "get_product command");

    store
        .with_store(|s| {
            s.product(id)
                .map(|p| ProductView::new(p, s.is_favorite(id), config))
        })
        .ok_or_else(|| ApiError::from(CoreError::ProductNotFound(id.to_string())))
}

#[cfg(test)]
mod tests {
    use bloomy_core::Category;

    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_list_all() {
        let store = StoreState::new();
        let products =
            list_products(&store, &ConfigState::default(), CategoryFilter::All, "").unwrap();
        assert_eq!(products.len(), 10);
        assert_eq!(products[0].price_label, "45.00 AZN");
    }

    #[test]
    fn test_filter_and_search_combine() {
        let store = StoreState::new();
        let products = list_products(
            &store,
            &ConfigState::default(),
            CategoryFilter::Only(Category::Roses),
            "  VELVET ",
        )
        .unwrap();

        let ids: Vec<_> = products.iter().map(|p| p.product.id.as_str()).collect();
        assert_eq!(ids, vec!["5"]);
    }

    #[test]
    fn test_overlong_query_rejected() {
        let store = StoreState::new();
        let err = list_products(
            &store,
            &ConfigState::default(),
            CategoryFilter::All,
            &"a".repeat(101),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_get_product_marks_favorite() {
        let store = StoreState::new();
        store.with_store_mut(|s| s.toggle_favorite("3"));

        let view = get_product(&store, &ConfigState::default(), "3").unwrap();
        assert_eq!(view.product.name, "White Tulips");
        assert!(view.is_favorite);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "3");
        assert_eq!(json["isFavorite"], true);
    }

    #[test]
    fn test_get_missing_product() {
        let store = StoreState::new();
        let err = get_product(&store, &ConfigState::default(), "999").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 999");
    }
}

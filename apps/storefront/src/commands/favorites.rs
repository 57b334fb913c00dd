//! # Favorites Commands
//!
//! The heart button on product cards and the favorites screen.

use bloomy_core::CoreError;
use serde::Serialize;
use tracing::debug;

use crate::commands::catalog::ProductView;
use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};

/// Result of a heart tap.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggle {
    pub id: String,
    pub is_favorite: bool,
    /// Favorites after the toggle, oldest first.
    pub favorites: Vec<String>,
}

/// Flips a product in or out of the favorites.
///
/// ## Errors
/// NOT_FOUND for ids that are not in the catalog, so the set only ever
/// holds real products.
pub fn toggle_favorite(store: &StoreState, id: &str) -> Result<FavoriteToggle, ApiError> {
    debug!(id = %id, "toggle_favorite command");

    store.with_store_mut(|s| -> Result<FavoriteToggle, ApiError> {
        if s.product(id).is_none() {
            return Err(CoreError::ProductNotFound(id.to_string()).into());
        }

        s.toggle_favorite(id);
        Ok(FavoriteToggle {
            id: id.to_string(),
            is_favorite: s.is_favorite(id),
            favorites: s.favorites().to_vec(),
        })
    })
}

/// Products on the favorites screen, in catalog order.
pub fn list_favorites(store: &StoreState, config: &ConfigState) -> Vec<ProductView> {
    debug!("list_favorites command");

    store.with_store(|s| {
        s.favorite_products()
            .into_iter()
            .map(|p| ProductView::new(p, true, config))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_toggle_twice_restores() {
        let store = StoreState::new();

        let on = toggle_favorite(&store, "2").unwrap();
        assert!(on.is_favorite);
        assert_eq!(on.favorites, vec!["2"]);

        let off = toggle_favorite(&store, "2").unwrap();
        assert!(!off.is_favorite);
        assert!(off.favorites.is_empty());
    }

    #[test]
    fn test_toggle_unknown_product() {
        let store = StoreState::new();
        let err = toggle_favorite(&store, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(store.with_store(|s| s.favorites().is_empty()));
    }

    #[test]
    fn test_list_favorites_in_catalog_order() {
        let store = StoreState::new();
        toggle_favorite(&store, "7").unwrap();
        toggle_favorite(&store, "1").unwrap();

        let names: Vec<_> = list_favorites(&store, &ConfigState::default())
            .into_iter()
            .map(|v| v.product.name)
            .collect();
        assert_eq!(names, vec!["Pink Roses Bouquet", "Vibrant Orchids"]);
    }
}

//! # Address Commands
//!
//! The address book screen and its add/edit sheet.
//!
//! ## Default Address Rules
//! ```text
//! add first address        → becomes default
//! add later address        → not default
//! set_default_address(id)  → id becomes the only default
//! delete the default       → first remaining address takes over
//! ```
//! The store enforces these; commands only pick the mutator.

use bloomy_core::validation::validate_address_input;
use bloomy_core::{Address, AddressKind, AddressPatch, CoreError, NewAddress};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::StoreState;

/// Lists saved addresses in the order they were added.
pub fn list_addresses(store: &StoreState) -> Vec<Address> {
    debug!("list_addresses command");
    store.with_store(|s| s.addresses().to_vec())
}

/// Saves the add/edit sheet.
///
/// ## Behavior
/// - `editing_id = None`: appends a new address with a fresh id
/// - `editing_id = Some(id)`: replaces title and text of that address
/// - Either way the icon is derived from the title ("Home", "Office",
///   anything else)
///
/// ## Errors
/// - VALIDATION_ERROR with `title`/`address` field messages for blank input
/// - NOT_FOUND when editing an address that was deleted meanwhile
///
/// ## Returns
/// The address as stored
pub fn save_address(
    store: &StoreState,
    editing_id: Option<&str>,
    form: NewAddress,
) -> Result<Address, ApiError> {
    debug!(editing_id = ?editing_id, title = %form.title, "save_address command");

    validate_address_input(&form.title, &form.address)?;

    let form = NewAddress {
        title: form.title.trim().to_string(),
        address: form.address.trim().to_string(),
    };

    store.with_store_mut(|s| -> Result<Address, ApiError> {
        let id = match editing_id {
            Some(id) => {
                if s.address(id).is_none() {
                    return Err(CoreError::AddressNotFound(id.to_string()).into());
                }
                s.update_address(id, AddressPatch::from_form(&form));
                id.to_string()
            }
            None => {
                let id = Uuid::new_v4().to_string();
                s.add_address(Address {
                    id: id.clone(),
                    kind: AddressKind::from_title(&form.title),
                    title: form.title.clone(),
                    address: form.address.clone(),
                    is_default: false,
                });
                info!(id = %id, "Address added");
                id
            }
        };

        s.address(&id)
            .cloned()
            .ok_or_else(|| ApiError::from(CoreError::AddressNotFound(id)))
    })
}

/// Deletes an address. Unknown ids are a no-op.
///
/// ## Returns
/// The remaining addresses
pub fn delete_address(store: &StoreState, id: &str) -> Vec<Address> {
    debug!(id = %id, "delete_address command");

    store.with_store_mut(|s| {
        s.delete_address(id);
        s.addresses().to_vec()
    })
}

/// Makes `id` the default address.
pub fn set_default_address(store: &StoreState, id: &str) -> Result<Vec<Address>, ApiError> {
    debug!(id = %id, "set_default_address command");

    store.with_store_mut(|s| -> Result<Vec<Address>, ApiError> {
        if s.address(id).is_none() {
            return Err(CoreError::AddressNotFound(id.to_string()).into());
        }
        s.update_address(
            id,
            AddressPatch {
                is_default: Some(true),
                ..AddressPatch::default()
            },
        );
        Ok(s.addresses().to_vec())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn form(title: &str, address: &str) -> NewAddress {
        NewAddress {
            title: title.to_string(),
            address: address.to_string(),
        }
    }

    #[test]
    fn test_add_address() {
        let store = StoreState::new();

        let saved = save_address(&store, None, form(" Office ", "28 May St, Baku")).unwrap();

        assert_eq!(saved.title, "Office");
        assert_eq!(saved.kind, AddressKind::Office);
        assert!(!saved.is_default);
        assert_eq!(list_addresses(&store).len(), 3);
    }

    #[test]
    fn test_edit_address_rederives_kind() {
        let store = StoreState::new();

        let saved = save_address(&store, Some("2"), form("Gym", "Fountain Sq")).unwrap();

        assert_eq!(saved.id, "2");
        assert_eq!(saved.kind, AddressKind::Other);
        assert_eq!(saved.address, "Fountain Sq");
        assert_eq!(list_addresses(&store).len(), 2);
    }

    #[test]
    fn test_blank_fields_rejected() {
        let store = StoreState::new();

        let err = save_address(&store, None, form("", "  ")).unwrap_err();

        let fields = err.fields.unwrap();
        assert_eq!(fields.get("title"), Some("Please fill in all fields."));
        assert_eq!(fields.get("address"), Some("Please fill in all fields."));
        assert_eq!(list_addresses(&store).len(), 2);
    }

    #[test]
    fn test_edit_missing_address() {
        let store = StoreState::new();
        let err = save_address(&store, Some("gone"), form("Home", "x")).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_delete_default_promotes_next() {
        let store = StoreState::new();

        let remaining = delete_address(&store, "1");

        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].is_default);
    }

    #[test]
    fn test_set_default_is_exclusive() {
        let store = StoreState::new();

        let addresses = set_default_address(&store, "2").unwrap();

        let defaults: Vec<_> = addresses.iter().filter(|a| a.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, "2");
    }
}

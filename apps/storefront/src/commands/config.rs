//! # Config Commands
//!
//! Retrieving the storefront configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current storefront configuration.
///
/// ## When Used
/// - App startup (currency, platform)
/// - Price formatting in the shell
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_serializes() {
        let json = serde_json::to_value(get_config(&ConfigState::default())).unwrap();
        assert_eq!(json["currency"], "AZN");
        assert_eq!(json["delivery_fee_cents"], 500);
        assert_eq!(json["platform"], "native");
    }
}

//! # Account Commands
//!
//! Sign-up, the profile and settings screens, and the contact form.
//!
//! ## Where Identity Lives
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   StoreState (AppState)            DbState (userData blob)              │
//! │   ─────────────────────            ───────────────────────              │
//! │   user_name   ◄──── hydrate ─────  fullName                             │
//! │   user_email  ◄──── hydrate ─────  email                                │
//! │                                    password                             │
//! │                                    orders                               │
//! │                                                                         │
//! │   sign_up / save_profile write both sides.                             │
//! │   change_password only touches the blob.                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage Failures
//! Sign-up and profile saves log a failed write and carry on with the
//! in-memory change. A failed password change is reported, since the user
//! would otherwise believe the new password took.

use bloomy_core::validation::{
    validate_contact_message, validate_password_change, validate_profile, validate_sign_up,
};
use bloomy_core::{GUEST_EMAIL, GUEST_NAME};
use bloomy_db::PasswordChange;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::{ApiError, ErrorCode};
use crate::state::{DbState, StoreState};

pub const MSG_PASSWORD_INCORRECT: &str = "Current password is incorrect.";
pub const MSG_PASSWORD_FAILED: &str = "Failed to update password.";
pub const MSG_PASSWORD_CHANGED: &str = "Password changed successfully!";
pub const MSG_CONTACT_SENT: &str = "Message sent successfully! We will get back to you soon.";

/// Identity and preferences shown on the profile screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_name: String,
    pub user_email: String,
    pub is_dark_mode: bool,
}

impl Profile {
    fn current(store: &StoreState) -> Self {
        store.with_store(|s| Profile {
            user_name: s.user_name().to_string(),
            user_email: s.user_email().to_string(),
            is_dark_mode: s.is_dark_mode(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Creates the device's account.
///
/// ## Behavior
/// - Validates the form (all required, Gmail address only)
/// - Overwrites the `userData` blob, dropping any earlier order history
/// - Switches the store from the guest identity to the new one
pub async fn sign_up(
    store: &StoreState,
    db: &DbState,
    form: SignUpForm,
) -> Result<Profile, ApiError> {
    debug!(email = %form.email, "sign_up command");

    validate_sign_up(&form.full_name, &form.email, &form.password)?;

    let full_name = form.full_name.trim();
    let email = form.email.trim();

    if let Err(e) = db.user_data().register(full_name, email, &form.password).await {
        error!("Failed to save user data: {}", e);
    }

    store.with_store_mut(|s| {
        s.set_user_name(full_name);
        s.set_user_email(email);
    });

    info!(email = %email, "Signed up");
    Ok(Profile::current(store))
}

/// Fills the store's identity from the `userData` blob.
///
/// Only guest defaults are replaced, so a name edited in this session wins
/// over what is stored.
pub async fn hydrate_profile(store: &StoreState, db: &DbState) -> Profile {
    debug!("hydrate_profile command");

    match db.user_data().load().await {
        Ok(data) => store.with_store_mut(|s| {
            if let Some(name) = data.full_name.filter(|_| s.user_name() == GUEST_NAME) {
                s.set_user_name(name);
            }
            if let Some(email) = data.email.filter(|_| s.user_email() == GUEST_EMAIL) {
                s.set_user_email(email);
            }
        }),
        Err(e) => error!("Failed to load user data: {}", e),
    }

    Profile::current(store)
}

pub fn get_profile(store: &StoreState) -> Profile {
    debug!("get_profile command");
    Profile::current(store)
}

/// Saves the edit-profile sheet.
pub async fn save_profile(
    store: &StoreState,
    db: &DbState,
    full_name: &str,
    email: &str,
) -> Result<Profile, ApiError> {
    debug!(email = %email, "save_profile command");

    validate_profile(full_name, email)?;

    let full_name = full_name.trim();
    let email = email.trim();

    store.with_store_mut(|s| {
        s.set_user_name(full_name);
        s.set_user_email(email);
    });

    if let Err(e) = db.user_data().update_profile(full_name, email).await {
        error!("Failed to save user data: {}", e);
    }

    Ok(Profile::current(store))
}

/// Changes the stored password.
///
/// ## Errors
/// - VALIDATION_ERROR for blank fields or a confirmation mismatch
/// - VALIDATION_ERROR on `currentPassword` when it doesn't match
/// - DATABASE_ERROR "Failed to update password." when storage fails
///
/// ## Returns
/// The success message for the alert
pub async fn change_password(db: &DbState, form: PasswordForm) -> Result<String, ApiError> {
    debug!("change_password command");

    validate_password_change(
        &form.current_password,
        &form.new_password,
        &form.confirm_password,
    )?;

    match db
        .user_data()
        .change_password(&form.current_password, &form.new_password)
        .await
    {
        Ok(PasswordChange::Changed) => {
            info!("Password changed");
            Ok(MSG_PASSWORD_CHANGED.to_string())
        }
        Ok(PasswordChange::IncorrectCurrent) => {
            Err(ApiError::field("currentPassword", MSG_PASSWORD_INCORRECT))
        }
        Err(e) => {
            error!("Failed to update password: {}", e);
            Err(ApiError::new(ErrorCode::DatabaseError, MSG_PASSWORD_FAILED))
        }
    }
}

pub fn set_dark_mode(store: &StoreState, enabled: bool) -> Profile {
    debug!(enabled = %enabled, "set_dark_mode command");
    store.with_store_mut(|s| s.set_dark_mode(enabled));
    Profile::current(store)
}

/// Sends the contact form. Nothing leaves the device; the message is
/// logged and acknowledged.
pub fn send_contact_message(message: &str) -> Result<String, ApiError> {
    debug!("send_contact_message command");

    let message = validate_contact_message(message)?;
    info!(chars = message.chars().count(), "Contact message received");

    Ok(MSG_CONTACT_SENT.to_string())
}

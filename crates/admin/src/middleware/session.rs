//! Session middleware configuration.
//!
//! In-memory sessions via tower-sessions; the admin panel has no database
//! of its own.

use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::{AdminConfig, ConfigError, signing_key};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "dw_admin_session";

/// Session expiry time in seconds (8 hours; admin sessions stay short).
const SESSION_EXPIRY_SECONDS: i64 = 8 * 60 * 60;

/// Create the session layer with the in-memory store.
///
/// # Errors
///
/// Returns an error if the configured session secret cannot be used as
/// cookie signing key material.
pub fn create_session_layer(
    config: &AdminConfig,
) -> Result<SessionManagerLayer<MemoryStore, SignedCookie>, ConfigError> {
    let store = MemoryStore::default();
    let key = signing_key(&config.session_secret, "ADMIN_SESSION_SECRET")?;

    let is_secure = config.base_url.starts_with("https://");

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}

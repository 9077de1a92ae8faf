//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use driftwood_catalog::AuthSession;
use driftwood_core::ADMIN_ROLE;

/// Session-stored user identity.
///
/// Holds the catalog API bearer token alongside the display fields; the
/// session store lives server-side, so the token never reaches the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Catalog API user ID.
    pub id: String,
    /// User's email address.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Role strings from the catalog API.
    pub roles: Vec<String>,
    /// Bearer token for authenticated catalog calls.
    pub token: String,
}

impl CurrentUser {
    /// Whether this user may access the admin panel.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}

impl From<AuthSession> for CurrentUser {
    fn from(session: AuthSession) -> Self {
        Self {
            id: session.user.id,
            email: session.user.email,
            full_name: session.user.full_name,
            roles: session.user.roles,
            token: session.token,
        }
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

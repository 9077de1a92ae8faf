//! Session-related types.

use serde::{Deserialize, Serialize};

use driftwood_catalog::AuthSession;

/// Session-stored admin identity.
///
/// Only users whose token still carries the admin role get past the guard;
/// the token itself stays server-side in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Catalog API user ID.
    pub id: String,
    /// Admin's email address.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Bearer token for authenticated catalog calls.
    pub token: String,
}

impl From<AuthSession> for CurrentAdmin {
    fn from(session: AuthSession) -> Self {
        Self {
            id: session.user.id,
            email: session.user.email,
            full_name: session.user.full_name,
            token: session.token,
        }
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

//! Admin authentication extractor.
//!
//! Unlike the storefront's session-only check, entering any admin page
//! re-validates the stored bearer token against the catalog API and requires
//! the admin role on the refreshed user. A token revoked or demoted on the
//! API side locks the panel on the next request.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};
use crate::state::AppState;

/// Extractor that requires a logged-in admin with a live token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.full_name)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

/// Error returned when admin authentication fails.
pub enum AdminRejection {
    /// Not logged in, or the token no longer validates.
    RedirectToLogin,
    /// Logged in, but the account lacks the admin role.
    Forbidden,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Forbidden => {
                (StatusCode::FORBIDDEN, "Admin access required").into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminRejection::RedirectToLogin)?;

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or(AdminRejection::RedirectToLogin)?;

        // Re-validate the token against the API on every admin page entry
        let refreshed = state.catalog().check_status(&admin.token).await.map_err(|e| {
            tracing::warn!("Admin session check failed: {e}");
            AdminRejection::RedirectToLogin
        })?;

        if !refreshed.user.is_admin() {
            return Err(AdminRejection::Forbidden);
        }

        // The API may rotate the token on check; keep the session current
        let refreshed_admin = CurrentAdmin::from(refreshed);
        if refreshed_admin.token != admin.token
            && let Err(e) = set_current_admin(&session, &refreshed_admin).await
        {
            tracing::warn!("Failed to refresh admin session: {e}");
        }

        Ok(Self(refreshed_admin))
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}

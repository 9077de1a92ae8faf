//! Catalog API user types.

use serde::{Deserialize, Serialize};

/// Role string that grants access to the admin panel.
pub const ADMIN_ROLE: &str = "admin";

/// An authenticated catalog API user.
///
/// Returned by the auth endpoints and embedded in products as the record's
/// owner. The catalog API is the source of truth; this is a plain mirror of
/// its wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: String,
    /// User's email address.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Whether the account is active.
    #[serde(default)]
    pub is_active: bool,
    /// Role strings (e.g., "user", "admin").
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    /// Whether this user may access the admin panel.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> User {
        User {
            id: "u1".to_string(),
            email: "test@driftwoodsupply.co".to_string(),
            full_name: "Test User".to_string(),
            is_active: true,
            roles: roles.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(user(&["user", "admin"]).is_admin());
        assert!(!user(&["user"]).is_admin());
        assert!(!user(&[]).is_admin());
    }

    #[test]
    fn test_user_wire_shape() {
        let json = serde_json::json!({
            "id": "u1",
            "email": "test@driftwoodsupply.co",
            "fullName": "Test User",
            "isActive": true,
            "roles": ["user"]
        });

        let user: User = serde_json::from_value(json).expect("valid user");
        assert_eq!(user.full_name, "Test User");
        assert!(user.is_active);
    }
}

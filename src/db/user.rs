//! Identity records stored in the credential store.

/// A registered user.
///
/// `password` holds the Argon2 hash and must never leave the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login email (unique, case-insensitive).
    pub email: String,
    /// Password hash (Argon2 PHC string).
    pub password: String,
    /// Whether the user is an administrator.
    pub is_admin: bool,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Password hash (must be pre-hashed).
    pub password: String,
    /// Administrator flag (defaults to false).
    pub is_admin: bool,
}

impl NewUser {
    /// Create a regular (non-admin) user.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password_hash.into(),
            is_admin: false,
        }
    }

    /// Mark the new user as an administrator.
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

/// Profile changes for an existing user.
///
/// The admin flag is deliberately absent: profile updates cannot change it.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New login email.
    pub email: Option<String>,
    /// New password hash.
    pub password: Option<String>,
}

impl UserUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set new email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set new password hash.
    pub fn password(mut self, password_hash: impl Into<String>) -> Self {
        self.password = Some(password_hash.into());
        self
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_to_non_admin() {
        let user = NewUser::new("Ana", "ana@example.com", "hash");
        assert!(!user.is_admin);
        assert!(user.admin().is_admin);
    }

    #[test]
    fn test_user_update_builder() {
        let update = UserUpdate::new().name("New Name").password("newhash");

        assert_eq!(update.name.as_deref(), Some("New Name"));
        assert_eq!(update.password.as_deref(), Some("newhash"));
        assert!(update.email.is_none());
        assert!(!update.is_empty());
    }

    #[test]
    fn test_user_update_empty() {
        assert!(UserUpdate::new().is_empty());
    }
}

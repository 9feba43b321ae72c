//! Credential checking for the login endpoint.

use std::sync::OnceLock;

use tracing::{debug, info, warn};

use super::password::{hash_password, needs_rehash, verify_password};
use crate::db::{CredentialStore, User};
use crate::{DealershipError, Result};

/// Hash verified against when the email is unknown, so that both failure
/// paths do the same amount of work.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("dealership-dummy-password").ok())
        .as_deref()
}

/// Check an email/password pair.
///
/// Returns `Ok(None)` for both an unknown email and a wrong password; the
/// caller must not be able to tell them apart. A stored hash with outdated
/// parameters is replaced after a successful check.
pub async fn check_credentials<S>(store: &S, email: &str, password: &str) -> Result<Option<User>>
where
    S: CredentialStore + ?Sized,
{
    let Some(user) = store.find_by_email(email).await? else {
        if let Some(hash) = dummy_hash() {
            let _ = verify_password(password, hash);
        }
        debug!("Login failed: unknown email");
        return Ok(None);
    };

    let matches = verify_password(password, &user.password).map_err(|e| {
        warn!(user_id = user.id, "Stored password hash is unreadable: {}", e);
        DealershipError::Internal(e.to_string())
    })?;

    if !matches {
        debug!(user_id = user.id, "Login failed: wrong password");
        return Ok(None);
    }

    if needs_rehash(&user.password) {
        match hash_password(password) {
            Ok(new_hash) => {
                store.update_password_hash(user.id, &new_hash).await?;
                info!(user_id = user.id, "Password hash upgraded");
            }
            Err(e) => warn!(user_id = user.id, "Password rehash failed: {}", e),
        }
    }

    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;
    use argon2::password_hash::{PasswordHasher, SaltString};
    use argon2::{Algorithm, Argon2, Params, Version};
    use rand_core::OsRng;

    #[tokio::test]
    async fn test_check_credentials() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let hash = hash_password("correct_password").unwrap();
        repo.create(&NewUser::new("Ana", "ana@example.com", hash))
            .await
            .unwrap();

        let ok = check_credentials(&repo, "ana@example.com", "correct_password")
            .await
            .unwrap();
        assert_eq!(ok.unwrap().email, "ana@example.com");

        let wrong = check_credentials(&repo, "ana@example.com", "wrong_password")
            .await
            .unwrap();
        assert!(wrong.is_none());

        let unknown = check_credentials(&repo, "nobody@example.com", "correct_password")
            .await
            .unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_check_credentials_upgrades_old_hash() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let params = Params::new(8192, 1, 1, None).unwrap();
        let salt = SaltString::generate(&mut OsRng);
        let old_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(b"legacy_password", &salt)
            .unwrap()
            .to_string();
        let user = repo
            .create(&NewUser::new("Old", "old@example.com", old_hash.clone()))
            .await
            .unwrap();

        assert!(check_credentials(&repo, "old@example.com", "legacy_password")
            .await
            .unwrap()
            .is_some());

        let stored = repo.get_by_id(user.id).await.unwrap().unwrap().password;
        assert_ne!(stored, old_hash);
        assert!(!needs_rehash(&stored));
        assert!(verify_password("legacy_password", &stored).unwrap());
    }

    #[tokio::test]
    async fn test_check_credentials_corrupt_hash_is_internal() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        repo.create(&NewUser::new("Bad", "bad@example.com", "plaintext"))
            .await
            .unwrap();

        let result = check_credentials(&repo, "bad@example.com", "plaintext").await;
        assert!(matches!(result, Err(DealershipError::Internal(_))));
    }
}

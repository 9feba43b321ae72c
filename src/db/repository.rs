//! User repository.
//!
//! CRUD operations over the `users` table, plus the constraint-error
//! mapping shared by every repository in the crate.

use sqlx::QueryBuilder;

use super::user::{NewUser, User, UserUpdate};
use super::DbPool;
use crate::{DealershipError, Result};

const USER_COLUMNS: &str = "id, name, email, password, is_admin, created_at, updated_at";

/// Map an insert/update error, turning constraint violations into domain errors.
///
/// Unique violations become `Conflict`, foreign-key violations become
/// `Validation` (the row points at something that does not exist).
pub fn map_constraint_error(e: sqlx::Error, entity: &str) -> DealershipError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return DealershipError::Conflict(format!("{entity} already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return DealershipError::Validation(format!("{entity} references a missing record"));
        }
    }
    DealershipError::Database(e.to_string())
}

/// Map a delete error; a foreign-key violation means the row is still referenced.
pub(crate) fn map_delete_error(e: sqlx::Error, entity: &str) -> DealershipError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return DealershipError::Conflict(format!("{entity} is still referenced"));
        }
    }
    DealershipError::Database(e.to_string())
}

/// Result of deleting through the non-admin path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonAdminDelete {
    /// The user was removed.
    Deleted,
    /// No user with that ID.
    NotFound,
    /// The target is an administrator and was left untouched.
    IsAdmin,
}

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// Returns `Conflict` when the email is already registered.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password, is_admin) VALUES (?, ?, ?, ?)",
        )
        .bind(new_user.name.trim())
        .bind(new_user.email.trim())
        .bind(&new_user.password)
        .bind(new_user.is_admin)
        .execute(self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "email"))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DealershipError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ? COLLATE NOCASE");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email.trim())
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// List users ordered by ID.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ? OFFSET ?");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Check whether at least one administrator exists.
    pub async fn admin_exists(&self) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE is_admin = 1)")
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }

    /// Update a user by ID.
    ///
    /// Only fields set in the update are modified. Returns `None` if the
    /// user does not exist.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE users SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.trim().to_string());
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email.trim().to_string());
        }
        if let Some(ref password) = update.password {
            separated.push("password = ");
            separated.push_bind_unseparated(password);
        }
        separated.push("updated_at = datetime('now')");

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "email"))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Replace the password hash of a user.
    ///
    /// Returns false if the user does not exist.
    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET password = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(password_hash)
        .bind(id)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user only if it is not an administrator.
    ///
    /// The admin check and the delete are a single statement.
    pub async fn delete_non_admin(&self, id: i64) -> Result<NonAdminDelete> {
        let result = sqlx::query("DELETE FROM users WHERE id = ? AND is_admin = 0")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_delete_error(e, "user"))?;

        if result.rows_affected() > 0 {
            return Ok(NonAdminDelete::Deleted);
        }

        Ok(match self.get_by_id(id).await? {
            Some(_) => NonAdminDelete::IsAdmin,
            None => NonAdminDelete::NotFound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_user() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("Ana", "ana@example.com", "hash"))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@example.com");
        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn test_create_admin() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        assert!(!repo.admin_exists().await.unwrap());
        let admin = repo
            .create(&NewUser::new("Root", "root@example.com", "hash").admin())
            .await
            .unwrap();

        assert!(admin.is_admin);
        assert!(repo.admin_exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_duplicate_email_is_conflict() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("Ana", "ana@example.com", "hash"))
            .await
            .unwrap();
        let result = repo
            .create(&NewUser::new("Other", "ANA@example.com", "hash"))
            .await;

        assert!(matches!(result, Err(DealershipError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_by_email_case_insensitive() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let created = repo
            .create(&NewUser::new("Ana", "Ana@Example.com", "hash"))
            .await
            .unwrap();

        let found = repo.get_by_email(" ana@example.com ").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.get_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        for i in 0..7 {
            repo.create(&NewUser::new(format!("User {i}"), format!("u{i}@example.com"), "hash"))
                .await
                .unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 7);
        let page = repo.list(5, 5).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "User 5");
    }

    #[tokio::test]
    async fn test_update_user() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("Ana", "ana@example.com", "hash"))
            .await
            .unwrap();

        let updated = repo
            .update(user.id, &UserUpdate::new().name("Ana Maria"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.email, "ana@example.com");
        assert_eq!(updated.password, "hash");
        assert!(!updated.is_admin);
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let result = repo.update(999, &UserUpdate::new().name("X")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_email_conflict() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("Ana", "ana@example.com", "hash"))
            .await
            .unwrap();
        let bob = repo
            .create(&NewUser::new("Bob", "bob@example.com", "hash"))
            .await
            .unwrap();

        let result = repo
            .update(bob.id, &UserUpdate::new().email("ana@example.com"))
            .await;
        assert!(matches!(result, Err(DealershipError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_password() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("Ana", "ana@example.com", "old"))
            .await
            .unwrap();

        assert!(repo.update_password(user.id, "new").await.unwrap());
        assert_eq!(repo.get_by_id(user.id).await.unwrap().unwrap().password, "new");
        assert!(!repo.update_password(999, "new").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_non_admin() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let admin = repo
            .create(&NewUser::new("Root", "root@example.com", "hash").admin())
            .await
            .unwrap();
        let member = repo
            .create(&NewUser::new("Ana", "ana@example.com", "hash"))
            .await
            .unwrap();

        assert_eq!(
            repo.delete_non_admin(admin.id).await.unwrap(),
            NonAdminDelete::IsAdmin
        );
        assert!(repo.get_by_id(admin.id).await.unwrap().is_some());

        assert_eq!(
            repo.delete_non_admin(member.id).await.unwrap(),
            NonAdminDelete::Deleted
        );
        assert_eq!(
            repo.delete_non_admin(member.id).await.unwrap(),
            NonAdminDelete::NotFound
        );
    }
}

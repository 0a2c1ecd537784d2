//! User repository trait and implementation

use crate::error::{LibraryError, Result};
use crate::models::User;
use async_trait::async_trait;
use sqlx::{query_as, SqlitePool};

/// User repository interface for data access operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by username (case-insensitive)
    ///
    /// # Returns
    /// - `Ok(Some(user))` if found
    /// - `Ok(None)` if not found
    /// - `Err` if database error occurs
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Insert a new user
    ///
    /// # Errors
    /// Returns error if:
    /// - A user with the same username already exists
    /// - User validation fails
    /// - Database error occurs
    async fn insert(&self, user: &User) -> Result<()>;

    /// Count total users
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new SQLite user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn insert(&self, user: &User) -> Result<()> {
        user.validate().map_err(|msg| LibraryError::InvalidInput {
            field: "user".to_string(),
            message: msg,
        })?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, name, email, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

//! User Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_id};
use crate::db::models::User;

pub const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let rid = parse_id(TABLE, id)?;
        let user: Option<User> = self.base.db().select(rid).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Does a user with this email or phone already exist?
    pub async fn email_or_phone_exists(&self, email: &str, phone: &str) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM user WHERE email = $email OR phone = $phone GROUP ALL")
            .bind(("email", email.to_string()))
            .bind(("phone", phone.to_string()))
            .await?;
        let counts: Vec<CountRow> = result.take(0)?;
        Ok(counts.first().map(|c| c.count).unwrap_or(0) > 0)
    }

    /// Create a new user record
    pub async fn create(&self, user: User) -> RepoResult<User> {
        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Paginated listing, oldest first
    ///
    /// Returns `(total_count, slice)`.
    pub async fn list(&self, start: i64, limit: i64) -> RepoResult<(u64, Vec<User>)> {
        let query = format!(
            "SELECT count() FROM user GROUP ALL;
             SELECT * FROM user ORDER BY created_at LIMIT {limit} START {start}"
        );
        let mut result = self.base.db().query(query).await?;
        let counts: Vec<CountRow> = result.take(0)?;
        let users: Vec<User> = result.take(1)?;
        Ok((counts.first().map(|c| c.count).unwrap_or(0), users))
    }

    /// Persist a freshly issued token pair, overwriting the stored pair
    pub async fn store_tokens(
        &self,
        id: &RecordId,
        token: &str,
        refresh_token: &str,
    ) -> RepoResult<()> {
        let patch = serde_json::json!({
            "token": token,
            "refresh_token": refresh_token,
            "updated_at": chrono::Utc::now(),
        });
        let _: Option<User> = self.base.db().update(id.clone()).merge(patch).await?;
        Ok(())
    }
}

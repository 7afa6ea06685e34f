//! User repository contract and its relational implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set,
};

use super::constraint::UniqueViolation;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::error::{storage_failure, RepoError, RepoResult};
use crate::config::USERS_EMAIL_CONSTRAINT;
use crate::domain::{NewUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const COMPONENT: &str = "user_store";

/// User storage capability.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user; `RepoError::DuplicateEmail` if the email is taken
    async fn create(&self, user: NewUser) -> RepoResult<User>;

    /// Find a user by exact email
    async fn get_by_email(&self, email: &str) -> RepoResult<User>;

    /// Find a user by identifier
    async fn get_by_id(&self, id: i64) -> RepoResult<User>;
}

/// Relational user store.
///
/// Email uniqueness is enforced by the `users_email_key` constraint.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map an insert failure: email uniqueness violations become `DuplicateEmail`.
fn classify_insert_error(err: DbErr) -> RepoError {
    match UniqueViolation::from_db_err(&err) {
        Some(violation) if violation.concerns(USERS_EMAIL_CONSTRAINT, "users", "email") => {
            tracing::debug!(component = COMPONENT, "email already in use");
            RepoError::DuplicateEmail
        }
        _ => storage_failure(COMPONENT, "create")(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: NewUser) -> RepoResult<User> {
        tracing::debug!(component = COMPONENT, "inserting user");

        let now = Utc::now();
        let model = ActiveModel {
            id: NotSet,
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(classify_insert_error)?;

        Ok(User::from(model))
    }

    async fn get_by_email(&self, email: &str) -> RepoResult<User> {
        tracing::debug!(component = COMPONENT, "selecting user by email");

        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(storage_failure(COMPONENT, "get_by_email"))?
            .map(User::from)
            .ok_or(RepoError::NotFound)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<User> {
        tracing::debug!(component = COMPONENT, id, "selecting user by id");

        UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(storage_failure(COMPONENT, "get_by_id"))?
            .map(User::from)
            .ok_or(RepoError::NotFound)
    }
}

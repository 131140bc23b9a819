//! User repository for staff account and credential operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use innkeep_core::auth::{hash_password, verify_password, PasswordError};

use crate::entities::{users, sea_orm_active_enums::UserRole};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(i64),

    /// Username already registered.
    #[error("Username {0} is already taken")]
    DuplicateUsername(String),

    /// Email already registered.
    #[error("Email {0} is already registered")]
    DuplicateEmail(String),

    /// Wrong username or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account is deactivated.
    #[error("Account {0} is inactive")]
    Inactive(String),

    /// Password hashing failed.
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a staff account.
#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Role.
    pub role: UserRole,
}

/// User repository for accounts and login.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a staff account with an Argon2id password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the username or email is taken, hashing fails,
    /// or the database operation fails.
    pub async fn register(&self, input: RegisterUserInput) -> Result<users::Model, UserError> {
        let by_username = users::Entity::find()
            .filter(users::Column::Username.eq(input.username.as_str()))
            .one(&self.db)
            .await?;
        if by_username.is_some() {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let by_email = users::Entity::find()
            .filter(users::Column::Email.eq(input.email.as_str()))
            .one(&self.db)
            .await?;
        if by_email.is_some() {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = hash_password(&input.password)?;
        let now = Utc::now().into();

        let user = users::ActiveModel {
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(password_hash),
            full_name: Set(input.full_name),
            role: Set(input.role),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = user.insert(&self.db).await?;
        Ok(result)
    }

    /// Verifies a username/password pair, returning the account on success.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` for unknown usernames and wrong
    /// passwords alike, `Inactive` for deactivated accounts, and passes
    /// through database errors.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<users::Model, UserError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(UserError::Inactive(user.username));
        }

        Ok(user)
    }

    /// Gets a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found or the query fails.
    pub async fn get_user(&self, id: i64) -> Result<users::Model, UserError> {
        let user = users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(id))?;
        Ok(user)
    }

    /// Finds a user by username, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, UserError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(user)
    }
}

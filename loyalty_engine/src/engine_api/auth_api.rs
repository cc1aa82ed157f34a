use std::fmt::Debug;

use log::*;

use crate::{db_types::User, AuthApiError, AuthManagement};

/// `AuthApi` registers users and checks their credentials. Passwords are stored as bcrypt hashes.
pub struct AuthApi<B> {
    db: B,
    hash_cost: u32,
}

impl<B: Debug> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?})", self.db)
    }
}

impl<B> AuthApi<B>
where B: AuthManagement
{
    pub fn new(db: B) -> Self {
        Self { db, hash_cost: bcrypt::DEFAULT_COST }
    }

    /// Overrides the bcrypt work factor. Low costs are only appropriate for tests.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub async fn register(&self, login: &str, password: &str) -> Result<User, AuthApiError> {
        if login.trim().is_empty() || password.is_empty() {
            return Err(AuthApiError::EmptyCredentials);
        }
        let hash = hash_password(password, self.hash_cost).await?;
        let user = self.db.create_user(login.trim(), &hash).await?;
        info!("🧑️ New user registered: {} (#{})", user.login, user.id);
        Ok(user)
    }

    /// Returns the user if the password matches. Unknown logins and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<User, AuthApiError> {
        let user = self.db.fetch_user_by_login(login.trim()).await?.ok_or_else(|| {
            debug!("🧑️ Login attempt for unknown user {login}");
            AuthApiError::InvalidCredentials
        })?;
        if verify_password(password, &user.password_hash).await? {
            trace!("🧑️ User #{} authenticated", user.id);
            Ok(user)
        } else {
            debug!("🧑️ Wrong password for user #{}", user.id);
            Err(AuthApiError::InvalidCredentials)
        }
    }
}

async fn hash_password(password: &str, cost: u32) -> Result<String, AuthApiError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthApiError::PasswordHashError(e.to_string()))?
        .map_err(AuthApiError::from)
}

async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthApiError> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthApiError::PasswordHashError(e.to_string()))?
        .map_err(AuthApiError::from)
}

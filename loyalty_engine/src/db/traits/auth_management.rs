use std::future::Future;

use crate::{db_types::User, AuthApiError};

/// The `AuthManagement` trait defines storage of user credentials. Password hashing is done by
/// [`crate::AuthApi`], so backends only ever see hashes.
pub trait AuthManagement {
    /// Creates a new user. Fails with [`AuthApiError::LoginAlreadyExists`] if the login is taken.
    fn create_user(&self, login: &str, password_hash: &str) -> impl Future<Output = Result<User, AuthApiError>> + Send;

    fn fetch_user_by_login(&self, login: &str) -> impl Future<Output = Result<Option<User>, AuthApiError>> + Send;
}

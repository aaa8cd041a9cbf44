use async_trait::async_trait;
use thiserror::Error;

use crate::storage::StorageError;
use crate::token::Token;

/// Login failures
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Please fill all fields.")]
    MissingFields,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("could not persist session: {0}")]
    Storage(#[from] StorageError),
}

/// Credential check behind the login form. The demo implementation lives
/// in-process; a real backend would be another implementation of this.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Token, AuthError>;
}

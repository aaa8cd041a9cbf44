use std::time::Duration;

use async_trait::async_trait;

use crate::auth::{AuthError, AuthService};
use crate::token::{encode_credentials, Token};

/// Email of the built-in demo account
pub const DEMO_EMAIL: &str = "test@demo.com";
/// Password of the built-in demo account
pub const DEMO_PASSWORD: &str = "password";
/// Fixed token issued to the demo account
pub const DEMO_TOKEN: &str = "demo-token-123";

/// Accepts the demo account plus any non-empty credential pair, after a
/// fixed simulated network delay.
#[derive(Debug, Clone)]
pub struct DemoAuth {
    delay: Duration,
}

impl DemoAuth {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(600);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for DemoAuth {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl AuthService for DemoAuth {
    async fn login(&self, email: &str, password: &str) -> Result<Token, AuthError> {
        tokio::time::sleep(self.delay).await;

        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            return Ok(Token::new(DEMO_TOKEN));
        }
        if !email.is_empty() && !password.is_empty() {
            return Ok(encode_credentials(email, password));
        }
        Err(AuthError::InvalidCredentials)
    }
}

// ============================
// crates/backend-lib/src/token.rs
// ============================
//! Demo session token codec.
//!
//! A token is the standard base64 encoding of `email:password`. It is a
//! reversible placeholder, not a security token; a real deployment would
//! receive an opaque token from its authentication backend instead.

use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use ridesafe_common::Identity;
use thiserror::Error;

/// Display name used when the email has no local part
pub const FALLBACK_NAME: &str = "Rider";
/// Email shown when a stored token cannot be decoded
pub const FALLBACK_EMAIL: &str = "user@demo.com";

/// Accepts input with or without trailing `=` padding and ignores
/// non-zero bits in the final symbol, as browsers' `atob` does.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Opaque session token as stored under the `auth_token` key
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens embed the password, keep them out of logs.
impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(..)")
    }
}

/// Why a stored token could not be read back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not valid base64")]
    Base64,

    #[error("decoded token is not valid UTF-8")]
    Utf8,
}

/// Contents of a decoded token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    decoded: String,
}

impl DecodedToken {
    /// Everything before the first `:`, or the whole string without one
    pub fn email(&self) -> &str {
        self.decoded
            .split_once(':')
            .map_or(self.decoded.as_str(), |(email, _)| email)
    }

    pub fn into_identity(self) -> Identity {
        let email = self.email();
        let local = email.split('@').next().unwrap_or_default();
        let name = if local.is_empty() { FALLBACK_NAME } else { local };
        Identity {
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}

/// Encode a credential pair into a token
pub fn encode_credentials(email: &str, password: &str) -> Token {
    Token(STANDARD.encode(format!("{email}:{password}")))
}

/// Decode a token. ASCII whitespace is ignored and padding is optional.
pub fn decode_token(token: &str) -> Result<DecodedToken, TokenError> {
    let compact: String = token.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LENIENT.decode(compact).map_err(|_| TokenError::Base64)?;
    let decoded = String::from_utf8(bytes).map_err(|_| TokenError::Utf8)?;
    Ok(DecodedToken { decoded })
}

/// Identity shown for tokens that cannot be decoded
pub fn fallback_identity() -> Identity {
    Identity {
        name: FALLBACK_NAME.to_string(),
        email: FALLBACK_EMAIL.to_string(),
    }
}

/// Project a token onto a display identity. Never fails: undecodable
/// tokens map to [`fallback_identity`].
pub fn identity_from_token(token: &str) -> Identity {
    match decode_token(token) {
        Ok(decoded) => decoded.into_identity(),
        Err(err) => {
            tracing::debug!(error = %err, "stored token not decodable, using fallback identity");
            fallback_identity()
        },
    }
}

//! Credential input model.
//!
//! The federation provider supports a single credential kind,
//! [`PASSWORD`]. Other kinds may still be presented by the host and
//! must be rejected without error.

use serde::{Deserialize, Serialize};

/// Credential type identifier for passwords.
pub const PASSWORD: &str = "password";

/// A credential presented by the host for validation or update.
///
/// ## Security Note
///
/// `value` holds the plaintext secret. It is never serialized and
/// never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialInput {
    /// Credential type (e.g., "password", "otp").
    pub credential_type: String,
    /// Plaintext value.
    #[serde(skip_serializing)]
    pub value: String,
}

impl CredentialInput {
    /// Creates a credential input of any type.
    #[must_use]
    pub fn new(credential_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            credential_type: credential_type.into(),
            value: value.into(),
        }
    }

    /// Creates a password credential input.
    #[must_use]
    pub fn password(value: impl Into<String>) -> Self {
        Self::new(PASSWORD, value)
    }

    /// Checks if this is a password credential.
    #[must_use]
    pub fn is_password(&self) -> bool {
        self.credential_type == PASSWORD
    }
}

impl std::fmt::Debug for CredentialInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialInput")
            .field("credential_type", &self.credential_type)
            .field("value", &"***")
            .finish()
    }
}

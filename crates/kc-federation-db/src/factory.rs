//! Provider factory.

use kc_federation::{ConfigProperty, ConfigPropertyType, FederationConfig, READ_ONLY_OPTION};

use crate::password::{PasswordHasherService, PasswordPolicy};
use crate::provider::DbUserStorageProvider;
use crate::session::StoreSession;

/// Provider type id.
pub const PROVIDER_ID: &str = "db-user-storage";

const HELP_TEXT: &str = "User storage provider backed by a relational database";

const READ_ONLY_HELP_TEXT: &str = "If set to ON, this provider is read-only, \
     users can not be added or deleted, and no user properties \
     or attributes can be modified.";

/// Creates [`DbUserStorageProvider`] instances and describes their options.
#[derive(Debug, Clone, Default)]
pub struct DbUserStorageProviderFactory {
    password_policy: PasswordPolicy,
}

impl DbUserStorageProviderFactory {
    /// Creates a factory using the default password policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `policy` for every password the created providers hash.
    #[must_use]
    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    /// Provider type id.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    /// Short description for the admin console.
    #[must_use]
    pub const fn help_text(&self) -> &'static str {
        HELP_TEXT
    }

    /// Options the provider understands.
    #[must_use]
    pub fn config_properties(&self) -> Vec<ConfigProperty> {
        vec![ConfigProperty {
            name: READ_ONLY_OPTION,
            label: "Read-only",
            property_type: ConfigPropertyType::Boolean,
            default_value: Some("true"),
            help_text: READ_ONLY_HELP_TEXT,
        }]
    }

    /// Creates a provider for one configured component.
    #[must_use]
    pub fn create(&self, config: FederationConfig, session: StoreSession) -> DbUserStorageProvider {
        let hasher = PasswordHasherService::new(self.password_policy.clone());
        DbUserStorageProvider::with_hasher(config, session, hasher)
    }
}

//! Attribute overlay.
//!
//! `firstName` and `lastName` are columns on the row; every other
//! attribute lives in the host's fallback attribute storage keyed by the
//! composite user id.

use std::collections::HashMap;

use kc_federation::FederationResult;
use kc_model::UserEntity;
use kc_storage::UserField;

use super::UserAdapter;

/// Attribute name of the first-name column.
pub const FIRST_NAME: &str = "firstName";

/// Attribute name of the last-name column.
pub const LAST_NAME: &str = "lastName";

/// An attribute stored in a dedicated column instead of fallback storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedicatedAttribute {
    /// `firstName`
    FirstName,
    /// `lastName`
    LastName,
}

impl DedicatedAttribute {
    /// All dedicated attributes.
    pub const ALL: [Self; 2] = [Self::FirstName, Self::LastName];

    /// Maps an attribute name to its column, if it has one.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            FIRST_NAME => Some(Self::FirstName),
            LAST_NAME => Some(Self::LastName),
            _ => None,
        }
    }

    /// Attribute name as the host knows it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => FIRST_NAME,
            Self::LastName => LAST_NAME,
        }
    }

    fn get(self, entity: &UserEntity) -> Option<&str> {
        match self {
            Self::FirstName => entity.first_name.as_deref(),
            Self::LastName => entity.last_name.as_deref(),
        }
    }

    fn field(self, value: Option<String>) -> UserField {
        match self {
            Self::FirstName => UserField::FirstName(value),
            Self::LastName => UserField::LastName(value),
        }
    }
}

impl UserAdapter {
    /// First value of an attribute.
    ///
    /// ## Errors
    ///
    /// Returns the store error if the fallback store fails.
    pub async fn first_attribute(&self, name: &str) -> FederationResult<Option<String>> {
        if let Some(dedicated) = DedicatedAttribute::from_name(name) {
            return Ok(dedicated.get(&self.entity).map(str::to_string));
        }
        let values = self
            .session
            .attributes
            .attribute(self.realm_id(), &self.id, name)
            .await?;
        Ok(values.into_iter().next())
    }

    /// All values of an attribute. A null dedicated column yields no values.
    ///
    /// ## Errors
    ///
    /// Returns the store error if the fallback store fails.
    pub async fn attribute_values(&self, name: &str) -> FederationResult<Vec<String>> {
        if let Some(dedicated) = DedicatedAttribute::from_name(name) {
            return Ok(dedicated
                .get(&self.entity)
                .map(str::to_string)
                .into_iter()
                .collect());
        }
        Ok(self
            .session
            .attributes
            .attribute(self.realm_id(), &self.id, name)
            .await?)
    }

    /// Fallback attributes merged with the dedicated columns.
    ///
    /// `firstName` and `lastName` are always present. A null column shows up
    /// as the key with an empty value list, and a column value replaces any
    /// fallback attribute of the same name.
    ///
    /// ## Errors
    ///
    /// Returns the store error if the fallback store fails.
    pub async fn attributes(&self) -> FederationResult<HashMap<String, Vec<String>>> {
        let mut attributes = self
            .session
            .attributes
            .attributes(self.realm_id(), &self.id)
            .await?;

        for dedicated in DedicatedAttribute::ALL {
            let values = dedicated
                .get(&self.entity)
                .map(|value| vec![value.to_string()])
                .unwrap_or_default();
            attributes.insert(dedicated.name().to_string(), values);
        }
        Ok(attributes)
    }

    /// Sets an attribute to a single value.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// or the store error if the write fails.
    pub async fn set_single_attribute(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> FederationResult<()> {
        self.set_attribute(name, vec![value.into()]).await
    }

    /// Sets all values of an attribute.
    ///
    /// Dedicated columns keep the first value; an empty list clears them.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// or the store error if the write fails.
    pub async fn set_attribute(&mut self, name: &str, values: Vec<String>) -> FederationResult<()> {
        if let Some(dedicated) = DedicatedAttribute::from_name(name) {
            let value = values.into_iter().next();
            return self
                .persist("set attribute", dedicated.field(value))
                .await;
        }

        self.guard.check("set attribute")?;
        self.session
            .attributes
            .set_attribute(self.realm_id(), &self.id, name, values)
            .await?;
        Ok(())
    }

    /// Removes an attribute. Dedicated columns are set to null.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// or the store error if the write fails.
    pub async fn remove_attribute(&mut self, name: &str) -> FederationResult<()> {
        if let Some(dedicated) = DedicatedAttribute::from_name(name) {
            return self
                .persist("remove attribute", dedicated.field(None))
                .await;
        }

        self.guard.check("remove attribute")?;
        self.session
            .attributes
            .remove_attribute(self.realm_id(), &self.id, name)
            .await?;
        Ok(())
    }
}

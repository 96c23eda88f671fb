//! Store Profile Model

use serde::{Deserialize, Serialize};

/// Company identity printed on invoice and KOT headers (singleton)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: "Restaurant".to_string(),
            address: String::new(),
            phone: None,
            email: None,
        }
    }
}

impl StoreProfile {
    /// Load the profile from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// | Environment variable | Field   |
    /// |----------------------|---------|
    /// | STORE_NAME           | name    |
    /// | STORE_ADDRESS        | address |
    /// | STORE_PHONE          | phone   |
    /// | STORE_EMAIL          | email   |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: std::env::var("STORE_NAME").unwrap_or(defaults.name),
            address: std::env::var("STORE_ADDRESS").unwrap_or(defaults.address),
            phone: std::env::var("STORE_PHONE").ok(),
            email: std::env::var("STORE_EMAIL").ok(),
        }
    }
}

/// Update payload for the profile
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreProfileUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl StoreProfile {
    /// Apply an update payload, leaving unset fields untouched.
    pub fn apply(&mut self, update: StoreProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial_update() {
        let mut profile = StoreProfile {
            name: "Old Name".to_string(),
            address: "Old Address".to_string(),
            phone: Some("111".to_string()),
            email: None,
        };
        profile.apply(StoreProfileUpdate {
            name: Some("New Name".to_string()),
            email: Some("a@b.c".to_string()),
            ..Default::default()
        });
        assert_eq!(profile.name, "New Name");
        assert_eq!(profile.address, "Old Address");
        assert_eq!(profile.phone.as_deref(), Some("111"));
        assert_eq!(profile.email.as_deref(), Some("a@b.c"));
    }
}

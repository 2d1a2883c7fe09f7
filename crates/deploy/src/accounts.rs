//! Named accounts: logical roles ("deployer", ...) bound to addresses.

use alloy_primitives::Address;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised when looking up a role
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Named account '{0}' is not configured for this network")]
    Unknown(String),
}

/// Role name to address mapping resolved for one network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NamedAccounts(BTreeMap<String, Address>);

impl NamedAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `role` to `address`, replacing any previous binding
    pub fn insert(&mut self, role: impl Into<String>, address: Address) {
        self.0.insert(role.into(), address);
    }

    /// Address bound to `role`
    pub fn get(&self, role: &str) -> Result<Address, AccountError> {
        self.0
            .get(role)
            .copied()
            .ok_or_else(|| AccountError::Unknown(role.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Address)> {
        self.0.iter().map(|(role, address)| (role.as_str(), address))
    }
}

impl<S: Into<String>> FromIterator<(S, Address)> for NamedAccounts {
    fn from_iter<I: IntoIterator<Item = (S, Address)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(role, address)| (role.into(), address)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_get_known_role() {
        let deployer = address!("6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0");
        let accounts: NamedAccounts = [("deployer", deployer)].into_iter().collect();

        assert_eq!(accounts.get("deployer").unwrap(), deployer);
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn test_get_unknown_role() {
        let accounts = NamedAccounts::new();

        assert!(accounts.is_empty());
        assert_eq!(
            accounts.get("deployer"),
            Err(AccountError::Unknown("deployer".to_string()))
        );
    }

    #[test]
    fn test_insert_replaces_binding() {
        let mut accounts = NamedAccounts::new();
        accounts.insert("deployer", Address::ZERO);
        accounts.insert("deployer", Address::repeat_byte(0x11));

        assert_eq!(accounts.get("deployer").unwrap(), Address::repeat_byte(0x11));
        assert_eq!(accounts.len(), 1);
    }
}

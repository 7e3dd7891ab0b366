//! Account address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// An account address, always prefixed with `0x`.
///
/// Ordered so registries and voter pools iterate deterministically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// The standard prefix for all addresses.
    pub const PREFIX: &'static str = "0x";

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics unless the string is `0x` followed by at least one character.
    pub fn new(raw: impl Into<String>) -> Self {
        let addr = Self(raw.into());
        assert!(addr.is_valid(), "address must be 0x followed by at least one character");
        addr
    }

    /// Fallible constructor for addresses coming from untrusted input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        let addr = Self(s);
        if addr.is_valid() {
            Ok(addr)
        } else {
            Err(TypesError::InvalidAddress(addr.0))
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

//! Domain identifier types with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tenant identifier newtype wrapper
///
/// The value stored in every ownership column (`user_id` and friends). Usually a
/// UUID, but the store compares it as text so any non-empty value is accepted.
///
/// # Examples
///
/// ```
/// use ferry::domain::ids::TenantId;
/// use std::str::FromStr;
///
/// let tenant_id = TenantId::from_str("0b9f3c4e-51a4-4a8e-9d7c-2f1e6a0b7c11").unwrap();
/// assert_eq!(tenant_id.as_str(), "0b9f3c4e-51a4-4a8e-9d7c-2f1e6a0b7c11");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a new TenantId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(TenantId)` if the ID is non-blank, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Tenant ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the tenant ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_valid() {
        let id = TenantId::new("tenant-1").unwrap();
        assert_eq!(id.as_str(), "tenant-1");
        assert_eq!(id.to_string(), "tenant-1");
        assert_eq!(id.into_inner(), "tenant-1");
    }

    #[test]
    fn test_tenant_id_empty() {
        assert!(TenantId::new("").is_err());
        assert!(TenantId::new("   ").is_err());
        assert!(TenantId::from_str("").is_err());
    }

    #[test]
    fn test_tenant_id_serde_transparent() {
        let id = TenantId::new("abc").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}

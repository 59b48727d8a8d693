//! Tenant types and profiles

use super::ids::TenantId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category of a tenant
///
/// Selects which export manifest applies. Every tag that is not recognised
/// (including a missing one) resolves to [`TenantType::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TenantType {
    /// Individual account
    #[default]
    Personal,
    /// Schools and tutoring businesses
    School,
    /// Companies with staff and projects
    Organization,
}

impl TenantType {
    /// The type used when a tenant has no (or an unknown) configuration
    pub const DEFAULT: TenantType = TenantType::Personal;

    /// All known tenant types
    pub const ALL: [TenantType; 3] = [
        TenantType::Personal,
        TenantType::School,
        TenantType::Organization,
    ];

    /// Resolves a stored tag, falling back to the default type
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry::domain::TenantType;
    ///
    /// assert_eq!(TenantType::from_tag(Some("school")), TenantType::School);
    /// assert_eq!(TenantType::from_tag(Some("SCHOOL ")), TenantType::School);
    /// assert_eq!(TenantType::from_tag(Some("spaceship")), TenantType::DEFAULT);
    /// assert_eq!(TenantType::from_tag(None), TenantType::DEFAULT);
    /// ```
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("personal") => TenantType::Personal,
            Some("school") => TenantType::School,
            Some("organization") | Some("organisation") => TenantType::Organization,
            Some(other) => {
                tracing::debug!(tag = %other, "Unknown tenant type, using default");
                TenantType::DEFAULT
            }
            None => TenantType::DEFAULT,
        }
    }

    /// The canonical tag for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantType::Personal => "personal",
            TenantType::School => "school",
            TenantType::Organization => "organization",
        }
    }
}

impl fmt::Display for TenantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tenant as listed by the tenant directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantProfile {
    /// Tenant identifier
    pub tenant_id: TenantId,

    /// Registered recipient address, if any
    pub email: Option<String>,

    /// Stored tenant type tag, if any
    pub tenant_type: Option<String>,
}

impl TenantProfile {
    /// Returns the recipient address when it is present and non-blank
    pub fn recipient(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Resolved tenant type
    pub fn resolved_type(&self) -> TenantType {
        TenantType::from_tag(self.tenant_type.as_deref())
    }
}

/// Caller identity resolved from a credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Tenant identifier of the caller
    pub tenant_id: TenantId,

    /// Address registered with the identity provider
    pub email: Option<String>,
}

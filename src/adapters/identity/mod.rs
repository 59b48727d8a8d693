//! Credential resolution
//!
//! Manual exports carry a bearer credential; the [`IdentityProvider`] turns it
//! into the caller's tenant ID and registered address.

pub mod http;

use crate::domain::{Identity, Result};
use async_trait::async_trait;

pub use http::HttpIdentityProvider;

/// Resolves a caller credential into an [`Identity`]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer credential
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::Unauthorized`] when the credential is rejected and
    /// [`FerryError::Identity`] when the provider cannot be reached or answers
    /// with something unreadable.
    ///
    /// [`FerryError::Unauthorized`]: crate::domain::FerryError::Unauthorized
    /// [`FerryError::Identity`]: crate::domain::FerryError::Identity
    async fn resolve(&self, credential: &str) -> Result<Identity>;
}

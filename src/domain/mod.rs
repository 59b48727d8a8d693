//! Domain models and types for Ferry.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`TenantId`])
//! - **Tenant model** ([`TenantType`], [`TenantProfile`], [`Identity`])
//! - **Export results** ([`ExportAttachment`], [`TenantExportResult`], [`SweepReport`])
//! - **Error types** ([`FerryError`], [`TableError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FerryError>`]. Table-level
//! failures use [`TableError`] so they can be collected without unwinding
//! the export of sibling tables:
//!
//! ```rust
//! use ferry::domain::{FerryError, Result, TableError};
//!
//! fn export() -> std::result::Result<usize, TableError> {
//!     Err(TableError::new("invoices", "permission denied"))
//! }
//!
//! fn example() -> Result<()> {
//!     if let Err(e) = export() {
//!         tracing::warn!(table = %e.table_name, "Table failed, continuing");
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod export;
pub mod ids;
pub mod result;
pub mod tenant;

// Re-export commonly used types for convenience
pub use errors::{FerryError, TableError};
pub use export::{ExportAttachment, Record, SweepEntry, SweepReport, TenantExportResult};
pub use ids::TenantId;
pub use result::Result;
pub use tenant::{Identity, TenantProfile, TenantType};

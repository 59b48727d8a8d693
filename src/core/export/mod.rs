//! Per-tenant export pipeline
//!
//! This module provides:
//! - Fetching one manifest entry's rows for a tenant ([`table`])
//! - CSV serialization of those rows ([`csv`])
//! - The job that runs a whole manifest and notifies the tenant ([`job`])

pub mod csv;
pub mod job;
pub mod table;

pub use self::csv::serialize_csv;
pub use job::TenantExportJob;
pub use table::export_table;

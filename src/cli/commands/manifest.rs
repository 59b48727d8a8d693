//! Manifest command implementation
//!
//! Prints the tables a tenant of a given type would receive, in export order.

use crate::core::manifest::{resolve_manifest, resolve_manifest_for_tag, Manifest};
use crate::domain::TenantType;
use clap::Args;

/// Arguments for the manifest command
#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Tenant type tag; unknown tags resolve like the export does. Omit to print every type
    #[arg(long)]
    pub tenant_type: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ManifestArgs {
    /// Execute the manifest command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let manifests: Vec<Manifest> = match &self.tenant_type {
            Some(tag) => vec![resolve_manifest_for_tag(Some(tag))],
            None => TenantType::ALL.into_iter().map(resolve_manifest).collect(),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&manifests)?);
            return Ok(0);
        }

        for manifest in &manifests {
            println!("📋 {} ({} tables)", manifest.tenant_type, manifest.len());
            for (position, entry) in manifest.entries.iter().enumerate() {
                println!("  {:>2}. {entry}", position + 1);
            }
            println!();
        }

        Ok(0)
    }
}

//! Manifest registry
//!
//! Which tables a tenant's export contains is static data: a list of entries
//! shared by every tenant type followed by the entries for the tenant's own
//! type. Adding a tenant type means adding a row to [`TYPE_TABLES`], not a
//! branch in the export code.

use crate::domain::{FerryError, Result, TenantType};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Owner column on a parent table for derived ownership
pub const PARENT_OWNER_COLUMN: &str = "user_id";

/// Key column on a parent table that children reference
pub const PARENT_KEY_COLUMN: &str = "id";

/// How the rows of a table are attributed to a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Ownership {
    /// The table carries the tenant ID in `owner_column`
    DirectOwner {
        /// Column holding the tenant ID
        owner_column: &'static str,
    },

    /// The table belongs to the tenant through rows of `parent_table`
    DerivedFromParent {
        /// Table owning the parent rows (filtered by [`PARENT_OWNER_COLUMN`])
        parent_table: &'static str,
        /// Column on this table referencing the parent's [`PARENT_KEY_COLUMN`]
        parent_join_column: &'static str,
    },
}

/// One table in a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableManifestEntry {
    /// Table name, also the attachment's base name
    pub table_name: &'static str,

    /// Ownership strategy
    #[serde(flatten)]
    pub ownership: Ownership,
}

impl TableManifestEntry {
    const fn direct(table_name: &'static str, owner_column: &'static str) -> Self {
        Self {
            table_name,
            ownership: Ownership::DirectOwner { owner_column },
        }
    }

    const fn derived(
        table_name: &'static str,
        parent_table: &'static str,
        parent_join_column: &'static str,
    ) -> Self {
        Self {
            table_name,
            ownership: Ownership::DerivedFromParent {
                parent_table,
                parent_join_column,
            },
        }
    }
}

impl fmt::Display for TableManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ownership {
            Ownership::DirectOwner { owner_column } => {
                write!(f, "{} (owner: {})", self.table_name, owner_column)
            }
            Ownership::DerivedFromParent {
                parent_table,
                parent_join_column,
            } => write!(
                f,
                "{} (via {}.{} <- {})",
                self.table_name, parent_table, PARENT_KEY_COLUMN, parent_join_column
            ),
        }
    }
}

/// Tables exported for every tenant type
pub const SHARED_TABLES: &[TableManifestEntry] = &[
    TableManifestEntry::direct("profiles", "id"),
    TableManifestEntry::direct("settings", "user_id"),
    TableManifestEntry::direct("contacts", "user_id"),
    TableManifestEntry::direct("invoices", "user_id"),
    TableManifestEntry::derived("invoice_items", "invoices", "invoice_id"),
    TableManifestEntry::direct("payments", "user_id"),
];

const PERSONAL_TABLES: &[TableManifestEntry] = &[
    TableManifestEntry::direct("budgets", "user_id"),
    TableManifestEntry::direct("expenses", "user_id"),
];

const SCHOOL_TABLES: &[TableManifestEntry] = &[
    TableManifestEntry::direct("students", "user_id"),
    TableManifestEntry::direct("classes", "user_id"),
    TableManifestEntry::derived("attendance", "classes", "class_id"),
    TableManifestEntry::derived("grades", "students", "student_id"),
];

const ORGANIZATION_TABLES: &[TableManifestEntry] = &[
    TableManifestEntry::direct("employees", "user_id"),
    TableManifestEntry::direct("projects", "user_id"),
    TableManifestEntry::derived("timesheets", "projects", "project_id"),
];

/// Type-specific tables, keyed by tenant type
pub static TYPE_TABLES: &[(TenantType, &[TableManifestEntry])] = &[
    (TenantType::Personal, PERSONAL_TABLES),
    (TenantType::School, SCHOOL_TABLES),
    (TenantType::Organization, ORGANIZATION_TABLES),
];

/// Entries specific to one tenant type
pub fn type_entries(tenant_type: TenantType) -> &'static [TableManifestEntry] {
    TYPE_TABLES
        .iter()
        .find(|(t, _)| *t == tenant_type)
        .map(|(_, entries)| *entries)
        .unwrap_or(&[])
}

/// The ordered tables to export for one tenant type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Tenant type this manifest was resolved for
    pub tenant_type: TenantType,

    /// Entries in export order
    pub entries: Vec<TableManifestEntry>,
}

impl Manifest {
    /// Number of tables
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no tables
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Table names in order
    pub fn table_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.table_name).collect()
    }

    /// Check structural invariants
    ///
    /// Table names must be unique and every derived entry's parent must be
    /// listed earlier in the same manifest.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending table.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for entry in &self.entries {
            if let Ownership::DerivedFromParent { parent_table, .. } = entry.ownership {
                if !seen.contains(parent_table) {
                    return Err(FerryError::Configuration(format!(
                        "manifest '{}': table '{}' derives from '{}' which is not listed before it",
                        self.tenant_type, entry.table_name, parent_table
                    )));
                }
            }
            if !seen.insert(entry.table_name) {
                return Err(FerryError::Configuration(format!(
                    "manifest '{}': duplicate table '{}'",
                    self.tenant_type, entry.table_name
                )));
            }
        }
        Ok(())
    }
}

/// Resolve the manifest for a tenant type
///
/// Pure and deterministic: shared entries followed by the type's entries.
pub fn resolve_manifest(tenant_type: TenantType) -> Manifest {
    let entries = SHARED_TABLES
        .iter()
        .chain(type_entries(tenant_type))
        .copied()
        .collect();
    Manifest {
        tenant_type,
        entries,
    }
}

/// Resolve the manifest for a raw type tag; unknown or missing tags use the default type
pub fn resolve_manifest_for_tag(tag: Option<&str>) -> Manifest {
    resolve_manifest(TenantType::from_tag(tag))
}

/// Validate every built-in manifest
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_all() -> Result<()> {
    for tenant_type in TenantType::ALL {
        resolve_manifest(tenant_type).validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_manifests_validate() {
        validate_all().unwrap();
    }

    #[test]
    fn test_every_type_has_tables() {
        for tenant_type in TenantType::ALL {
            assert!(!type_entries(tenant_type).is_empty(), "{tenant_type}");
        }
    }

    #[test]
    fn test_shared_entries_come_first() {
        let manifest = resolve_manifest(TenantType::School);
        assert_eq!(&manifest.entries[..SHARED_TABLES.len()], SHARED_TABLES);
        assert_eq!(
            &manifest.entries[SHARED_TABLES.len()..],
            type_entries(TenantType::School)
        );
    }

    #[test]
    fn test_unknown_tag_resolves_to_default() {
        assert_eq!(
            resolve_manifest_for_tag(Some("spaceship")),
            resolve_manifest(TenantType::DEFAULT)
        );
        assert_eq!(
            resolve_manifest_for_tag(None),
            resolve_manifest(TenantType::DEFAULT)
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let manifest = Manifest {
            tenant_type: TenantType::Personal,
            entries: vec![
                TableManifestEntry::direct("a", "user_id"),
                TableManifestEntry::direct("a", "user_id"),
            ],
        };
        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate table 'a'"));
    }

    #[test]
    fn test_validate_rejects_unlisted_parent() {
        let manifest = Manifest {
            tenant_type: TenantType::Personal,
            entries: vec![TableManifestEntry::derived("items", "orders", "order_id")],
        };
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_entry_display() {
        assert_eq!(
            TableManifestEntry::direct("invoices", "user_id").to_string(),
            "invoices (owner: user_id)"
        );
        assert_eq!(
            TableManifestEntry::derived("grades", "students", "student_id").to_string(),
            "grades (via students.id <- student_id)"
        );
    }

    #[test]
    fn test_entry_serialization() {
        let json = serde_json::to_value(TableManifestEntry::derived("grades", "students", "student_id"))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "table_name": "grades",
                "mode": "derived_from_parent",
                "parent_table": "students",
                "parent_join_column": "student_id"
            })
        );
    }
}

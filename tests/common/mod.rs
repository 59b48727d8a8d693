//! In-memory collaborators shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use ferry::adapters::database::TenantStore;
use ferry::adapters::identity::IdentityProvider;
use ferry::adapters::mail::{MailTransport, OutboundMessage};
use ferry::core::notify::Notifier;
use ferry::core::orchestrator::{ExportSettings, Orchestrator};
use ferry::domain::{FerryError, Identity, Record, Result, TenantId, TenantProfile};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Table rows held in memory, with knobs for failure injection
#[derive(Default)]
pub struct MemoryStore {
    tables: HashMap<String, Vec<Record>>,
    failing_tables: HashSet<String>,
    tenants: Vec<TenantProfile>,
    panic_tenant: Option<String>,
    slow_tenant: Option<(String, Duration)>,
    failing_tags: HashSet<String>,
    slow_tag: Option<(String, Duration)>,
    queries: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rows to a table; each value must be a JSON object
    pub fn with_rows(mut self, table: &str, rows: Vec<Value>) -> Self {
        let records = rows
            .into_iter()
            .map(|v| v.as_object().cloned().expect("row must be an object"))
            .collect::<Vec<_>>();
        self.tables
            .entry(table.to_string())
            .or_default()
            .extend(records);
        self
    }

    /// Every query against `table` fails
    pub fn with_failing_table(mut self, table: &str) -> Self {
        self.failing_tables.insert(table.to_string());
        self
    }

    /// Register a tenant in the directory
    pub fn with_tenant(mut self, id: &str, email: Option<&str>, tag: Option<&str>) -> Self {
        self.tenants.push(TenantProfile {
            tenant_id: TenantId::new(id).expect("valid tenant id"),
            email: email.map(str::to_string),
            tenant_type: tag.map(str::to_string),
        });
        self
    }

    /// Queries on behalf of `tenant` panic
    pub fn panicking_for(mut self, tenant: &str) -> Self {
        self.panic_tenant = Some(tenant.to_string());
        self
    }

    /// Queries on behalf of `tenant` take `delay`
    pub fn slow_for(mut self, tenant: &str, delay: Duration) -> Self {
        self.slow_tenant = Some((tenant.to_string(), delay));
        self
    }

    /// Tenant type lookups for `tenant` fail
    pub fn failing_tag_for(mut self, tenant: &str) -> Self {
        self.failing_tags.insert(tenant.to_string());
        self
    }

    /// Tenant type lookups for `tenant` take `delay`
    pub fn slow_tag_for(mut self, tenant: &str, delay: Duration) -> Self {
        self.slow_tag = Some((tenant.to_string(), delay));
        self
    }

    /// Number of store calls made so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Tables touched, in call order
    pub fn queried_tables(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record_call(&self, table: &str) -> Result<&[Record]> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(table.to_string());

        if self.failing_tables.contains(table) {
            return Err(FerryError::Database(format!(
                "permission denied for table {table}"
            )));
        }
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .ok_or_else(|| FerryError::Database(format!("relation \"{table}\" does not exist")))
    }

    async fn before_tenant_query(&self, tenant_id: &TenantId) {
        if self.panic_tenant.as_deref() == Some(tenant_id.as_str()) {
            panic!("store exploded for {tenant_id}");
        }
        if let Some((tenant, delay)) = &self.slow_tenant {
            if tenant == tenant_id.as_str() {
                tokio::time::sleep(*delay).await;
            }
        }
    }
}

/// Text form used for comparisons, matching a `::text` cast
fn text_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl TenantStore for MemoryStore {
    async fn fetch_owned_rows(
        &self,
        table: &str,
        owner_column: &str,
        tenant_id: &TenantId,
    ) -> Result<Vec<Record>> {
        self.before_tenant_query(tenant_id).await;
        let rows = self.record_call(table)?;
        Ok(rows
            .iter()
            .filter(|r| text_of(r.get(owner_column)).as_deref() == Some(tenant_id.as_str()))
            .cloned()
            .collect())
    }

    async fn fetch_key_values(
        &self,
        table: &str,
        key_column: &str,
        owner_column: &str,
        tenant_id: &TenantId,
    ) -> Result<Vec<String>> {
        self.before_tenant_query(tenant_id).await;
        let rows = self.record_call(table)?;
        Ok(rows
            .iter()
            .filter(|r| text_of(r.get(owner_column)).as_deref() == Some(tenant_id.as_str()))
            .filter_map(|r| text_of(r.get(key_column)))
            .collect())
    }

    async fn fetch_rows_in(
        &self,
        table: &str,
        column: &str,
        values: &[String],
    ) -> Result<Vec<Record>> {
        let rows = self.record_call(table)?;
        Ok(rows
            .iter()
            .filter(|r| {
                text_of(r.get(column))
                    .map(|v| values.contains(&v))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn list_tenants(&self) -> Result<Vec<TenantProfile>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.tenants.clone())
    }

    async fn tenant_type_tag(&self, tenant_id: &TenantId) -> Result<Option<String>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some((tenant, delay)) = &self.slow_tag {
            if tenant == tenant_id.as_str() {
                tokio::time::sleep(*delay).await;
            }
        }
        if self.failing_tags.contains(tenant_id.as_str()) {
            return Err(FerryError::Database(format!(
                "tenant type lookup failed for {tenant_id}"
            )));
        }
        Ok(self
            .tenants
            .iter()
            .find(|t| &t.tenant_id == tenant_id)
            .and_then(|t| t.tenant_type.clone()))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

/// Resolves a fixed set of credentials
#[derive(Default)]
pub struct StaticIdentity {
    known: HashMap<String, Identity>,
    calls: AtomicUsize,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str, tenant: &str, email: Option<&str>) -> Self {
        self.known.insert(
            token.to_string(),
            Identity {
                tenant_id: TenantId::new(tenant).expect("valid tenant id"),
                email: email.map(str::to_string),
            },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn resolve(&self, credential: &str) -> Result<Identity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.known
            .get(credential)
            .cloned()
            .ok_or_else(|| FerryError::Unauthorized("invalid or expired token".to_string()))
    }
}

/// Captures delivered messages instead of sending them
pub struct RecordingTransport {
    sent: Mutex<Vec<OutboundMessage>>,
    configured: bool,
    reject: HashSet<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            configured: true,
            reject: HashSet::new(),
        }
    }

    /// A transport without an API key
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Deliveries to `address` fail
    pub fn rejecting(mut self, address: &str) -> Self {
        self.reject.insert(address.to_string());
        self
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn deliver(&self, message: &OutboundMessage) -> Result<()> {
        if message.to.iter().any(|to| self.reject.contains(to)) {
            return Err(FerryError::Delivery(
                "mail provider returned 422: invalid recipient".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Orchestrator over the in-memory collaborators
pub fn orchestrator(
    store: Arc<MemoryStore>,
    identity: Arc<StaticIdentity>,
    transport: Arc<RecordingTransport>,
) -> Orchestrator {
    orchestrator_with(store, identity, transport, ExportSettings::default())
}

pub fn orchestrator_with(
    store: Arc<MemoryStore>,
    identity: Arc<StaticIdentity>,
    transport: Arc<RecordingTransport>,
    settings: ExportSettings,
) -> Orchestrator {
    let notifier = Notifier::new(transport, "Backups <backups@example.com>", "Your data export", false);
    Orchestrator::new(store, identity, notifier, settings)
}

/// A school tenant with data in the shared and school tables
///
/// `invoices` has 2 rows with 3 items between them, `students` 2 rows and
/// `grades` 1 row. Every other table exists but holds nothing for the tenant.
pub fn school_store(tenant: &str, email: &str) -> MemoryStore {
    use serde_json::json;

    MemoryStore::new()
        .with_tenant(tenant, Some(email), Some("school"))
        .with_rows("profiles", vec![json!({"id": tenant, "email": email, "tenant_type": "school"})])
        .with_rows("settings", vec![])
        .with_rows("contacts", vec![])
        .with_rows(
            "invoices",
            vec![
                json!({"id": 10, "user_id": tenant, "total": "12.50"}),
                json!({"id": 11, "user_id": tenant, "total": "7.00"}),
                json!({"id": 99, "user_id": "someone-else", "total": "1.00"}),
            ],
        )
        .with_rows(
            "invoice_items",
            vec![
                json!({"id": 1, "invoice_id": 10, "description": "Tuition, term 1"}),
                json!({"id": 2, "invoice_id": 10, "description": "Books"}),
                json!({"id": 3, "invoice_id": 11, "description": "Trip"}),
                json!({"id": 4, "invoice_id": 99, "description": "Not yours"}),
            ],
        )
        .with_rows("payments", vec![])
        .with_rows(
            "students",
            vec![
                json!({"id": "s1", "user_id": tenant, "name": "Ada"}),
                json!({"id": "s2", "user_id": tenant, "name": "Grace \"Amazing\" Hopper"}),
            ],
        )
        .with_rows("classes", vec![])
        .with_rows("attendance", vec![])
        .with_rows("grades", vec![json!({"id": 1, "student_id": "s1", "grade": "A"})])
}

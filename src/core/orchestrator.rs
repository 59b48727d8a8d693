//! Export orchestrator
//!
//! Entry point for one invocation. The command is decided once by the caller:
//! [`ExportCommand::Manual`] exports the tenant behind a credential,
//! [`ExportCommand::Sweep`] exports every tenant in the directory.

use crate::adapters::build_collaborators;
use crate::adapters::database::TenantStore;
use crate::adapters::identity::IdentityProvider;
use crate::config::schema::ExportConfig;
use crate::config::FerryConfig;
use crate::core::export::job::TenantExportJob;
use crate::core::notify::Notifier;
use crate::domain::ids::TenantId;
use crate::domain::{
    FerryError, Result, SweepEntry, SweepReport, TenantExportResult, TenantProfile, TenantType,
};
use crate::log_sweep_progress;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// What one invocation should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportCommand {
    /// Export the tenant identified by a bearer credential
    Manual {
        /// Raw bearer credential
        credential: String,
    },
    /// Export every tenant with a registered address
    Sweep,
}

impl ExportCommand {
    /// Command for an optional credential: present means manual mode
    pub fn from_credential(credential: Option<String>) -> Self {
        match credential {
            Some(credential) => ExportCommand::Manual { credential },
            None => ExportCommand::Sweep,
        }
    }
}

/// Result of one invocation
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    /// Manual mode result for the caller's tenant
    Manual(TenantExportResult),
    /// Sweep mode report
    Sweep(SweepReport),
}

/// Sweep tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    /// Tenants exported at once during a sweep
    pub sweep_concurrency: usize,
    /// Deadline for one tenant
    pub tenant_timeout: Duration,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for ExportSettings {
    fn from(config: &ExportConfig) -> Self {
        Self {
            sweep_concurrency: config.sweep_concurrency.max(1),
            tenant_timeout: Duration::from_secs(config.tenant_timeout_secs),
        }
    }
}

/// Runs manual and sweep exports
#[derive(Clone)]
pub struct Orchestrator {
    store: Arc<dyn TenantStore>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Notifier,
    job: TenantExportJob,
    settings: ExportSettings,
}

impl Orchestrator {
    /// Create an orchestrator
    pub fn new(
        store: Arc<dyn TenantStore>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Notifier,
        settings: ExportSettings,
    ) -> Self {
        let job = TenantExportJob::new(store.clone(), notifier.clone());
        Self {
            store,
            identity,
            notifier,
            job,
            settings,
        }
    }

    /// Wire the production collaborators from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a client cannot be constructed.
    pub fn from_config(config: &FerryConfig) -> Result<Self> {
        let (store, identity, transport) = build_collaborators(config)?;
        let notifier = Notifier::from_config(&config.notifier, transport, config.export.dry_run);
        Ok(Self::new(
            store,
            identity,
            notifier,
            ExportSettings::from(&config.export),
        ))
    }

    /// Sweep tuning in effect
    pub fn settings(&self) -> ExportSettings {
        self.settings
    }

    /// Check that the backing store is reachable
    ///
    /// # Errors
    ///
    /// Returns the store's connection error.
    pub async fn check_store(&self) -> Result<()> {
        self.store.health_check().await
    }

    /// Check the one invocation-wide precondition
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the mail provider key is missing.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.notifier.is_ready() {
            Ok(())
        } else {
            Err(FerryError::Configuration(
                "notifier.api_key is not set (FERRY_NOTIFIER_API_KEY)".to_string(),
            ))
        }
    }

    /// Execute one invocation
    ///
    /// # Errors
    ///
    /// Fatal conditions only: missing configuration, an unresolvable
    /// credential, a caller without an address, or a directory that cannot be
    /// listed. Per-tenant and per-table failures are reported in the outcome.
    pub async fn execute(&self, command: ExportCommand) -> Result<ExportOutcome> {
        self.ensure_ready()?;

        let span = tracing::info_span!("export", run_id = %Uuid::new_v4());
        match command {
            ExportCommand::Manual { credential } => self
                .run_manual(&credential)
                .instrument(span)
                .await
                .map(ExportOutcome::Manual),
            ExportCommand::Sweep => self
                .run_sweep()
                .instrument(span)
                .await
                .map(ExportOutcome::Sweep),
        }
    }

    async fn run_manual(&self, credential: &str) -> Result<TenantExportResult> {
        let identity = self.identity.resolve(credential).await.map_err(|e| match e {
            FerryError::Unauthorized(msg) => FerryError::Unauthorized(msg),
            other => FerryError::Unauthorized(other.to_string()),
        })?;

        let recipient = identity
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                FerryError::MissingRecipient(format!(
                    "tenant {} has no registered address",
                    identity.tenant_id
                ))
            })?
            .to_string();

        let tenant_type = match self.store.tenant_type_tag(&identity.tenant_id).await {
            Ok(tag) => TenantType::from_tag(tag.as_deref()),
            Err(e) => {
                tracing::warn!(
                    tenant_id = %identity.tenant_id,
                    error = %e,
                    "Tenant type lookup failed, using default manifest"
                );
                TenantType::DEFAULT
            }
        };

        tracing::info!(
            tenant_id = %identity.tenant_id,
            tenant_type = %tenant_type,
            "Manual export"
        );

        Ok(self
            .job
            .run_export(&identity.tenant_id, &recipient, tenant_type)
            .await)
    }

    async fn run_sweep(&self) -> Result<SweepReport> {
        let start = Instant::now();
        let tenants = self.store.list_tenants().await?;
        let listed = tenants.len();

        let eligible: Vec<(TenantProfile, String)> = tenants
            .into_iter()
            .filter_map(|tenant| {
                let recipient = tenant.recipient()?.to_string();
                Some((tenant, recipient))
            })
            .collect();

        tracing::info!(
            listed = listed,
            eligible = eligible.len(),
            concurrency = self.settings.sweep_concurrency,
            "Starting sweep"
        );

        let total = eligible.len();
        let entries: Vec<SweepEntry> = stream::iter(eligible.into_iter().enumerate())
            .map(|(index, (tenant, recipient))| async move {
                log_sweep_progress!(index + 1, total);
                self.sweep_one(tenant, recipient).await
            })
            .buffered(self.settings.sweep_concurrency)
            .collect()
            .await;

        let mut report = SweepReport::new();
        for entry in entries {
            report.push(entry);
        }

        tracing::info!(duration_ms = start.elapsed().as_millis() as u64, "Sweep finished");
        report.log_summary();
        Ok(report)
    }

    /// Export one tenant in its own task under the per-tenant deadline
    async fn sweep_one(&self, tenant: TenantProfile, recipient: String) -> SweepEntry {
        let handle = tokio::spawn(export_with_deadline(
            self.store.clone(),
            self.job.clone(),
            tenant.tenant_id.clone(),
            recipient.clone(),
            tenant.tenant_type.clone(),
            self.settings.tenant_timeout,
        )
        .in_current_span());

        match handle.await {
            Ok(Ok(result)) if result.delivered => SweepEntry::succeeded(recipient),
            Ok(Ok(result)) => SweepEntry::failed(
                recipient,
                result
                    .delivery_error
                    .unwrap_or_else(|| "delivery failed".to_string()),
            ),
            Ok(Err(e)) => {
                tracing::error!(tenant_id = %tenant.tenant_id, error = %e, "Tenant export failed");
                SweepEntry::failed(recipient, e.to_string())
            }
            Err(join_error) => {
                tracing::error!(
                    tenant_id = %tenant.tenant_id,
                    error = %join_error,
                    "Tenant export task aborted"
                );
                SweepEntry::failed(recipient, format!("unexpected failure: {join_error}"))
            }
        }
    }
}

/// Resolve the tenant type and run its job, all under `deadline`
///
/// The directory tag is used when the listing carried one; otherwise the
/// store is asked.
async fn export_with_deadline(
    store: Arc<dyn TenantStore>,
    job: TenantExportJob,
    tenant_id: TenantId,
    recipient: String,
    directory_tag: Option<String>,
    deadline: Duration,
) -> Result<TenantExportResult> {
    let export = async {
        let tag = match directory_tag {
            Some(tag) => Some(tag),
            None => store.tenant_type_tag(&tenant_id).await?,
        };
        let tenant_type = TenantType::from_tag(tag.as_deref());
        Ok::<_, FerryError>(job.run_export(&tenant_id, &recipient, tenant_type).await)
    };

    tokio::time::timeout(deadline, export)
        .await
        .map_err(|_| FerryError::Timeout(format!("export exceeded {deadline:?}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_from_credential() {
        assert_eq!(ExportCommand::from_credential(None), ExportCommand::Sweep);
        assert_eq!(
            ExportCommand::from_credential(Some("tok".to_string())),
            ExportCommand::Manual {
                credential: "tok".to_string()
            }
        );
    }

    #[test]
    fn test_settings_from_config() {
        let settings = ExportSettings::from(&ExportConfig {
            sweep_concurrency: 4,
            tenant_timeout_secs: 12,
            dry_run: false,
        });
        assert_eq!(settings.sweep_concurrency, 4);
        assert_eq!(settings.tenant_timeout, Duration::from_secs(12));

        let defaults = ExportSettings::default();
        assert_eq!(defaults.sweep_concurrency, 1);
        assert_eq!(defaults.tenant_timeout, Duration::from_secs(300));
    }
}

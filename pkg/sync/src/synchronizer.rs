use anyhow::{Context, Result};
use std::collections::BTreeSet;
use pkg_types::credential::{CredentialRecord, normalize};
use pkg_types::kubeconfig::{ClusterEntry, ContextEntry, ExecUserEntry};
use pkg_types::validate::check_resource_name;
use tracing::{info, warn};

use crate::kubeconfig::KubeConfigWriter;
use crate::store::SecretStore;

/// Outcome of a successful synchronization run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Resource names written, in write order. A name appears once per
    /// record, so colliding titles show up more than once.
    pub names: Vec<String>,
}

impl SyncReport {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of distinct contexts written; colliding titles count once.
    pub fn contexts(&self) -> usize {
        self.names.iter().collect::<BTreeSet<_>>().len()
    }
}

/// Writes a cluster, an exec-plugin user and a context per credential record.
pub struct ConfigSynchronizer<'a> {
    writer: &'a dyn KubeConfigWriter,
    /// How kubectl invokes this program for `auth`.
    exec_command: String,
}

impl<'a> ConfigSynchronizer<'a> {
    pub fn new(writer: &'a dyn KubeConfigWriter, exec_command: &str) -> Self {
        Self {
            writer,
            exec_command: exec_command.to_string(),
        }
    }

    /// Fetch every record tagged `tag`, normalize and sync them.
    pub async fn update(&self, store: &dyn SecretStore, tag: &str) -> Result<SyncReport> {
        let raw = store
            .fetch_by_tag(tag)
            .await
            .with_context(|| format!("failed to fetch records tagged '{}'", tag))?;
        let records: Vec<CredentialRecord> = raw.iter().map(normalize).collect();
        self.sync(&records).await
    }

    /// Upsert the three resources of each record, in order.
    ///
    /// The first failing upsert aborts the run; whatever was already written
    /// stays. Every write is an overwrite, so re-running is safe.
    pub async fn sync(&self, records: &[CredentialRecord]) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        for record in records {
            let name = self.sync_record(record).await?;
            if report.names.contains(&name) {
                warn!(
                    "record {} ('{}') overwrote {} written earlier in this run",
                    record.id, record.display_name, name
                );
            }
            report.names.push(name);
        }
        info!(
            "synchronized {} record(s) into {} context(s)",
            report.len(),
            report.contexts()
        );
        Ok(report)
    }

    async fn sync_record(&self, record: &CredentialRecord) -> Result<String> {
        let cluster = ClusterEntry::from_record(record);
        let name = cluster.name.clone();

        if let Err(e) = check_resource_name(&name) {
            warn!("record {}: {}", record.id, e);
        }
        if record.server_url.is_empty() {
            warn!("record {} ('{}') has no server field", record.id, record.display_name);
        }

        self.writer
            .upsert_cluster(&cluster)
            .await
            .with_context(|| format!("failed to set cluster {} (record {})", name, record.id))?;

        let user = ExecUserEntry::from_record(record, &self.exec_command);
        self.writer
            .upsert_exec_user(&user)
            .await
            .with_context(|| format!("failed to set credentials {} (record {})", name, record.id))?;

        let context = ContextEntry::from_record(record);
        self.writer
            .upsert_context(&context)
            .await
            .with_context(|| format!("failed to set context {} (record {})", name, record.id))?;

        info!("record {} → {}", record.id, name);
        Ok(name)
    }
}

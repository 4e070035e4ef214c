//! In-memory collaborators for tests.

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use pkg_types::kubeconfig::{ClusterEntry, ContextEntry, ExecUserEntry};
use pkg_types::record::RawRecord;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::kubeconfig::KubeConfigWriter;
use crate::store::SecretStore;

pub struct MemoryStore {
    pub records: Vec<RawRecord>,
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn fetch_by_tag(&self, tag: &str) -> Result<Vec<RawRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.tags.iter().any(|t| t == tag))
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<RawRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("\"{}\" isn't an item", id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Cluster(String),
    User(String),
    Context(String),
}

/// Final kubeconfig contents as seen by [`RecordingWriter`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KubeState {
    pub clusters: BTreeMap<String, ClusterEntry>,
    pub users: BTreeMap<String, ExecUserEntry>,
    pub contexts: BTreeMap<String, ContextEntry>,
}

/// Records every upsert and applies it to a map-backed kubeconfig.
#[derive(Default)]
pub struct RecordingWriter {
    pub calls: Mutex<Vec<Call>>,
    pub state: Mutex<KubeState>,
    /// Cluster upserts for this name fail.
    pub fail_cluster: Option<String>,
}

impl RecordingWriter {
    pub fn failing_cluster(name: &str) -> Self {
        Self {
            fail_cluster: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn state(&self) -> KubeState {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl KubeConfigWriter for RecordingWriter {
    async fn upsert_cluster(&self, cluster: &ClusterEntry) -> Result<()> {
        if self.fail_cluster.as_deref() == Some(cluster.name.as_str()) {
            bail!("error: open ~/.kube/config.lock: file exists");
        }
        self.calls.lock().unwrap().push(Call::Cluster(cluster.name.clone()));
        let mut state = self.state.lock().unwrap();
        state.clusters.insert(cluster.name.clone(), cluster.clone());
        Ok(())
    }

    async fn upsert_exec_user(&self, user: &ExecUserEntry) -> Result<()> {
        self.calls.lock().unwrap().push(Call::User(user.name.clone()));
        let mut state = self.state.lock().unwrap();
        state.users.insert(user.name.clone(), user.clone());
        Ok(())
    }

    async fn upsert_context(&self, context: &ContextEntry) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Context(context.name.clone()));
        let mut state = self.state.lock().unwrap();
        state.contexts.insert(context.name.clone(), context.clone());
        Ok(())
    }
}

/// A tagged record with server and client certificate fields.
pub fn cluster_record(id: &str, title: &str) -> RawRecord {
    let mut record = RawRecord::new(id, title)
        .with_field("server", &format!("https://{}.example.com:6443", id))
        .with_field("cert", &format!("CERT-{}", id))
        .with_field("key", &format!("KEY-{}", id));
    record.tags = vec!["kubeconfig".to_string()];
    record
}

use anyhow::Result;
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose};
use pkg_constants::secrets::DEFAULT_KUBECTL_BIN;
use pkg_types::kubeconfig::{ClusterEntry, ContextEntry, ExecUserEntry};
use tracing::info;

use crate::command::run;

/// Create-or-overwrite access to the kubeconfig resources.
/// Every call replaces the named entry; none of them delete anything.
#[async_trait]
pub trait KubeConfigWriter: Send + Sync {
    async fn upsert_cluster(&self, cluster: &ClusterEntry) -> Result<()>;

    async fn upsert_exec_user(&self, user: &ExecUserEntry) -> Result<()>;

    async fn upsert_context(&self, context: &ContextEntry) -> Result<()>;
}

// ─── kubectl ────────────────────────────────────────────────────

/// Kubeconfig writer shelling out to `kubectl config`.
/// File locking and atomic writes are left to kubectl.
pub struct Kubectl {
    bin: String,
    /// Explicit kubeconfig path; kubectl's own resolution when `None`.
    kubeconfig: Option<String>,
}

impl Default for Kubectl {
    fn default() -> Self {
        Self::new(DEFAULT_KUBECTL_BIN)
    }
}

impl Kubectl {
    pub fn new(bin: &str) -> Self {
        Self {
            bin: bin.to_string(),
            kubeconfig: None,
        }
    }

    pub fn with_kubeconfig(mut self, path: Option<String>) -> Self {
        self.kubeconfig = path;
        self
    }

    fn config_args(&self, subcommand: &str, rest: Vec<String>) -> Vec<String> {
        let mut args = vec!["config".to_string(), subcommand.to_string()];
        args.extend(rest);
        if let Some(ref path) = self.kubeconfig {
            args.push(format!("--kubeconfig={}", path));
        }
        args
    }

    pub fn set_cluster_args(&self, cluster: &ClusterEntry) -> Vec<String> {
        self.config_args(
            "set-cluster",
            vec![
                cluster.name.clone(),
                format!("--server={}", cluster.server),
                format!("--insecure-skip-tls-verify={}", cluster.insecure_skip_tls_verify),
            ],
        )
    }

    /// `set-cluster` only accepts a CA file path, so inline data goes
    /// through `config set` on the property path.
    pub fn set_cluster_ca_args(&self, name: &str, ca: &str) -> Vec<String> {
        self.config_args(
            "set",
            vec![
                format!("clusters.{}.certificate-authority-data", name),
                encode_ca_data(ca),
            ],
        )
    }

    /// `set-cluster` merges into an existing entry, so a CA dropped from the
    /// item has to be removed explicitly.
    pub fn unset_cluster_ca_args(&self, name: &str) -> Vec<String> {
        self.config_args(
            "unset",
            vec![format!("clusters.{}.certificate-authority-data", name)],
        )
    }

    pub fn set_credentials_args(&self, user: &ExecUserEntry) -> Vec<String> {
        let mut rest = vec![
            user.name.clone(),
            format!("--exec-command={}", user.command),
            format!("--exec-api-version={}", user.api_version),
            format!("--exec-interactive-mode={}", user.interactive_mode),
        ];
        rest.extend(user.args.iter().map(|a| format!("--exec-arg={}", a)));
        self.config_args("set-credentials", rest)
    }

    pub fn set_context_args(&self, context: &ContextEntry) -> Vec<String> {
        self.config_args(
            "set-context",
            vec![
                context.name.clone(),
                format!("--cluster={}", context.cluster),
                format!("--user={}", context.user),
            ],
        )
    }
}

/// Base64 value for `certificate-authority-data`.
/// PEM input is encoded; anything else is taken to be base64 already and only
/// has its whitespace stripped.
pub fn encode_ca_data(ca: &str) -> String {
    let trimmed = ca.trim();
    if trimmed.starts_with("-----BEGIN") {
        general_purpose::STANDARD.encode(format!("{}\n", trimmed))
    } else {
        trimmed.split_whitespace().collect()
    }
}

#[async_trait]
impl KubeConfigWriter for Kubectl {
    async fn upsert_cluster(&self, cluster: &ClusterEntry) -> Result<()> {
        run(&self.bin, &self.set_cluster_args(cluster)).await?;
        match cluster.certificate_authority {
            Some(ref ca) => run(&self.bin, &self.set_cluster_ca_args(&cluster.name, ca)).await?,
            None => run(&self.bin, &self.unset_cluster_ca_args(&cluster.name)).await?,
        };
        info!("kubectl: cluster {} set (server={})", cluster.name, cluster.server);
        Ok(())
    }

    async fn upsert_exec_user(&self, user: &ExecUserEntry) -> Result<()> {
        run(&self.bin, &self.set_credentials_args(user)).await?;
        info!("kubectl: user {} set (exec={})", user.name, user.command);
        Ok(())
    }

    async fn upsert_context(&self, context: &ContextEntry) -> Result<()> {
        run(&self.bin, &self.set_context_args(context)).await?;
        info!("kubectl: context {} set", context.name);
        Ok(())
    }
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use pkg_constants::secrets::DEFAULT_OP_BIN;
use pkg_types::record::RawRecord;
use tracing::{debug, info};

use crate::command::run;

/// Read-only access to the secret store holding cluster credentials.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// All records carrying `tag`, with their fields, in store order.
    async fn fetch_by_tag(&self, tag: &str) -> Result<Vec<RawRecord>>;

    /// A single record by id (or any reference the store resolves).
    async fn fetch_by_id(&self, id: &str) -> Result<RawRecord>;
}

// ─── 1Password CLI ──────────────────────────────────────────────

/// Secret store backed by the 1Password CLI (`op`).
/// Authentication is left to `op` itself (desktop integration or session).
pub struct OpCli {
    bin: String,
    vault: Option<String>,
}

impl Default for OpCli {
    fn default() -> Self {
        Self::new(DEFAULT_OP_BIN)
    }
}

impl OpCli {
    pub fn new(bin: &str) -> Self {
        Self {
            bin: bin.to_string(),
            vault: None,
        }
    }

    /// Restrict lookups to one vault.
    pub fn with_vault(mut self, vault: Option<String>) -> Self {
        self.vault = vault;
        self
    }

    fn list_args(&self, tag: &str) -> Vec<String> {
        let mut args = vec![
            "item".to_string(),
            "list".to_string(),
            "--tags".to_string(),
            tag.to_string(),
        ];
        self.push_common(&mut args);
        args
    }

    fn get_args(&self, id: &str) -> Vec<String> {
        let mut args = vec!["item".to_string(), "get".to_string(), id.to_string()];
        self.push_common(&mut args);
        args
    }

    fn push_common(&self, args: &mut Vec<String>) {
        args.push("--format".to_string());
        args.push("json".to_string());
        if let Some(ref vault) = self.vault {
            args.push("--vault".to_string());
            args.push(vault.clone());
        }
    }
}

/// Parse `op item list --format json` output. Empty output means no items.
pub fn parse_records(stdout: &[u8]) -> Result<Vec<RawRecord>> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(stdout).context("failed to parse 'op item list' output")
}

/// Parse `op item get --format json` output.
pub fn parse_record(stdout: &[u8]) -> Result<RawRecord> {
    serde_json::from_slice(stdout).context("failed to parse 'op item get' output")
}

#[async_trait]
impl SecretStore for OpCli {
    async fn fetch_by_tag(&self, tag: &str) -> Result<Vec<RawRecord>> {
        let stdout = run(&self.bin, &self.list_args(tag))
            .await
            .context("failed to execute 'op item list'")?;
        let summaries = parse_records(&stdout)?;
        info!("op: {} item(s) tagged '{}'", summaries.len(), tag);

        // `op item list` returns summaries only; fetch the fields separately.
        let mut records = Vec::with_capacity(summaries.len());
        for summary in summaries {
            if summary.fields.is_empty() {
                debug!("op: hydrating item {} ({})", summary.id, summary.title);
                records.push(self.fetch_by_id(&summary.id).await?);
            } else {
                records.push(summary);
            }
        }
        Ok(records)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<RawRecord> {
        let stdout = run(&self.bin, &self.get_args(id))
            .await
            .with_context(|| format!("failed to execute 'op item get {}'", id))?;
        parse_record(&stdout)
    }
}

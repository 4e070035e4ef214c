//! Shapes of the three kubeconfig resources written per record.

use crate::credential::CredentialRecord;
use crate::slug::config_name;
use pkg_constants::exec::{AUTH_SUBCOMMAND, EXEC_API_VERSION, EXEC_INTERACTIVE_MODE};
use tracing::warn;

/// `clusters[]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEntry {
    pub name: String,
    pub server: String,
    /// Only set when the record carries CA data and does not skip
    /// verification. `None` clears any CA previously written.
    pub certificate_authority: Option<String>,
    pub insecure_skip_tls_verify: bool,
}

/// `users[]` entry delegating to an exec credential plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecUserEntry {
    pub name: String,
    pub command: String,
    pub api_version: String,
    pub args: Vec<String>,
    /// Required by the v1 exec protocol.
    pub interactive_mode: String,
}

/// `contexts[]` entry binding a cluster to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub name: String,
    pub cluster: String,
    pub user: String,
}

impl ClusterEntry {
    pub fn from_record(record: &CredentialRecord) -> Self {
        let name = config_name(&record.display_name);
        // kubectl refuses a cluster with both a root CA and the insecure flag.
        let certificate_authority = if record.certificate_authority.is_empty() {
            None
        } else if record.insecure_skip_verify {
            warn!(
                "record {}: insecure-skip-tls-verify is set, ignoring certificate authority for {}",
                record.id, name
            );
            None
        } else {
            Some(record.certificate_authority.clone())
        };
        Self {
            name,
            server: record.server_url.clone(),
            certificate_authority,
            insecure_skip_tls_verify: record.insecure_skip_verify,
        }
    }
}

impl ExecUserEntry {
    /// User that runs `<exec_command> auth <record id>` to obtain credentials.
    pub fn from_record(record: &CredentialRecord, exec_command: &str) -> Self {
        Self {
            name: config_name(&record.display_name),
            command: exec_command.to_string(),
            api_version: EXEC_API_VERSION.to_string(),
            args: vec![AUTH_SUBCOMMAND.to_string(), record.id.clone()],
            interactive_mode: EXEC_INTERACTIVE_MODE.to_string(),
        }
    }
}

impl ContextEntry {
    pub fn from_record(record: &CredentialRecord) -> Self {
        let name = config_name(&record.display_name);
        Self {
            cluster: name.clone(),
            user: name.clone(),
            name,
        }
    }
}

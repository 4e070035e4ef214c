use pkg_constants::exec::{EXEC_API_VERSION, EXEC_CREDENTIAL_KIND};
use serde::{Deserialize, Serialize};

/// `ExecCredential` envelope written to stdout for kubectl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecCredential {
    pub api_version: String,
    pub kind: String,
    pub status: ExecCredentialStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecCredentialStatus {
    pub client_certificate_data: String,
    pub client_key_data: String,
}

impl ExecCredential {
    /// Envelope for the v1 protocol carrying the given certificate and key.
    pub fn new(client_certificate_data: &str, client_key_data: &str) -> Self {
        Self {
            api_version: EXEC_API_VERSION.to_string(),
            kind: EXEC_CREDENTIAL_KIND.to_string(),
            status: ExecCredentialStatus {
                client_certificate_data: client_certificate_data.to_string(),
                client_key_data: client_key_data.to_string(),
            },
        }
    }
}

//! Normalization of loosely-labeled secret store fields into kubeconfig
//! cluster credentials.

use crate::record::RawRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Canonical cluster credentials derived from one [`RawRecord`].
///
/// Optional attributes are empty strings (or `false`) when the record has no
/// field for them.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: String,
    pub display_name: String,
    pub server_url: String,
    pub insecure_skip_verify: bool,
    /// PEM or base64 encoded CA bundle.
    pub certificate_authority: String,
    pub client_certificate: String,
    pub client_key: String,
}

// Key material never ends up in logs.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("server_url", &self.server_url)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("certificate_authority_len", &self.certificate_authority.len())
            .field("client_certificate_len", &self.client_certificate.len())
            .field("client_key", &if self.client_key.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Canonical attribute a field label maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    ServerUrl,
    InsecureSkipVerify,
    CertificateAuthority,
    ClientCertificate,
    ClientKey,
}

impl Attribute {
    /// Match a field label against the synonym table.
    /// Returns `None` for labels that carry nothing kubeconfig-related.
    pub fn from_label(label: &str) -> Option<Self> {
        match canonical_label(label).as_str() {
            "server" => Some(Self::ServerUrl),
            "insecure-skip-tls-verify" | "insecure_skip_tls_verify" => {
                Some(Self::InsecureSkipVerify)
            }
            "certificate-authority-data"
            | "certificate_authority"
            | "certificate-authority"
            | "ca" => Some(Self::CertificateAuthority),
            "client-certificate" | "client-certificate-data" | "client_certificate" | "cert" => {
                Some(Self::ClientCertificate)
            }
            "client-key" | "client-key-data" | "client_key" | "key" => Some(Self::ClientKey),
            _ => None,
        }
    }
}

/// Trim, lower-case and join whitespace-separated words with a single hyphen.
pub fn canonical_label(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Permissive boolean coercion: only the first non-blank character counts.
/// `t`, `y` and `1` are true; everything else, including `""`, is false.
pub fn to_bool(s: &str) -> bool {
    matches!(
        s.trim().chars().next().map(|c| c.to_ascii_lowercase()),
        Some('t' | 'y' | '1')
    )
}

impl CredentialRecord {
    /// Build the canonical record from a raw secret store item.
    /// Later fields overwrite earlier ones mapping to the same attribute.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let mut record = Self {
            id: raw.id.clone(),
            display_name: raw.title.clone(),
            ..Default::default()
        };

        for field in &raw.fields {
            let Some(attribute) = Attribute::from_label(&field.label) else {
                debug!("record {}: ignoring field '{}'", raw.id, field.label);
                continue;
            };
            match attribute {
                Attribute::ServerUrl => record.server_url = field.value.clone(),
                Attribute::InsecureSkipVerify => record.insecure_skip_verify = to_bool(&field.value),
                Attribute::CertificateAuthority => {
                    record.certificate_authority = field.value.clone()
                }
                Attribute::ClientCertificate => record.client_certificate = field.value.clone(),
                Attribute::ClientKey => record.client_key = field.value.clone(),
            }
        }

        record
    }

    /// Whether the record carries both halves of a client certificate.
    pub fn has_client_cert(&self) -> bool {
        !self.client_certificate.is_empty() && !self.client_key.is_empty()
    }
}

/// Normalize a raw record. Never fails; unrecognized fields are ignored.
pub fn normalize(raw: &RawRecord) -> CredentialRecord {
    CredentialRecord::from_raw(raw)
}

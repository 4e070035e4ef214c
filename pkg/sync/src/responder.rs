use anyhow::{Context, Result};
use pkg_types::credential::{CredentialRecord, normalize};
use pkg_types::exec_credential::ExecCredential;
use std::io::Write;
use tracing::warn;

use crate::store::SecretStore;

/// Build the exec credential for a record. Certificate and key are passed
/// through verbatim; no validation or expiry check happens here.
pub fn respond(record: &CredentialRecord) -> ExecCredential {
    if !record.has_client_cert() {
        warn!(
            "record {} ('{}') has no client certificate/key; kubectl will not authenticate",
            record.id, record.display_name
        );
    }
    ExecCredential::new(&record.client_certificate, &record.client_key)
}

/// Write `credential` as a single JSON line.
pub fn write_response<W: Write>(credential: &ExecCredential, mut out: W) -> Result<()> {
    serde_json::to_writer(&mut out, credential).context("failed to marshal ExecCredential")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// The `auth` flow: fetch one record by id and write its exec credential.
///
/// If the fetch fails an envelope with empty data is still written before the
/// error is returned, so the output stays parseable.
pub async fn auth<W: Write>(store: &dyn SecretStore, id: &str, out: W) -> Result<()> {
    match store.fetch_by_id(id).await {
        Ok(raw) => write_response(&respond(&normalize(&raw)), out),
        Err(e) => {
            let e = e.context(format!("failed to fetch record '{}'", id));
            if let Err(write_err) = write_response(&ExecCredential::new("", ""), out) {
                return Err(e.context(format!(
                    "also failed to write empty ExecCredential: {:#}",
                    write_err
                )));
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use pkg_types::record::RawRecord;

    #[test]
    fn respond_passes_material_through() {
        let record = CredentialRecord {
            id: "abc123".to_string(),
            client_certificate: "CERTDATA".to_string(),
            client_key: "KEYDATA".to_string(),
            ..Default::default()
        };
        let cred = respond(&record);
        assert_eq!(cred.status.client_certificate_data, "CERTDATA");
        assert_eq!(cred.status.client_key_data, "KEYDATA");
    }

    #[tokio::test]
    async fn auth_writes_exact_envelope() {
        let store = MemoryStore {
            records: vec![
                RawRecord::new("abc123", "Prod")
                    .with_field("server", "https://prod")
                    .with_field("Client Certificate", "CERTDATA")
                    .with_field("client-key-data", "KEYDATA"),
            ],
        };
        let mut out = Vec::new();
        auth(&store, "abc123", &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"apiVersion\":\"client.authentication.k8s.io/v1\",\"kind\":\"ExecCredential\",\"status\":{\"clientCertificateData\":\"CERTDATA\",\"clientKeyData\":\"KEYDATA\"}}\n"
        );
    }

    #[tokio::test]
    async fn auth_without_material_emits_empty_envelope() {
        let store = MemoryStore {
            records: vec![RawRecord::new("n1", "Notes").with_field("username", "me")],
        };
        let mut out = Vec::new();
        auth(&store, "n1", &mut out).await.unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["kind"], "ExecCredential");
        assert_eq!(json["status"]["clientCertificateData"], "");
        assert_eq!(json["status"]["clientKeyData"], "");
    }

    #[tokio::test]
    async fn auth_fetch_failure_is_error_with_empty_envelope() {
        let store = MemoryStore { records: vec![] };
        let mut out = Vec::new();
        let err = auth(&store, "missing", &mut out).await.unwrap_err();

        assert!(err.to_string().contains("failed to fetch record 'missing'"));
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["status"]["clientKeyData"], "");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn auth_keeps_fetch_error_when_write_fails() {
        let store = MemoryStore { records: vec![] };
        let err = auth(&store, "missing", BrokenPipe).await.unwrap_err();

        let chain = format!("{:#}", err);
        assert!(chain.contains("failed to fetch record 'missing'"), "{}", chain);
        assert!(chain.contains("isn't an item"), "{}", chain);
        assert!(chain.contains("stdout closed"), "{}", chain);
    }
}

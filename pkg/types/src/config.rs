use serde::{Deserialize, Serialize};

/// op-kubeconfig configuration file (YAML).
///
/// Example `~/.config/op-kubeconfig/config.yaml`:
/// ```yaml
/// tag: kubeconfig
/// vault: Infrastructure
/// op-bin: /opt/homebrew/bin/op
/// kubectl-bin: kubectl
/// kubeconfig: /home/me/.kube/config
/// exec-command: op-kubeconfig
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfigFile {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub vault: Option<String>,
    #[serde(default, alias = "op-bin")]
    pub op_bin: Option<String>,
    #[serde(default, alias = "kubectl-bin")]
    pub kubectl_bin: Option<String>,
    #[serde(default)]
    pub kubeconfig: Option<String>,
    #[serde(default, alias = "exec-command")]
    pub exec_command: Option<String>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to read config {}: {}", path, e)),
    };
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let config: T = serde_yaml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path, e))?;
    Ok(config)
}

//! Filesystem path constants.

/// Directory under the user's config dir holding op-kubeconfig files.
pub const CONFIG_DIR_NAME: &str = "op-kubeconfig";

/// Config file name inside `CONFIG_DIR_NAME`.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

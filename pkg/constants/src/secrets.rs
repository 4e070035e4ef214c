//! Secret store and resource naming constants.

/// Tag searched for when `update` is run without `--tag`.
pub const DEFAULT_TAG: &str = "kubeconfig";

/// Suffix appended to every kubeconfig resource name this tool writes.
/// Marks clusters, users and contexts as managed by op-kubeconfig.
pub const MANAGED_SUFFIX: &str = ":op";

/// Default 1Password CLI binary.
pub const DEFAULT_OP_BIN: &str = "op";

/// Default kubectl binary.
pub const DEFAULT_KUBECTL_BIN: &str = "kubectl";

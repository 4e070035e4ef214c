//! client-go exec credential protocol constants.

/// API version of the exec credential protocol spoken with kubectl.
pub const EXEC_API_VERSION: &str = "client.authentication.k8s.io/v1";

/// Kind of the exec credential envelope.
pub const EXEC_CREDENTIAL_KIND: &str = "ExecCredential";

/// Subcommand kubectl invokes to fetch credentials.
pub const AUTH_SUBCOMMAND: &str = "auth";

/// Default command written into the user entry's `exec.command`.
/// Must resolve to this binary on the user's `$PATH`.
pub const DEFAULT_EXEC_COMMAND: &str = "op-kubeconfig";

/// `interactiveMode` of the exec user entry. `auth` never reads stdin.
pub const EXEC_INTERACTIVE_MODE: &str = "Never";

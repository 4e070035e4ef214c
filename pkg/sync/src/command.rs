use anyhow::{Context, Result, bail};
use tracing::debug;

/// Run `program` with `args` and return its stdout.
///
/// A spawn failure or non-zero exit is an error carrying the child's stderr.
pub async fn run(program: &str, args: &[String]) -> Result<Vec<u8>> {
    let label = describe(program, args);
    debug!("exec: {}", label);

    let output = tokio::process::Command::new(program)
        .args(args)
        .output()
        .await
        .with_context(|| format!("failed to spawn {}", program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{} exited with {}: {}", label, output.status, stderr.trim());
    }

    Ok(output.stdout)
}

/// Program plus its first two arguments. Later arguments may carry
/// certificate data and are left out of logs and errors.
fn describe(program: &str, args: &[String]) -> String {
    let mut parts = vec![program];
    parts.extend(args.iter().take(2).map(String::as_str));
    parts.join(" ")
}

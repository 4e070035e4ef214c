use anyhow::{Result, bail};
use pkg_constants::secrets::MANAGED_SUFFIX;

/// Check a managed kubeconfig resource name against a conservative grammar.
/// Rules for the part before the `:op` suffix: `[a-z0-9-]`, non-empty, no
/// leading/trailing hyphens.
///
/// Names are never rewritten; a failure here is only reported. Such names may
/// still be accepted by kubectl, but a leading hyphen is parsed as a flag and
/// a `.` breaks `kubectl config set` property paths.
pub fn check_resource_name(name: &str) -> Result<()> {
    let slug = name.strip_suffix(MANAGED_SUFFIX).unwrap_or(name);
    if slug.is_empty() {
        bail!("name '{}' has an empty title part", name);
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        bail!("name '{}' must not start or end with a hyphen", name);
    }
    if let Some(c) = slug
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        bail!(
            "name '{}' contains '{}'; only lowercase letters, digits, and hyphens [a-z0-9-] are safe",
            name,
            c
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::config_name;

    #[test]
    fn valid_names() {
        assert!(check_resource_name("prod:op").is_ok());
        assert!(check_resource_name(&config_name("My Cluster")).is_ok());
        assert!(check_resource_name(&config_name("eu-west-1")).is_ok());
        assert!(check_resource_name("a").is_ok());
    }

    #[test]
    fn invalid_names() {
        assert!(check_resource_name(":op").is_err());
        assert!(check_resource_name(&config_name("-leading")).is_err());
        assert!(check_resource_name(&config_name("trailing ")).is_err());
        assert!(check_resource_name(&config_name("team/prod")).is_err());
        assert!(check_resource_name(&config_name("prod.eu")).is_err());
        assert!(check_resource_name(&config_name("a_b")).is_err());
    }

    #[test]
    fn error_names_offending_character() {
        let err = check_resource_name(&config_name("prod.eu")).unwrap_err();
        assert!(err.to_string().contains("'.'"), "{}", err);
    }
}

//! Deterministic kubeconfig resource naming.

use pkg_constants::secrets::MANAGED_SUFFIX;

/// Lower-case `s` and replace every space with a hyphen.
///
/// Nothing else is escaped: characters such as `/` or `.` pass through
/// unchanged. See [`crate::validate::check_resource_name`].
pub fn slugify(s: &str) -> String {
    s.to_lowercase().replace(' ', "-")
}

/// Name shared by the cluster, user and context written for one record.
pub fn config_name(display_name: &str) -> String {
    format!("{}{}", slugify(display_name), MANAGED_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("My Cluster"), "my-cluster");
        assert_eq!(slugify("PROD"), "prod");
        assert_eq!(slugify("a  b"), "a--b");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slugify_is_deterministic() {
        for title in ["My Cluster", "eu-west / Prod", "Ünïcode Name"] {
            assert_eq!(slugify(title), slugify(title));
        }
    }

    #[test]
    fn slugify_leaves_other_characters() {
        assert_eq!(slugify("team/prod.eu"), "team/prod.eu");
        assert_eq!(slugify("a_b:c"), "a_b:c");
    }

    #[test]
    fn config_name_appends_suffix() {
        assert_eq!(config_name("My Cluster"), "my-cluster:op");
        assert_eq!(config_name("Prod"), "prod:op");
        assert!(config_name("").ends_with(":op"));
    }
}

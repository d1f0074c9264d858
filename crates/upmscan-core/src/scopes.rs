//! Scopes routed to OpenUPM registries

use crate::ManifestDocument;
use std::collections::BTreeSet;

/// Substring identifying an OpenUPM registry URL (case-sensitive).
pub const OPENUPM_URL_MARKER: &str = "openupm";

/// Package-name prefixes registered against an OpenUPM registry.
pub type OpenUpmScopeSet = BTreeSet<String>;

/// Collect the scopes of every registry whose URL contains `openupm`.
///
/// Registries without a URL or without scopes contribute nothing. Scopes are
/// taken verbatim.
pub fn openupm_scopes(manifest: &ManifestDocument) -> OpenUpmScopeSet {
    manifest
        .scoped_registries
        .iter()
        .filter(|registry| {
            registry
                .url
                .as_deref()
                .is_some_and(|url| url.contains(OPENUPM_URL_MARKER))
        })
        .flat_map(|registry| registry.scopes.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScopedRegistry;

    fn registry(url: Option<&str>, scopes: &[&str]) -> ScopedRegistry {
        ScopedRegistry {
            name: None,
            url: url.map(str::to_string),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn manifest(registries: Vec<ScopedRegistry>) -> ManifestDocument {
        ManifestDocument {
            scoped_registries: registries,
            ..Default::default()
        }
    }

    #[test]
    fn test_only_openupm_registries_contribute() {
        let scopes = openupm_scopes(&manifest(vec![
            registry(Some("https://package.openupm.com"), &["com.cysharp", "jp.keijiro"]),
            registry(Some("https://npm.example.com"), &["com.example"]),
            registry(None, &["com.nourl"]),
        ]));

        let expected: OpenUpmScopeSet = ["com.cysharp", "jp.keijiro"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(scopes, expected);
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        let scopes = openupm_scopes(&manifest(vec![registry(
            Some("https://package.OpenUPM.com"),
            &["com.cysharp"],
        )]));
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let scopes = openupm_scopes(&manifest(vec![
            registry(Some("https://package.openupm.com"), &["com.a"]),
            registry(Some("https://package.openupm.cn"), &["com.a", "com.b"]),
        ]));
        assert_eq!(scopes.len(), 2);
    }

    #[test]
    fn test_registry_without_scopes() {
        let scopes = openupm_scopes(&manifest(vec![registry(
            Some("https://package.openupm.com"),
            &[],
        )]));
        assert!(scopes.is_empty());
    }
}

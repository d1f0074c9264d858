//! Origin classification of declared dependencies

use crate::{Category, OpenUpmScopeSet};

/// Reserved prefix of first-party package names.
pub const UNITY_PREFIX: &str = "com.unity";

/// Hosts whose presence in a declared value marks a git dependency.
const GIT_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org"];

/// Inputs a rule looks at.
struct Candidate<'a> {
    name: &'a str,
    value_lower: String,
    scopes: &'a OpenUpmScopeSet,
}

/// Ordered rule list; the first matching rule decides the category.
const RULES: &[(Category, fn(&Candidate<'_>) -> bool)] = &[
    (Category::Unity, is_unity),
    (Category::Git, is_git),
    (Category::OpenUpm, is_openupm),
];

fn is_unity(candidate: &Candidate<'_>) -> bool {
    candidate.name.starts_with(UNITY_PREFIX)
}

fn is_git(candidate: &Candidate<'_>) -> bool {
    looks_like_git_url(&candidate.value_lower)
}

fn is_openupm(candidate: &Candidate<'_>) -> bool {
    candidate
        .scopes
        .iter()
        .any(|scope| candidate.name.starts_with(scope.as_str()))
}

/// Whether an already ASCII-lowercased declared value names a git source.
fn looks_like_git_url(value_lower: &str) -> bool {
    value_lower.starts_with("git+")
        || value_lower.starts_with("https://")
        || GIT_HOSTS.iter().any(|host| value_lower.contains(host))
}

/// Assign exactly one category to a dependency.
///
/// Rules run in priority order: `com.unity` names, then git URLs, then
/// OpenUPM scopes; anything else is [`Category::Standard`]. A `com.unity`
/// package declared through a git URL is therefore still `Unity`.
pub fn classify(name: &str, declared_value: &str, scopes: &OpenUpmScopeSet) -> Category {
    let candidate = Candidate {
        name,
        value_lower: declared_value.to_ascii_lowercase(),
        scopes,
    };

    RULES
        .iter()
        .find(|(_, matches)| matches(&candidate))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Standard)
}

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ReleaseBotError, Result};

fn ref_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^refs/[a-zA-Z]+/(.+)$").ok())
        .as_ref()
}

/// Extract the branch name from a full git ref such as `refs/heads/main`.
///
/// Everything after the ref kind is the name, so `refs/heads/feature/login`
/// yields `feature/login`.
///
/// # Errors
/// * `MalformedRef` - if the ref is absent or is not shaped `refs/<kind>/<name>`
pub fn current_branch(github_ref: Option<&str>) -> Result<String> {
    let github_ref = match github_ref {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ReleaseBotError::malformed_ref("Failed to detect branch")),
    };

    match ref_pattern()
        .and_then(|re| re.captures(github_ref))
        .and_then(|c| c.get(1))
    {
        Some(name) => Ok(name.as_str().to_string()),
        None => {
            tracing::error!(github_ref, "🙊 Malformed branch");
            Err(ReleaseBotError::malformed_ref(
                "Cannot retrieve branch name from GITHUB_REF",
            ))
        }
    }
}

//! core::naming
//!
//! Deterministic names derived from the application and repository.
//!
//! # Features
//!
//! - Pipeline identity (`pipeline-{app}-{repo}`, capped at 100 characters)
//! - Access-token secret names (`github-token-{app}-{repo}`)
//!
//! Truncation only ever removes characters from the tail of the repository
//! segment. Two long, nearly identical repository names can therefore map
//! to the same pipeline name; that collision is accepted.

use thiserror::Error;

use super::types::PipelineName;

/// Maximum length of a pipeline name, in characters.
pub const MAX_PIPELINE_NAME_LEN: usize = 100;

const PIPELINE_NAME_PREFIX: &str = "pipeline-";
const GITHUB_SECRET_PREFIX: &str = "github-token-";

/// Errors from name derivation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error(
        "application name {app} is too long to derive a pipeline name: \
         the prefix alone must be shorter than {max} characters"
    )]
    ApplicationNameTooLong { app: String, max: usize },
}

/// Build the pipeline name for an application and repository.
///
/// The name is `pipeline-{app}-{repo}`. When that exceeds
/// [`MAX_PIPELINE_NAME_LEN`], characters are dropped from the end of the
/// repository segment until the name is exactly the maximum length.
///
/// # Errors
///
/// Returns [`NamingError::ApplicationNameTooLong`] when `pipeline-{app}-`
/// leaves no room for any part of the repository name.
///
/// # Example
///
/// ```
/// use convoy::core::naming::pipeline_name;
///
/// let name = pipeline_name("goodmoose", "repo-man").unwrap();
/// assert_eq!(name.as_str(), "pipeline-goodmoose-repo-man");
/// ```
pub fn pipeline_name(app: &str, repo: &str) -> Result<PipelineName, NamingError> {
    let prefix = format!("{PIPELINE_NAME_PREFIX}{app}-");
    let prefix_len = prefix.chars().count();
    if prefix_len >= MAX_PIPELINE_NAME_LEN {
        return Err(NamingError::ApplicationNameTooLong {
            app: app.to_string(),
            max: MAX_PIPELINE_NAME_LEN,
        });
    }

    let room = MAX_PIPELINE_NAME_LEN - prefix_len;
    let mut name = prefix;
    name.extend(repo.chars().take(room));
    Ok(PipelineName::from_parts_unchecked(name))
}

/// Name of the secret holding a GitHub access token for a pipeline source.
///
/// # Example
///
/// ```
/// use convoy::core::naming::github_secret_name;
///
/// assert_eq!(github_secret_name("badgoose", "goose"), "github-token-badgoose-goose");
/// ```
pub fn github_secret_name(app: &str, repo: &str) -> String {
    format!("{GITHUB_SECRET_PREFIX}{app}-{repo}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_name_basic() {
        let name = pipeline_name("goodmoose", "repo-man").unwrap();
        assert_eq!(name.as_str(), "pipeline-goodmoose-repo-man");
    }

    #[test]
    fn pipeline_name_truncates_repo_segment() {
        let name = pipeline_name(
            "goodmoose01234567820123456783012345678401234567850",
            "repo-man101234567820123456783012345678401234567850",
        )
        .unwrap();
        assert_eq!(
            name.as_str(),
            "pipeline-goodmoose01234567820123456783012345678401234567850-repo-man10123456782012345678301234567840"
        );
        assert_eq!(name.as_str().len(), MAX_PIPELINE_NAME_LEN);
    }

    #[test]
    fn pipeline_name_exactly_at_limit_is_untouched() {
        // 9 + 40 + 1 + 50 = 100
        let app = "a".repeat(40);
        let repo = "r".repeat(50);
        let name = pipeline_name(&app, &repo).unwrap();
        assert_eq!(name.as_str(), format!("pipeline-{app}-{repo}"));
    }

    #[test]
    fn pipeline_name_keeps_one_repo_char_at_boundary() {
        // 9 + 89 + 1 = 99, one character of room
        let app = "a".repeat(89);
        let name = pipeline_name(&app, "repo").unwrap();
        assert_eq!(name.as_str().len(), MAX_PIPELINE_NAME_LEN);
        assert!(name.as_str().ends_with("-r"));
    }

    #[test]
    fn pipeline_name_rejects_oversized_app() {
        let app = "a".repeat(90);
        let err = pipeline_name(&app, "repo").unwrap_err();
        assert_eq!(
            err,
            NamingError::ApplicationNameTooLong {
                app,
                max: MAX_PIPELINE_NAME_LEN
            }
        );
    }

    #[test]
    fn github_secret_name_format() {
        assert_eq!(
            github_secret_name("badgoose", "goose"),
            "github-token-badgoose-goose"
        );
    }
}

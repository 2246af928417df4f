//! provider::bitbucket
//!
//! Bitbucket repository references.
//!
//! Accepted dialects:
//! - `https://[{user}@]bitbucket.org/{owner}/{name}[.git]`
//! - `ssh://git@bitbucket.org:{owner}/{name}[.git]`
//! - `git@bitbucket.org:{owner}/{name}[.git]`

use super::classify::{strip_git_suffix, ClassifyError};

/// Host marker that routes a reference to the Bitbucket grammar.
pub(crate) const HOST: &str = "bitbucket.org";

/// A reference that has been classified as a Bitbucket repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitbucketUrl {
    raw: String,
    owner: String,
    name: String,
}

impl BitbucketUrl {
    /// Parse a Bitbucket repository reference.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::MalformedBitbucket`] if the reference does not
    /// contain `bitbucket.org` followed by `{owner}/{name}`.
    ///
    /// # Example
    ///
    /// ```
    /// use convoy::provider::BitbucketUrl;
    ///
    /// let url = BitbucketUrl::parse("https://huanjani@bitbucket.org/huanjani/sample.git").unwrap();
    /// assert_eq!(url.owner(), "huanjani");
    /// assert_eq!(url.name(), "sample");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ClassifyError> {
        let malformed = || ClassifyError::MalformedBitbucket {
            url: raw.to_string(),
        };

        let (_, rest) = raw.split_once(HOST).ok_or_else(malformed)?;
        let path = rest
            .strip_prefix(':')
            .or_else(|| rest.strip_prefix('/'))
            .ok_or_else(malformed)?;
        let path = strip_git_suffix(path.trim_end_matches('/'));

        let (owner, name) = path.split_once('/').ok_or_else(malformed)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(malformed());
        }

        Ok(Self {
            raw: raw.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// The reference exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Workspace or user owning the repository.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name, without any `.git` suffix.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> (String, String) {
        let url = BitbucketUrl::parse(raw).expect("should parse");
        (url.owner().to_string(), url.name().to_string())
    }

    #[test]
    fn https_with_user() {
        assert_eq!(
            parsed("https://huanjani@bitbucket.org/huanjani/aws-copilot-sample-service"),
            (
                "huanjani".to_string(),
                "aws-copilot-sample-service".to_string()
            )
        );
    }

    #[test]
    fn https_without_user() {
        assert_eq!(
            parsed("https://bitbucket.org/badgoose/goose.git"),
            ("badgoose".to_string(), "goose".to_string())
        );
    }

    #[test]
    fn ssh_url() {
        assert_eq!(
            parsed("ssh://git@bitbucket.org:huanjani/aws-copilot-sample-service"),
            (
                "huanjani".to_string(),
                "aws-copilot-sample-service".to_string()
            )
        );
    }

    #[test]
    fn scp_style() {
        assert_eq!(
            parsed("git@bitbucket.org:badgoose/goose.git"),
            ("badgoose".to_string(), "goose".to_string())
        );
    }

    #[test]
    fn rejects_bare_host() {
        let err = BitbucketUrl::parse("bitbucket.org").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to parse the Bitbucket repository name from bitbucket.org"
        );
    }

    #[test]
    fn rejects_owner_only() {
        assert!(BitbucketUrl::parse("https://bitbucket.org/badgoose").is_err());
    }

    #[test]
    fn rejects_extra_segments() {
        assert!(BitbucketUrl::parse("https://bitbucket.org/badgoose/goose/src/main").is_err());
    }
}

//! provider::discovery
//!
//! Candidate repositories from a local remote listing.
//!
//! The input is the raw output of `git remote -v`:
//!
//! ```text
//! origin	git@github.com:badgoose/goose.git (fetch)
//! origin	git@github.com:badgoose/goose.git (push)
//! ```
//!
//! Each line contributes its URL token with any `.git` suffix removed. Only
//! URLs that classify as a supported provider survive; duplicates collapse
//! onto their first occurrence.

use super::classify::{classify_lenient, strip_git_suffix};

/// Extract the ordered, de-duplicated candidate URLs from a remote listing.
///
/// # Example
///
/// ```
/// use convoy::provider::discover_candidates;
///
/// let listing = "origin\thttps://github.com/koke/grit (fetch)\n\
///                origin\thttps://github.com/koke/grit (push)\n\
///                mirror\tverybad@gitlab.com/whatever (fetch)\n";
/// assert_eq!(discover_candidates(listing), vec!["https://github.com/koke/grit"]);
/// ```
pub fn discover_candidates(listing: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for line in listing.lines() {
        let Some(url) = line.split_whitespace().nth(1) else {
            continue;
        };
        let url = strip_git_suffix(url);
        if classify_lenient(url).is_none() {
            continue;
        }
        if !candidates.iter().any(|c| c == url) {
            candidates.push(url.to_string());
        }
    }

    candidates
}

/// How many candidates discovery produced, and what the caller should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    /// Nothing usable; the caller must fail or ask for an explicit URL.
    None,
    /// Exactly one; selected without prompting.
    Single(String),
    /// Several; the caller presents them in this order.
    Multiple(Vec<String>),
}

impl From<Vec<String>> for Candidates {
    fn from(mut urls: Vec<String>) -> Self {
        match urls.len() {
            0 => Candidates::None,
            1 => Candidates::Single(urls.remove(0)),
            _ => Candidates::Multiple(urls),
        }
    }
}

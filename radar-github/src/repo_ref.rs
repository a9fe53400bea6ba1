//! Repository references given on the command line

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// An `owner/repo` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoRef {
    type Err = Error;

    /// Supports formats:
    /// - owner/repo
    /// - https://github.com/owner/repo
    /// - git@github.com:owner/repo.git
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.starts_with("https://") || s.starts_with("http://") {
            let url = url::Url::parse(s).map_err(|e| Error::Parse(e.to_string()))?;
            let path = url.path().trim_start_matches('/').trim_end_matches('/');
            return split_pair(path.trim_end_matches(".git"))
                .ok_or_else(|| Error::Parse(format!("Invalid GitHub URL path: {}", path)));
        }

        if let Some(rest) = s.strip_prefix("git@") {
            return rest
                .split_once(':')
                .and_then(|(_, path)| split_pair(path.trim_end_matches(".git")))
                .ok_or_else(|| Error::Parse(format!("Invalid SSH URL: {}", s)));
        }

        match s.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
                Ok(RepoRef::new(*owner, repo.trim_end_matches(".git")))
            }
            _ => Err(Error::Parse(format!(
                "Invalid repository format: {}. Expected owner/repo",
                s
            ))),
        }
    }
}

/// First two path segments as owner and repo
fn split_pair(path: &str) -> Option<RepoRef> {
    let mut parts = path.split('/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
            Some(RepoRef::new(owner, repo))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shorthand() {
        let r: RepoRef = "owner/repo".parse().unwrap();
        assert_eq!(r, RepoRef::new("owner", "repo"));
        assert_eq!(r.to_string(), "owner/repo");
    }

    #[test]
    fn test_parse_https_url() {
        let r: RepoRef = "https://github.com/owner/repo".parse().unwrap();
        assert_eq!(r, RepoRef::new("owner", "repo"));
    }

    #[test]
    fn test_parse_https_url_with_git_suffix() {
        let r: RepoRef = "https://github.com/owner/repo.git".parse().unwrap();
        assert_eq!(r, RepoRef::new("owner", "repo"));
    }

    #[test]
    fn test_parse_https_url_with_extra_path() {
        let r: RepoRef = "https://github.com/owner/repo/pulls".parse().unwrap();
        assert_eq!(r, RepoRef::new("owner", "repo"));
    }

    #[test]
    fn test_parse_ssh_url() {
        let r: RepoRef = "git@github.com:owner/repo.git".parse().unwrap();
        assert_eq!(r, RepoRef::new("owner", "repo"));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("invalid".parse::<RepoRef>().is_err());
        assert!("a/b/c".parse::<RepoRef>().is_err());
        assert!("/repo".parse::<RepoRef>().is_err());
        assert!("https://github.com/owner".parse::<RepoRef>().is_err());
    }
}

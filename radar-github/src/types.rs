//! Wire shapes of the GitHub REST responses Radar reads
//!
//! Only the fields the normalizers use are modelled; everything else in the
//! payload is ignored by serde.

use serde::Deserialize;

/// `GET /orgs/{org}/repos` item
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub default_branch: String,
}

/// Account reference embedded in issues and pull requests
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub login: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLabel {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Open/closed state as GitHub reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawState {
    Open,
    Closed,
}

/// `GET /repos/{owner}/{repo}/issues` item
///
/// The issues endpoint also lists pull requests; those carry a
/// `pull_request` object.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub user: Option<RawUser>,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    #[serde(default)]
    pub assignees: Vec<RawUser>,
    pub created_at: String,
    pub updated_at: String,
    pub html_url: String,
    pub state: RawState,
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// `GET /repos/{owner}/{repo}/pulls` item
#[derive(Debug, Clone, Deserialize)]
pub struct RawPullRequest {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub user: Option<RawUser>,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    #[serde(default)]
    pub assignees: Vec<RawUser>,
    pub created_at: String,
    pub updated_at: String,
    pub html_url: String,
    pub state: RawState,
    pub merged_at: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

/// `GET /repos/{owner}/{repo}/branches` item
#[derive(Debug, Clone, Deserialize)]
pub struct RawBranch {
    pub name: String,
    pub commit: RawBranchCommit,
}

/// Head commit reference carried by a branch listing
#[derive(Debug, Clone, Deserialize)]
pub struct RawBranchCommit {
    pub sha: String,
    /// Absolute API URL of the commit detail
    pub url: String,
}

/// `GET /repos/{owner}/{repo}/commits/{sha}` response, trimmed to the author date
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitDetail {
    pub commit: RawCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    pub author: Option<RawGitActor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGitActor {
    pub date: Option<String>,
}

impl RawCommitDetail {
    /// Author date of the commit, if GitHub returned one
    pub fn author_date(self) -> Option<String> {
        self.commit.author.and_then(|a| a.date)
    }
}

/// Error body returned with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct RawErrorBody {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_pull_request_marker() {
        let issue: RawIssue = serde_json::from_value(json!({
            "id": 1,
            "number": 7,
            "title": "Fix it",
            "user": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z",
            "html_url": "https://github.com/acme/api/pull/7",
            "state": "open",
            "pull_request": { "url": "https://api.github.com/repos/acme/api/pulls/7" }
        }))
        .unwrap();
        assert!(issue.is_pull_request());
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let result: Result<RawState, _> = serde_json::from_value(json!("locked"));
        assert!(result.is_err());
    }

    #[test]
    fn test_commit_author_date() {
        let detail: RawCommitDetail = serde_json::from_value(json!({
            "sha": "abc",
            "commit": { "author": { "name": "a", "date": "2024-03-04T05:06:07Z" } }
        }))
        .unwrap();
        assert_eq!(detail.author_date().as_deref(), Some("2024-03-04T05:06:07Z"));

        let detail: RawCommitDetail =
            serde_json::from_value(json!({ "commit": { "author": null } })).unwrap();
        assert_eq!(detail.author_date(), None);
    }
}

//! Issue listing
//!
//! GitHub's issues endpoint returns pull requests as well; those are dropped
//! here and listed through [`GitHubClient::get_repository_pulls`] instead.

use tracing::{debug, info};

use crate::models::{author_fields, ItemKind, NormalizedItem};
use crate::types::RawIssue;
use crate::{GitHubClient, Result};

impl NormalizedItem {
    /// Normalize an issue that is not a pull request
    pub fn from_issue(owner: &str, repo: &str, raw: RawIssue) -> Self {
        let (author, author_avatar) = author_fields(raw.user);
        NormalizedItem {
            id: Self::make_id("issue", owner, repo, raw.id),
            kind: ItemKind::Issue {
                state: raw.state.into(),
                number: raw.number,
            },
            repository: repo.to_string(),
            repository_full_name: format!("{}/{}", owner, repo),
            title: raw.title,
            author,
            author_avatar,
            labels: raw.labels.into_iter().map(Into::into).collect(),
            assignees: raw.assignees.into_iter().map(Into::into).collect(),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            url: raw.html_url,
        }
    }
}

impl GitHubClient {
    /// List all issues of a repository, open and closed, without pull requests
    pub async fn get_repository_issues(&self, owner: &str, repo: &str) -> Result<Vec<NormalizedItem>> {
        let key = format!("issues:{}/{}", owner, repo);
        if let Some(cached) = self.item_cache.get(&key) {
            debug!(owner, repo, count = cached.len(), "Issues served from cache");
            return Ok(cached);
        }

        let raw: Vec<RawIssue> = self
            .paginate(&format!("/repos/{}/{}/issues?state=all", owner, repo))
            .await?;
        let fetched = raw.len();
        let issues: Vec<NormalizedItem> = raw
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .map(|issue| NormalizedItem::from_issue(owner, repo, issue))
            .collect();

        info!(
            owner,
            repo,
            count = issues.len(),
            skipped_pulls = fetched - issues.len(),
            "Fetched issues"
        );
        self.item_cache.set(key, issues.clone());
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{mock_client, API};
    use crate::models::{IssueState, ItemKind};
    use serde_json::{json, Value};

    fn issue(id: u64, number: u64, state: &str, is_pr: bool) -> Value {
        let mut value = json!({
            "id": id,
            "number": number,
            "title": format!("Issue {}", number),
            "user": { "login": "octocat", "avatar_url": "https://avatars.example/octocat" },
            "labels": [{ "name": "bug", "color": "d73a4a" }],
            "assignees": [{ "login": "hubot", "avatar_url": null }],
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-02-01T00:00:00Z",
            "html_url": format!("https://github.com/acme/api/issues/{}", number),
            "state": state
        });
        if is_pr {
            value["pull_request"] = json!({ "url": "https://api.github.com/repos/acme/api/pulls/1" });
        }
        value
    }

    fn issues_url(repo: &str) -> String {
        format!("{}/repos/acme/{}/issues?state=all&per_page=100&page=1", API, repo)
    }

    #[tokio::test]
    async fn test_pull_requests_are_excluded() {
        let (client, transport) = mock_client();
        transport.push_json(
            issues_url("api"),
            json!([issue(1, 10, "open", false), issue(2, 11, "open", true), issue(3, 12, "closed", false)]),
        );

        let issues = client.get_repository_issues("acme", "api").await.unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id, "issue-acme-api-1");
        assert_eq!(issues[1].id, "issue-acme-api-3");
        assert_eq!(
            issues[1].kind,
            ItemKind::Issue {
                state: IssueState::Closed,
                number: 12
            }
        );

        let first = &issues[0];
        assert_eq!(first.kind.as_str(), "issue");
        assert_eq!(first.repository, "api");
        assert_eq!(first.repository_full_name, "acme/api");
        assert_eq!(first.author, "octocat");
        assert_eq!(first.author_avatar.as_deref(), Some("https://avatars.example/octocat"));
        assert_eq!(first.labels[0].name, "bug");
        assert_eq!(first.labels[0].color, "d73a4a");
        assert_eq!(first.assignees[0].login, "hubot");
        assert_eq!(first.created_at, "2024-01-01T00:00:00Z");
        assert_eq!(first.url, "https://github.com/acme/api/issues/10");
    }

    #[tokio::test]
    async fn test_missing_author_is_empty() {
        let (client, transport) = mock_client();
        let mut raw = issue(1, 10, "open", false);
        raw["user"] = Value::Null;
        transport.push_json(issues_url("api"), json!([raw]));

        let issues = client.get_repository_issues("acme", "api").await.unwrap();
        assert_eq!(issues[0].author, "");
        assert!(issues[0].author_avatar.is_none());
    }

    #[tokio::test]
    async fn test_cache_keys_are_per_repository() {
        let (client, transport) = mock_client();
        transport.push_json(issues_url("b"), json!([issue(1, 1, "open", false)]));
        transport.push_json(issues_url("c"), json!([issue(2, 1, "open", false)]));

        let b = client.get_repository_issues("acme", "b").await.unwrap();
        let c = client.get_repository_issues("acme", "c").await.unwrap();
        assert_eq!(b[0].id, "issue-acme-b-1");
        assert_eq!(c[0].id, "issue-acme-c-2");
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_repeat_calls_hit_cache_until_cleared() {
        let (client, transport) = mock_client();
        transport.push_json(issues_url("api"), json!([issue(1, 10, "open", false)]));
        transport.push_json(issues_url("api"), json!([issue(1, 10, "closed", false)]));

        let first = client.get_repository_issues("acme", "api").await.unwrap();
        let second = client.get_repository_issues("acme", "api").await.unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(transport.request_count(), 1);

        client.clear_cache();
        let third = client.get_repository_issues("acme", "api").await.unwrap();
        assert_eq!(transport.request_count(), 2);
        assert_eq!(third[0].kind.state(), Some("closed"));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let (client, transport) = mock_client();

        assert!(client.get_repository_issues("acme", "api").await.is_err());

        transport.push_json(issues_url("api"), json!([]));
        let issues = client.get_repository_issues("acme", "api").await.unwrap();
        assert!(issues.is_empty());
        assert_eq!(transport.request_count(), 2);
    }
}

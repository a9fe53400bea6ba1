//! Pull request listing

use tracing::{debug, info};

use crate::models::{author_fields, ItemKind, NormalizedItem, PrState};
use crate::types::RawPullRequest;
use crate::{GitHubClient, Result};

impl NormalizedItem {
    /// Normalize a pull request; a merge timestamp makes it `merged`
    pub fn from_pull_request(owner: &str, repo: &str, raw: RawPullRequest) -> Self {
        let (author, author_avatar) = author_fields(raw.user);
        NormalizedItem {
            id: Self::make_id("pr", owner, repo, raw.id),
            kind: ItemKind::PullRequest {
                state: PrState::derive(raw.state, raw.merged_at.as_deref()),
                number: raw.number,
                is_draft: raw.draft,
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
    /// List all pull requests of a repository, open, closed and merged
    pub async fn get_repository_pulls(&self, owner: &str, repo: &str) -> Result<Vec<NormalizedItem>> {
        let key = format!("pulls:{}/{}", owner, repo);
        if let Some(cached) = self.item_cache.get(&key) {
            debug!(owner, repo, count = cached.len(), "Pull requests served from cache");
            return Ok(cached);
        }

        let raw: Vec<RawPullRequest> = self
            .paginate(&format!("/repos/{}/{}/pulls?state=all", owner, repo))
            .await?;
        let pulls: Vec<NormalizedItem> = raw
            .into_iter()
            .map(|pr| NormalizedItem::from_pull_request(owner, repo, pr))
            .collect();

        info!(owner, repo, count = pulls.len(), "Fetched pull requests");
        self.item_cache.set(key, pulls.clone());
        Ok(pulls)
    }
}

//! Branch listing with best-effort activity dates
//!
//! Branch listings carry no dates, so each branch's head commit is looked up
//! to find its author date. Those lookups run concurrently and a failed one
//! only leaves that branch undated.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::client::RequestOptions;
use crate::models::{ItemKind, NormalizedItem};
use crate::types::{RawBranch, RawCommitDetail};
use crate::{GitHubClient, Result};

impl NormalizedItem {
    /// Normalize a branch; both timestamps are the head commit date, or empty
    pub fn from_branch(
        owner: &str,
        repo: &str,
        web_url: &str,
        branch: RawBranch,
        commit_date: Option<String>,
    ) -> Self {
        let date = commit_date.unwrap_or_default();
        NormalizedItem {
            id: Self::make_id("branch", owner, repo, &branch.name),
            kind: ItemKind::Branch,
            repository: repo.to_string(),
            repository_full_name: format!("{}/{}", owner, repo),
            url: format!(
                "{}/{}/{}/tree/{}",
                web_url.trim_end_matches('/'),
                owner,
                repo,
                branch.name
            ),
            title: branch.name,
            author: String::new(),
            author_avatar: None,
            labels: Vec::new(),
            assignees: Vec::new(),
            created_at: date.clone(),
            updated_at: date,
        }
    }
}

impl GitHubClient {
    /// List all branches of a repository, dated by their head commit
    pub async fn get_repository_branches(&self, owner: &str, repo: &str) -> Result<Vec<NormalizedItem>> {
        let key = format!("branches:{}/{}", owner, repo);
        if let Some(cached) = self.item_cache.get(&key) {
            debug!(owner, repo, count = cached.len(), "Branches served from cache");
            return Ok(cached);
        }

        let raw: Vec<RawBranch> = self
            .paginate(&format!("/repos/{}/{}/branches", owner, repo))
            .await?;

        let dates = join_all(raw.iter().map(|branch| self.branch_commit_date(branch))).await;
        let undated = dates.iter().filter(|d| d.is_none()).count();

        let web_url = &self.settings().web_url;
        let branches: Vec<NormalizedItem> = raw
            .into_iter()
            .zip(dates)
            .map(|(branch, date)| NormalizedItem::from_branch(owner, repo, web_url, branch, date))
            .collect();

        info!(owner, repo, count = branches.len(), undated, "Fetched branches");
        self.item_cache.set(key, branches.clone());
        Ok(branches)
    }

    /// Author date of a branch's head commit
    ///
    /// Any failure is logged and reported as `None`; it never fails the listing.
    async fn branch_commit_date(&self, branch: &RawBranch) -> Option<String> {
        let detail: Result<RawCommitDetail> = self
            .request(&branch.commit.url, &RequestOptions::default())
            .await;

        match detail {
            Ok(detail) => detail.author_date(),
            Err(e) => {
                warn!(
                    branch = %branch.name,
                    sha = %branch.commit.sha,
                    error = %e,
                    "Could not fetch branch head commit"
                );
                None
            }
        }
    }
}

//! Aggregated activity across repositories
//!
//! Combines issues, pull requests and branches of several repositories into
//! one list that can be filtered and sorted the way the dashboard shows it.

use std::cmp::Reverse;
use std::str::FromStr;

use futures::future::try_join_all;
use futures::try_join;

use crate::models::NormalizedItem;
use crate::{GitHubClient, RepoRef, Result};

/// Order of the aggregated list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recently updated first
    #[default]
    Updated,
    /// Most recently created first
    Created,
    /// Title, case-insensitive A-Z
    Title,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "updated" => Ok(SortKey::Updated),
            "created" => Ok(SortKey::Created),
            "title" => Ok(SortKey::Title),
            other => Err(format!(
                "unknown sort key '{}', expected updated, created or title",
                other
            )),
        }
    }
}

/// Which items to keep
///
/// Empty lists match everything.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// `issue`, `pr` or `branch`
    pub kinds: Vec<String>,
    /// `open`, `closed` or `merged`; branches have no state and never match
    pub states: Vec<String>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &NormalizedItem) -> bool {
        let kind_ok = self.kinds.is_empty()
            || self
                .kinds
                .iter()
                .any(|k| k.eq_ignore_ascii_case(item.kind.as_str()));

        let state_ok = self.states.is_empty()
            || item
                .kind
                .state()
                .is_some_and(|state| self.states.iter().any(|s| s.eq_ignore_ascii_case(state)));

        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => item
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        };

        kind_ok && state_ok && search_ok
    }
}

/// Sort in place; undated items go last for the date keys
pub fn sort_items(items: &mut [NormalizedItem], key: SortKey) {
    match key {
        SortKey::Updated => items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortKey::Created => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Title => items.sort_by_key(|item| {
            (item.title.to_lowercase(), Reverse(item.updated_at.clone()))
        }),
    }
}

impl GitHubClient {
    /// Issues, pull requests and branches of one repository
    pub async fn get_repository_activity(&self, repo: &RepoRef) -> Result<Vec<NormalizedItem>> {
        let (issues, pulls, branches) = try_join!(
            self.get_repository_issues(&repo.owner, &repo.repo),
            self.get_repository_pulls(&repo.owner, &repo.repo),
            self.get_repository_branches(&repo.owner, &repo.repo)
        )?;

        let mut items = issues;
        items.extend(pulls);
        items.extend(branches);
        Ok(items)
    }

    /// Filtered, sorted activity across several repositories
    pub async fn get_dashboard(
        &self,
        repos: &[RepoRef],
        filter: &ItemFilter,
        sort: SortKey,
    ) -> Result<Vec<NormalizedItem>> {
        let per_repo = try_join_all(repos.iter().map(|r| self.get_repository_activity(r))).await?;

        let mut items: Vec<NormalizedItem> = per_repo
            .into_iter()
            .flatten()
            .filter(|item| filter.matches(item))
            .collect();
        sort_items(&mut items, sort);
        Ok(items)
    }
}

//! Normalized shapes handed to callers
//!
//! Issues, pull requests and branches share one [`NormalizedItem`] shape so
//! callers can sort and filter them together. Kind-specific fields live in
//! [`ItemKind`].

use serde::{Deserialize, Serialize};

use crate::types::{RawLabel, RawRepository, RawState, RawUser};

/// A repository in an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub is_private: bool,
    pub default_branch: String,
}

impl From<RawRepository> for Repository {
    fn from(raw: RawRepository) -> Self {
        Repository {
            id: raw.id,
            name: raw.name,
            full_name: raw.full_name,
            description: raw.description,
            url: raw.html_url,
            is_private: raw.private,
            default_branch: raw.default_branch,
        }
    }
}

/// Label attached to an issue or pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// Hex color without the leading `#`
    pub color: String,
}

impl From<RawLabel> for Label {
    fn from(raw: RawLabel) -> Self {
        Label {
            name: raw.name,
            color: raw.color.trim_start_matches('#').to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub login: String,
    pub avatar_url: Option<String>,
}

impl From<RawUser> for Assignee {
    fn from(raw: RawUser) -> Self {
        Assignee {
            login: raw.login,
            avatar_url: raw.avatar_url,
        }
    }
}

/// Issue state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl From<RawState> for IssueState {
    fn from(state: RawState) -> Self {
        match state {
            RawState::Open => IssueState::Open,
            RawState::Closed => IssueState::Closed,
        }
    }
}

/// Pull request state, with merged split out of closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
    Merged,
}

impl PrState {
    /// Derive the state from the raw state and merge timestamp
    pub fn derive(state: RawState, merged_at: Option<&str>) -> Self {
        match (merged_at, state) {
            (Some(_), _) => PrState::Merged,
            (None, RawState::Open) => PrState::Open,
            (None, RawState::Closed) => PrState::Closed,
        }
    }
}

/// What a [`NormalizedItem`] is, with the fields that only make sense for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItemKind {
    #[serde(rename = "issue")]
    Issue { state: IssueState, number: u64 },
    #[serde(rename = "pr")]
    PullRequest {
        state: PrState,
        number: u64,
        #[serde(rename = "isDraft")]
        is_draft: bool,
    },
    #[serde(rename = "branch")]
    Branch,
}

impl ItemKind {
    /// Prefix used in item ids and in filters
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Issue { .. } => "issue",
            ItemKind::PullRequest { .. } => "pr",
            ItemKind::Branch => "branch",
        }
    }

    /// State as a lowercase string, `None` for branches
    pub fn state(&self) -> Option<&'static str> {
        match self {
            ItemKind::Issue { state, .. } => Some(match state {
                IssueState::Open => "open",
                IssueState::Closed => "closed",
            }),
            ItemKind::PullRequest { state, .. } => Some(match state {
                PrState::Open => "open",
                PrState::Closed => "closed",
                PrState::Merged => "merged",
            }),
            ItemKind::Branch => None,
        }
    }

    pub fn number(&self) -> Option<u64> {
        match self {
            ItemKind::Issue { number, .. } | ItemKind::PullRequest { number, .. } => Some(*number),
            ItemKind::Branch => None,
        }
    }
}

/// Issue, pull request or branch in one shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    /// `{kind}-{owner}-{repo}-{upstream id or branch name}`
    pub id: String,
    #[serde(flatten)]
    pub kind: ItemKind,
    pub repository: String,
    /// `owner/repo`
    pub repository_full_name: String,
    pub title: String,
    /// Empty when there is no author (always for branches)
    pub author: String,
    pub author_avatar: Option<String>,
    pub labels: Vec<Label>,
    pub assignees: Vec<Assignee>,
    /// ISO-8601, empty when unknown
    pub created_at: String,
    /// ISO-8601, empty when unknown
    pub updated_at: String,
    pub url: String,
}

impl NormalizedItem {
    /// Build the stable item id
    pub fn make_id(kind: &str, owner: &str, repo: &str, key: impl std::fmt::Display) -> String {
        format!("{}-{}-{}-{}", kind, owner, repo, key)
    }
}

/// Split an optional account into login and avatar
pub(crate) fn author_fields(user: Option<RawUser>) -> (String, Option<String>) {
    match user {
        Some(user) => (user.login, user.avatar_url),
        None => (String::new(), None),
    }
}

//! Radar GitHub - read-only GitHub access for the Radar dashboard
//!
//! This crate lists repositories, issues, pull requests and branches through
//! the GitHub REST API. It walks every page of each collection, normalizes
//! issues, pull requests and branches into one item shape, caches listings for
//! a fixed time and refuses requests while the tracked rate limit is spent.

mod branches;
mod cache;
mod client;
mod dashboard;
mod error;
pub mod http;
mod issues;
mod models;
mod pagination;
mod pulls;
mod rate_limit;
mod repo_ref;
mod repos;
pub mod types;

pub use cache::TtlCache;
pub use client::{GitHubClient, RequestOptions, ACCEPT_GITHUB_JSON};
pub use dashboard::{sort_items, ItemFilter, SortKey};
pub use error::{Error, Result};
pub use models::{Assignee, IssueState, ItemKind, Label, NormalizedItem, PrState, Repository};
pub use pagination::PAGE_SIZE;
pub use rate_limit::{RateLimitInfo, RateLimitTracker, DEFAULT_RATE_LIMIT};
pub use repo_ref::RepoRef;

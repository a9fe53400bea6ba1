//! Aggregated dashboard command

use clap::Args;
use radar_github::{GitHubClient, ItemFilter, RepoRef, SortKey};

use super::{print_items, print_json, print_rate_limit};

/// Issues, pull requests and branches of several repositories in one list
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Repositories (owner/repo or GitHub URL)
    #[arg(required = true)]
    pub repos: Vec<RepoRef>,

    /// Only show these kinds (issue, pr, branch)
    #[arg(short, long = "kind", value_parser = ["issue", "pr", "branch"])]
    pub kinds: Vec<String>,

    /// Only show these states (open, closed, merged)
    #[arg(short, long = "state", value_parser = ["open", "closed", "merged"])]
    pub states: Vec<String>,

    /// Only show items whose title contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Sort order (updated, created, title)
    #[arg(long, default_value = "updated")]
    pub sort: SortKey,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl DashboardArgs {
    /// Execute the dashboard command
    pub async fn execute(&self, client: &GitHubClient, verbose: bool) -> anyhow::Result<()> {
        if verbose {
            let names: Vec<String> = self.repos.iter().map(ToString::to_string).collect();
            println!("Fetching activity for {}...", names.join(", "));
        }

        let filter = ItemFilter {
            kinds: self.kinds.clone(),
            states: self.states.clone(),
            search: self.search.clone(),
        };
        let items = client.get_dashboard(&self.repos, &filter, self.sort).await?;

        if self.json {
            return print_json(&items);
        }

        print_items(&items);
        print_rate_limit(client);
        Ok(())
    }
}

//! Single-repository listing commands

use clap::Args;
use radar_github::{GitHubClient, RepoRef};

use super::{print_items, print_json};

/// List repositories of an organization
#[derive(Args, Debug)]
pub struct ReposArgs {
    /// Organization login
    pub org: String,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ReposArgs {
    /// Execute the repos command
    pub async fn execute(&self, client: &GitHubClient) -> anyhow::Result<()> {
        let repos = client.get_organization_repos(&self.org).await?;

        if self.json {
            return print_json(&repos);
        }

        if repos.is_empty() {
            println!("No repositories found in {}.", self.org);
            return Ok(());
        }

        for repo in &repos {
            let visibility = if repo.is_private { "private" } else { "public" };
            println!("{:<40} {:<8} {}", repo.full_name, visibility, repo.default_branch);
            if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
                println!("    {}", description);
            }
        }
        println!();
        println!("{} repositories", repos.len());
        Ok(())
    }
}

/// Arguments shared by the issues, pulls and branches commands
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository (owner/repo or GitHub URL)
    pub repo: RepoRef,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Execute the issues command
    pub async fn execute_issues(&self, client: &GitHubClient) -> anyhow::Result<()> {
        let items = client
            .get_repository_issues(&self.repo.owner, &self.repo.repo)
            .await?;
        self.print(&items)
    }

    /// Execute the pulls command
    pub async fn execute_pulls(&self, client: &GitHubClient) -> anyhow::Result<()> {
        let items = client
            .get_repository_pulls(&self.repo.owner, &self.repo.repo)
            .await?;
        self.print(&items)
    }

    /// Execute the branches command
    pub async fn execute_branches(&self, client: &GitHubClient) -> anyhow::Result<()> {
        let items = client
            .get_repository_branches(&self.repo.owner, &self.repo.repo)
            .await?;
        self.print(&items)
    }

    fn print(&self, items: &[radar_github::NormalizedItem]) -> anyhow::Result<()> {
        if self.json {
            print_json(items)
        } else {
            print_items(items);
            Ok(())
        }
    }
}

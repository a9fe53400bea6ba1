//! Organization repository listing

use tracing::{debug, info};

use crate::models::Repository;
use crate::types::RawRepository;
use crate::{GitHubClient, Result};

impl GitHubClient {
    /// List every repository in an organization, cached per organization
    pub async fn get_organization_repos(&self, org: &str) -> Result<Vec<Repository>> {
        let key = format!("repos:{}", org);
        if let Some(cached) = self.repo_cache.get(&key) {
            debug!(org, count = cached.len(), "Repositories served from cache");
            return Ok(cached);
        }

        let raw: Vec<RawRepository> = self
            .paginate(&format!("/orgs/{}/repos?type=all", org))
            .await?;
        let repos: Vec<Repository> = raw.into_iter().map(Repository::from).collect();

        info!(org, count = repos.len(), "Fetched repositories");
        self.repo_cache.set(key, repos.clone());
        Ok(repos)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{mock_client, API};
    use serde_json::json;

    #[tokio::test]
    async fn test_repositories_are_mapped_and_cached() {
        let (client, transport) = mock_client();
        transport.push_json(
            format!("{}/orgs/acme/repos?type=all&per_page=100&page=1", API),
            json!([{
                "id": 11,
                "name": "api",
                "full_name": "acme/api",
                "description": null,
                "html_url": "https://github.com/acme/api",
                "private": true,
                "default_branch": "main",
                "stargazers_count": 3
            }]),
        );

        let repos = client.get_organization_repos("acme").await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].id, 11);
        assert_eq!(repos[0].full_name, "acme/api");
        assert_eq!(repos[0].url, "https://github.com/acme/api");
        assert!(repos[0].is_private);
        assert_eq!(repos[0].default_branch, "main");
        assert!(repos[0].description.is_none());

        let again = client.get_organization_repos("acme").await.unwrap();
        assert_eq!(again, repos);
        assert_eq!(transport.request_count(), 1);
    }
}

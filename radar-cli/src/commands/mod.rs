//! CLI command implementations

pub mod dashboard;
pub mod list;

pub use dashboard::DashboardArgs;
pub use list::{ListArgs, ReposArgs};

use chrono::Utc;
use radar_github::{GitHubClient, NormalizedItem, RequestOptions};
use serde::Serialize;

/// Query the rate limit endpoint and print the tracked quota
pub async fn show_limits(client: &GitHubClient) -> anyhow::Result<()> {
    // The response headers refresh the tracker; the body is not needed
    let _: serde_json::Value = client
        .request("/rate_limit", &RequestOptions::default())
        .await?;
    print_rate_limit(client);
    Ok(())
}

/// Print the tracked quota
pub fn print_rate_limit(client: &GitHubClient) {
    let info = client.get_rate_limit_info();
    let resets_in = (info.reset_at - Utc::now()).num_minutes().max(0);
    println!(
        "Rate limit: {}/{} remaining, resets at {} (in {} min)",
        info.remaining,
        info.limit,
        info.reset_at.format("%H:%M:%S UTC"),
        resets_in
    );
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print normalized items as one line each
pub fn print_items(items: &[NormalizedItem]) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }

    for item in items {
        let number = item
            .kind
            .number()
            .map(|n| format!("#{}", n))
            .unwrap_or_default();
        let state = item.kind.state().unwrap_or("-");
        let date = if item.updated_at.is_empty() {
            "unknown"
        } else {
            item.updated_at.get(..10).unwrap_or(&item.updated_at)
        };

        println!(
            "{:<6} {:<7} {:<24} {:>6}  {}  {}",
            item.kind.as_str(),
            state,
            item.repository_full_name,
            number,
            date,
            item.title
        );
        if !item.author.is_empty() {
            println!("       by {}  {}", item.author, item.url);
        } else {
            println!("       {}", item.url);
        }
    }

    println!();
    println!("{} item(s)", items.len());
}

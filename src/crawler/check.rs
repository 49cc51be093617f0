//! Standalone connectivity check for the listing page
//!
//! A single GET with a longer timeout, printing what a crawl would see:
//! status, content length, page title, and a sample of organization-looking
//! anchors. Used from the CLI's `--check` mode before committing to a full
//! run.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome, RetryPolicy};
use crate::crawler::parser::parse_page;
use crate::{HarvestError, Result};
use std::time::Duration;
use url::Url;

/// Number of sample anchors printed by the check
const SAMPLE_LINKS: usize = 10;

/// Probes the listing page and prints a short report
///
/// # Returns
///
/// * `Ok(())` - The listing page responded successfully
/// * `Err(HarvestError)` - The page is unreachable; the CLI exits non-zero
pub async fn check_connectivity(config: &Config) -> Result<()> {
    let base = Url::parse(&config.site.base_url)?;
    let listing_url = base.join(&config.site.listing_path)?;

    println!("Testing connection to: {}", listing_url);

    let client = build_http_client(
        &config.http,
        Duration::from_secs(config.crawler.check_timeout_secs),
    )?;

    // Single attempt; the check reports reachability as-is
    let retry = RetryPolicy::new(1, Duration::ZERO);
    let page = match fetch_page(&client, listing_url.as_str(), &retry).await {
        FetchOutcome::Success(page) => page,
        FetchOutcome::Failed { last_error, .. } => {
            println!("Failed: {}", last_error);
            return Err(HarvestError::SeedUnreachable {
                url: listing_url.to_string(),
                attempts: 1,
            });
        }
    };

    println!("Status Code: {}", page.status);
    println!("Content Length: {}", page.body.len());
    println!("Encoding: {}", page.encoding);

    let parsed = parse_page(&page.body);
    println!(
        "Title: {}",
        parsed.title.as_deref().unwrap_or("No title found")
    );

    let keyword = config.site.organization_segment.trim_matches('/').to_string();
    let samples: Vec<_> = parsed
        .anchors
        .iter()
        .filter(|anchor| {
            let href = anchor.href.to_lowercase();
            // "байгууллага" is Mongolian for organization; gov.mn links use
            // either form
            href.contains(&keyword) || href.contains("байгууллага")
        })
        .take(SAMPLE_LINKS)
        .collect();

    println!("Found {} potential organization links", samples.len());
    for (index, anchor) in samples.iter().enumerate() {
        let label: String = anchor.text.chars().take(50).collect();
        println!("  {}. {} -> {}", index + 1, label, anchor.href);
    }

    Ok(())
}

//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML parsing, anchor and text extraction
//! - Email pattern matching
//! - Link scope filtering
//! - Overall crawl coordination

mod check;
mod coordinator;
mod extract;
mod fetcher;
mod parser;
mod scope;

pub use check::check_connectivity;
pub use coordinator::{run_crawl, Coordinator, CrawlReport, DelayPolicy, OrganizationLink};
pub use extract::EmailExtractor;
pub use fetcher::{build_http_client, fetch_page, FetchOutcome, FetchedPage, RetryPolicy};
pub use parser::{parse_page, Anchor, ParsedPage};
pub use scope::{is_organization_listing, resolve_in_scope};

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Fetch the organization listing page
/// 2. Enumerate organization links
/// 3. Visit each organization's main page and in-scope sub-pages
/// 4. Extract and collect email records
/// 5. Write the deduplicated CSV result set
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; counters describe what was found
/// * `Err(HarvestError)` - The listing page was unreachable, or output failed
pub async fn crawl(config: Config) -> Result<CrawlReport> {
    run_crawl(config).await
}

//! Crawl coordinator - main orchestration logic
//!
//! This module drives the two-level traversal:
//! - fetch the organization listing page and enumerate organization links
//! - for each organization, fetch its main page and its in-scope sub-pages,
//!   extracting emails from every page text
//! - finalize the collected records into the deduplicated CSV result set
//!
//! Failures below the organization level are absorbed with a log line; a
//! failure while processing one organization never touches the others. Only
//! an unreachable listing page ends the run.

use crate::config::Config;
use crate::crawler::extract::EmailExtractor;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome, RetryPolicy};
use crate::crawler::parser::parse_page;
use crate::crawler::scope::{is_organization_listing, resolve_in_scope};
use crate::output::{write_csv, EmailRecord, ResultStore};
use crate::{HarvestError, Result};
use reqwest::Client;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// An organization discovered on the listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationLink {
    /// Visible link text, used as the organization name
    pub name: String,

    /// Absolute URL of the organization's main page
    pub url: Url,
}

/// Politeness pauses between requests
#[derive(Debug, Clone)]
pub struct DelayPolicy {
    /// Pause before each sub-page request
    pub page_delay: Duration,

    /// Pause after each organization
    pub organization_delay: Duration,
}

impl DelayPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_delay: Duration::from_millis(config.crawler.page_delay_ms),
            organization_delay: Duration::from_millis(config.crawler.organization_delay_ms),
        }
    }

    /// A policy with no pauses at all, for tests
    pub fn none() -> Self {
        Self {
            page_delay: Duration::ZERO,
            organization_delay: Duration::ZERO,
        }
    }
}

/// What became of one organization's processing step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrgOutcome {
    /// Main page fetched, emails and sub-pages processed
    Processed,

    /// Main page unreachable after retries; organization skipped
    Skipped,
}

/// Counters describing a completed crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Organization links found on the listing page
    pub organizations_found: usize,

    /// Organizations whose main page was processed
    pub organizations_processed: usize,

    /// Organizations skipped because their main page was unreachable, plus
    /// organizations that failed mid-processing
    pub organizations_failed: usize,

    /// Pages fetched successfully (main pages and sub-pages)
    pub pages_visited: usize,

    /// Raw email records collected before deduplication
    pub records_collected: usize,

    /// Records surviving the (organization, email) deduplication
    pub unique_records: usize,

    /// Path the CSV was written to, when at least one record survived
    pub output_path: Option<PathBuf>,
}

/// Main crawl coordinator
///
/// Owns the HTTP client, the email extractor, and the result store for one
/// run. The store is created here and handed out with the report, never
/// shared as process-wide state.
pub struct Coordinator {
    config: Config,
    client: Client,
    extractor: EmailExtractor,
    retry: RetryPolicy,
    delays: DelayPolicy,
    store: ResultStore,
}

impl Coordinator {
    /// Creates a coordinator with delays taken from the configuration
    pub fn new(config: Config) -> Result<Self> {
        let delays = DelayPolicy::from_config(&config);
        Self::with_delays(config, delays)
    }

    /// Creates a coordinator with an explicit delay policy
    ///
    /// Tests use this with [`DelayPolicy::none`] so a full crawl runs
    /// without pacing pauses.
    pub fn with_delays(config: Config, delays: DelayPolicy) -> Result<Self> {
        let client = build_http_client(
            &config.http,
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;
        let retry = RetryPolicy::new(
            config.crawler.max_attempts,
            Duration::from_millis(config.crawler.retry_delay_ms),
        );

        Ok(Self {
            config,
            client,
            extractor: EmailExtractor::new(),
            retry,
            delays,
            store: ResultStore::new(),
        })
    }

    /// Records collected so far
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Runs the full crawl: enumerate, per-organization traversal, finalize
    pub async fn run(&mut self) -> Result<CrawlReport> {
        let mut report = CrawlReport::default();

        let organizations = self.discover_organizations().await?;
        report.organizations_found = organizations.len();

        if organizations.is_empty() {
            tracing::error!("No organization links found");
        }

        let total = organizations.len();
        for (index, org) in organizations.iter().enumerate() {
            tracing::info!("Processing {}/{}: {}", index + 1, total, org.name);

            match self.process_organization(org, &mut report).await {
                Ok(OrgOutcome::Processed) => report.organizations_processed += 1,
                Ok(OrgOutcome::Skipped) => report.organizations_failed += 1,
                Err(e) => {
                    tracing::error!("Error processing {}: {}", org.name, e);
                    report.organizations_failed += 1;
                }
            }

            tokio::time::sleep(self.delays.organization_delay).await;
        }

        self.finalize(&mut report)?;
        Ok(report)
    }

    /// Fetches the listing page and enumerates organization links
    ///
    /// Links are kept in first-seen order. A candidate is recorded only if
    /// its resolved URL is new and its trimmed link text is longer than two
    /// characters; the first name seen for a URL wins.
    pub async fn discover_organizations(&self) -> Result<Vec<OrganizationLink>> {
        let base = Url::parse(&self.config.site.base_url)?;
        let listing_url = base.join(&self.config.site.listing_path)?;

        tracing::info!("Fetching organization links from {}", listing_url);
        let page = match fetch_page(&self.client, listing_url.as_str(), &self.retry).await {
            FetchOutcome::Success(page) => page,
            FetchOutcome::Failed { attempts, .. } => {
                return Err(HarvestError::SeedUnreachable {
                    url: listing_url.to_string(),
                    attempts,
                });
            }
        };

        let parsed = parse_page(&page.body);
        let mut seen_urls = HashSet::new();
        let mut organizations = Vec::new();

        for anchor in &parsed.anchors {
            if !is_organization_listing(
                &anchor.href,
                &self.config.site.listing_path,
                &self.config.site.organization_segment,
            ) {
                continue;
            }

            let full_url = match base.join(&anchor.href) {
                Ok(url) => url,
                Err(_) => continue,
            };

            let name = anchor.text.trim();
            if name.chars().count() > 2 && seen_urls.insert(full_url.to_string()) {
                organizations.push(OrganizationLink {
                    name: name.to_string(),
                    url: full_url,
                });
            }
        }

        tracing::info!("Found {} organization links", organizations.len());
        Ok(organizations)
    }

    /// Processes one organization: main page, then in-scope sub-pages
    ///
    /// An unreachable main page skips the organization (logged, not an
    /// error). The `Err` branch exists for unexpected faults and is consumed
    /// by the caller's loop, so one broken organization cannot end the run.
    async fn process_organization(
        &mut self,
        org: &OrganizationLink,
        report: &mut CrawlReport,
    ) -> Result<OrgOutcome> {
        tracing::info!("Scraping organization: {}", org.name);

        let page = match fetch_page(&self.client, org.url.as_str(), &self.retry).await {
            FetchOutcome::Success(page) => page,
            FetchOutcome::Failed { .. } => {
                tracing::warn!("Skipping {}: main page unreachable", org.name);
                return Ok(OrgOutcome::Skipped);
            }
        };
        report.pages_visited += 1;

        let parsed = parse_page(&page.body);
        self.record_emails(org, &parsed.text, org.url.as_str(), "main");

        // In-scope links, deduplicated by the (label, url) pair. The same
        // URL under different labels stays as separate entries; iteration
        // order is unspecified and correctness never depends on it.
        let mut internal_links: HashSet<(String, String)> = HashSet::new();
        for anchor in &parsed.anchors {
            if let Some(resolved) = resolve_in_scope(
                &org.url,
                &self.config.site.base_url,
                org.url.as_str(),
                &anchor.href,
            ) {
                internal_links.insert((anchor.text.clone(), resolved.to_string()));
            }
        }

        for (label, page_url) in &internal_links {
            if page_url == org.url.as_str() {
                continue;
            }

            tracing::info!("  Scraping sub-page: {}", label);
            tokio::time::sleep(self.delays.page_delay).await;

            if let FetchOutcome::Success(sub_page) =
                fetch_page(&self.client, page_url, &self.retry).await
            {
                report.pages_visited += 1;
                let page_type = if label.is_empty() {
                    "sub-page"
                } else {
                    label.as_str()
                };
                let sub_parsed = parse_page(&sub_page.body);
                self.record_emails(org, &sub_parsed.text, page_url, page_type);
            }
        }

        Ok(OrgOutcome::Processed)
    }

    /// Appends one record per extracted email
    fn record_emails(&mut self, org: &OrganizationLink, text: &str, page_url: &str, page_type: &str) {
        for email in self.extractor.extract(text) {
            self.store.add(EmailRecord {
                organization: org.name.clone(),
                email,
                page_url: page_url.to_string(),
                page_type: page_type.to_string(),
            });
        }
    }

    /// Deduplicates collected records and writes the CSV result set
    ///
    /// With zero unique records nothing is written and no file is created.
    fn finalize(&self, report: &mut CrawlReport) -> Result<()> {
        report.records_collected = self.store.len();

        let unique = self.store.finalize_deduplicated();
        report.unique_records = unique.len();

        if unique.is_empty() {
            tracing::warn!("No emails found to save");
            return Ok(());
        }

        let path = Path::new(&self.config.output.csv_path);
        write_csv(path, &unique)?;
        tracing::info!("Saved {} unique emails to {}", unique.len(), path.display());
        report.output_path = Some(path.to_path_buf());

        Ok(())
    }
}

/// Runs a complete crawl with delays taken from the configuration
pub async fn run_crawl(config: Config) -> Result<CrawlReport> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_policy_from_config() {
        let config = Config::default();
        let delays = DelayPolicy::from_config(&config);
        assert_eq!(delays.page_delay, Duration::from_secs(1));
        assert_eq!(delays.organization_delay, Duration::from_secs(3));
    }

    #[test]
    fn test_delay_policy_none_is_zero() {
        let delays = DelayPolicy::none();
        assert_eq!(delays.page_delay, Duration::ZERO);
        assert_eq!(delays.organization_delay, Duration::ZERO);
    }

    #[test]
    fn test_coordinator_creation() {
        let coordinator = Coordinator::new(Config::default());
        assert!(coordinator.is_ok());
    }
}

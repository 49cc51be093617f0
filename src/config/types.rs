use serde::Deserialize;

/// Main configuration structure for orgmail
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            crawler: CrawlerConfig::default(),
            http: HttpConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin of the target site, e.g. "https://www.gov.mn"
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Path of the organization listing page under the base URL
    #[serde(rename = "listing-path", default = "default_listing_path")]
    pub listing_path: String,

    /// Path segment that marks a link as an organization detail page
    #[serde(rename = "organization-segment", default = "default_org_segment")]
    pub organization_segment: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            listing_path: default_listing_path(),
            organization_segment: default_org_segment(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Total fetch attempts per page before giving up
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Timeout for the standalone connectivity check, in seconds
    #[serde(rename = "check-timeout-secs", default = "default_check_timeout")]
    pub check_timeout_secs: u64,

    /// Pause between failed fetch attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Pause before each sub-page request (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay")]
    pub page_delay_ms: u64,

    /// Pause after each organization (milliseconds)
    #[serde(rename = "organization-delay-ms", default = "default_org_delay")]
    pub organization_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            request_timeout_secs: default_request_timeout(),
            check_timeout_secs: default_check_timeout(),
            retry_delay_ms: default_retry_delay(),
            page_delay_ms: default_page_delay(),
            organization_delay_ms: default_org_delay(),
        }
    }
}

/// Browser-identification headers sent with every request
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV result file
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.gov.mn".to_string()
}

fn default_listing_path() -> String {
    "/mn/organization".to_string()
}

fn default_org_segment() -> String {
    "/organization/".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_request_timeout() -> u64 {
    30
}

fn default_check_timeout() -> u64 {
    60
}

fn default_retry_delay() -> u64 {
    5000
}

fn default_page_delay() -> u64 {
    1000
}

fn default_org_delay() -> u64 {
    3000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.5".to_string()
}

fn default_csv_path() -> String {
    "./gov_mn_emails.csv".to_string()
}

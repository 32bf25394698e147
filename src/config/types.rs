use serde::Deserialize;

/// Desktop Safari identity; the site rejects obvious bot agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.4 Safari/605.1.15";

/// Main configuration structure for Poster-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Remote site layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin used to qualify root-relative embed paths
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Top-level page listing every state
    #[serde(rename = "directory-url")]
    pub directory_url: String,

    /// Prefix of the document-viewer redirect that wraps some PDFs
    #[serde(rename = "viewer-url")]
    pub viewer_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.laborposters.org".to_string(),
            directory_url: "https://www.laborposters.org/".to_string(),
            viewer_url: "https://docs.google.com/viewer".to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

/// How fan-out work is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Every state and poster is its own task
    #[default]
    Parallel,
    /// One request at a time with a delay between posters
    Sequential,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    pub policy: Policy,

    /// Minimum time between poster fetches in the sequential policy (milliseconds)
    #[serde(rename = "poster-delay-ms")]
    pub poster_delay_ms: u64,

    /// Maximum number of in-flight poster fetches in the parallel policy
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Parallel,
            poster_delay_ms: 100,
            max_concurrent_requests: 16,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for `{state}/{filename}`
    #[serde(rename = "files-dir")]
    pub files_dir: String,

    /// Where to write the markdown run report, if anywhere
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            files_dir: "files".to_string(),
            summary_path: None,
        }
    }
}

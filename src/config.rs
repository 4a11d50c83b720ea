use std::time::Duration;

/// Browser viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// When a navigation is considered finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitUntil {
    /// The load event has fired
    Load,
    /// Load fired and no new resources settled during the idle window
    NetworkIdle0,
    /// Load fired and at most two new resources settled during the idle window
    #[default]
    NetworkIdle2,
}

impl WaitUntil {
    /// Number of resources allowed to complete inside the settle window,
    /// or `None` when the policy does not wait for network idle at all.
    pub fn max_inflight(&self) -> Option<usize> {
        match self {
            WaitUntil::Load => None,
            WaitUntil::NetworkIdle0 => Some(0),
            WaitUntil::NetworkIdle2 => Some(2),
        }
    }
}

/// Options used when starting the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Run without a visible window
    pub headless: bool,

    /// Extra command-line flags passed to the browser process
    pub args: Vec<String>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            args: vec![
                "--no-sandbox".to_string(),
                "--disable-setuid-sandbox".to_string(),
            ],
        }
    }
}

/// Configuration for a single scrape run
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Budget for navigation and for waiting on the ready selector (30s)
    pub timeout: Duration,

    /// User-agent string reported by the page (Chrome 120 on macOS)
    pub user_agent: String,

    /// Viewport size (1920x1080)
    pub viewport: Viewport,

    /// Headers added to every request issued by the page
    pub extra_headers: Vec<(String, String)>,

    /// Navigation completion policy (network idle, two connections tolerated)
    pub wait_until: WaitUntil,

    /// Element that must exist before extraction starts (`body`)
    pub ready_selector: String,

    /// Browser launch options (headless, sandbox disabled)
    pub launch: LaunchOptions,

    /// URL for the WebDriver instance
    pub webdriver_url: String,
}

/// Default value for timeout
fn default_timeout() -> Duration {
    Duration::from_millis(30_000)
}

/// Default value for user_agent
fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

/// Default value for extra_headers
fn default_extra_headers() -> Vec<(String, String)> {
    vec![
        ("Accept-Language".to_string(), "en-US,en;q=0.9".to_string()),
        (
            "Accept-Encoding".to_string(),
            "gzip, deflate, br".to_string(),
        ),
    ]
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            viewport: Viewport::default(),
            extra_headers: default_extra_headers(),
            wait_until: WaitUntil::default(),
            ready_selector: "body".to_string(),
            launch: LaunchOptions::default(),
            webdriver_url: default_webdriver_url(),
        }
    }
}

impl ScraperConfig {
    /// Default configuration with the WebDriver URL taken from `WEBDRIVER_URL` when set
    pub fn from_env() -> Self {
        Self::default().with_webdriver_override(std::env::var("WEBDRIVER_URL").ok())
    }

    fn with_webdriver_override(mut self, webdriver_url: Option<String>) -> Self {
        if let Some(webdriver_url) = webdriver_url {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }
}

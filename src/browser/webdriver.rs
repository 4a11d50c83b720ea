use crate::browser::cdp::CdpCommand;
use crate::browser::idle::{IdleTracker, POLL_INTERVAL, PROBE_SCRIPT, SETTLE_WINDOW, Sample};
use crate::browser::{Browser, GotoOptions, Launcher, Page};
use crate::config::{LaunchOptions, Viewport};
use crate::error::{Result, ScrapeError};
use fantoccini::error::{CmdError, ErrorStatus, WebDriver};
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use std::time::{Duration, Instant};

/// Starts Chrome through a running WebDriver server (e.g. ChromeDriver)
#[derive(Debug, Clone)]
pub struct WebDriverLauncher {
    webdriver_url: String,
}

impl WebDriverLauncher {
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
        }
    }
}

/// Builds the session capabilities that make chromedriver start Chrome with our flags
fn chrome_capabilities(options: &LaunchOptions) -> Map<String, Value> {
    let mut args = Vec::with_capacity(options.args.len() + 1);
    if options.headless {
        args.push("--headless=new".to_string());
    }
    args.extend(options.args.iter().cloned());

    let mut caps = Map::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

impl Launcher for WebDriverLauncher {
    type Browser = WebDriverBrowser;

    async fn launch(&self, options: &LaunchOptions) -> Result<WebDriverBrowser> {
        ::log::debug!("Connecting to WebDriver at {}", self.webdriver_url);

        let client = ClientBuilder::native()
            .capabilities(chrome_capabilities(options))
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| {
                ScrapeError::Launch(format!(
                    "could not start a session at {}: {}",
                    self.webdriver_url, e
                ))
            })?;

        ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
        Ok(WebDriverBrowser { client })
    }
}

/// A WebDriver session; ending the session shuts the browser down
pub struct WebDriverBrowser {
    client: Client,
}

impl Browser for WebDriverBrowser {
    type Page = WebDriverPage;

    async fn new_page(&mut self) -> Result<WebDriverPage> {
        // A fresh session starts with exactly one window, which becomes the page
        Ok(WebDriverPage {
            client: self.client.clone(),
        })
    }

    async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .map_err(|e| ScrapeError::Cleanup(e.to_string()))
    }
}

/// The session's current window
pub struct WebDriverPage {
    client: Client,
}

impl WebDriverPage {
    async fn cdp(&self, command: CdpCommand) -> Result<Value> {
        let method = command.method();
        ::log::debug!("CDP {}", method);
        self.client
            .issue_cmd(command)
            .await
            .map_err(|e| ScrapeError::Browser(format!("{}: {}", method, e)))
    }

    async fn wait_for_network_idle(&self, max_inflight: usize) -> Result<()> {
        let mut tracker = IdleTracker::new(max_inflight, SETTLE_WINDOW);
        loop {
            let value = self
                .client
                .execute(PROBE_SCRIPT, vec![])
                .await
                .map_err(browser_error)?;
            let sample: Sample = serde_json::from_value(value).map_err(sample_error)?;

            if tracker.observe(sample, Instant::now()) {
                ::log::debug!("Network idle with {} resources loaded", sample.resources);
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

impl Page for WebDriverPage {
    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        let command = CdpCommand::set_device_metrics(viewport.width, viewport.height);
        self.cdp(command).await?;
        Ok(())
    }

    async fn set_user_agent(&mut self, user_agent: &str) -> Result<()> {
        self.cdp(CdpCommand::set_user_agent(user_agent)).await?;
        Ok(())
    }

    async fn evaluate_on_new_document(&mut self, source: &str) -> Result<()> {
        self.cdp(CdpCommand::add_init_script(source)).await?;
        Ok(())
    }

    async fn set_extra_http_headers(&mut self, headers: &[(String, String)]) -> Result<()> {
        self.cdp(CdpCommand::enable_network()).await?;
        self.cdp(CdpCommand::set_extra_headers(headers)).await?;
        Ok(())
    }

    async fn goto(&mut self, url: &str, options: &GotoOptions) -> Result<()> {
        let budget = options.timeout;

        // Let the driver abort a stuck load on its own instead of blocking the session
        let timeouts = TimeoutConfiguration::new(Some(budget), Some(budget), None);
        self.client
            .update_timeouts(timeouts)
            .await
            .map_err(browser_error)?;

        let navigation = async {
            self.client
                .goto(url)
                .await
                .map_err(|e| navigation_error(e, url, budget))?;
            if let Some(max_inflight) = options.wait_until.max_inflight() {
                self.wait_for_network_idle(max_inflight).await?;
            }
            Ok::<(), ScrapeError>(())
        };

        match tokio::time::timeout(budget, navigation).await {
            Ok(result) => result,
            Err(_) => Err(ScrapeError::NavigationTimeout {
                url: url.to_string(),
                timeout: budget,
            }),
        }
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(ScrapeError::Timeout {
                selector: selector.to_string(),
                timeout,
            }),
            Err(e) => Err(browser_error(e)),
        }
    }

    async fn evaluate(&mut self, script: &str, args: Vec<Value>) -> Result<Value> {
        self.client
            .execute(script, args)
            .await
            .map_err(browser_error)
    }
}

fn browser_error(error: CmdError) -> ScrapeError {
    ScrapeError::Browser(error.to_string())
}

fn sample_error(error: serde_json::Error) -> ScrapeError {
    ScrapeError::Browser(format!("unexpected idle sample: {}", error))
}

/// Classifies a failed `goto`. Drivers that report the page-load timeout as
/// a plain error are caught by the message fallback.
fn navigation_error(error: CmdError, url: &str, timeout: Duration) -> ScrapeError {
    match error {
        CmdError::Standard(ref e) if e.error == ErrorStatus::Timeout => {
            ScrapeError::NavigationTimeout {
                url: url.to_string(),
                timeout,
            }
        }
        other => classify_navigation_failure(&other.to_string(), url, timeout),
    }
}

fn classify_navigation_failure(message: &str, url: &str, timeout: Duration) -> ScrapeError {
    let lower = message.to_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") {
        ScrapeError::NavigationTimeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        ScrapeError::Navigation {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}

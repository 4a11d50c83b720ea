//! Recording stand-in for the browser, used by tests.
//!
//! Extraction is answered by running the selectors passed to `evaluate`
//! against fixture HTML with `scraper`, the same way the page would.

use crate::browser::{Browser, GotoOptions, Launcher, Page};
use crate::config::{LaunchOptions, Viewport};
use crate::error::{Result, ScrapeError};
use crate::results::ScrapedItem;
use scraper::{ElementRef, Html, Selector};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Where the fake should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Launch,
    Navigation,
    NavigationTimeout,
    Extraction,
    BadShape,
    Close,
}

/// Everything the fake saw, in order
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    pub launches: usize,
    pub closes: usize,
    pub launch_options: Option<LaunchOptions>,
    pub calls: Vec<&'static str>,
    pub viewport: Option<Viewport>,
    pub user_agent: Option<String>,
    pub init_scripts: Vec<String>,
    pub headers: Vec<(String, String)>,
    pub visited: Vec<String>,
    pub goto_options: Vec<(Duration, Option<usize>)>,
    pub waited_for: Vec<(String, Duration)>,
}

#[derive(Debug, Clone)]
pub struct FakeLauncher {
    html: String,
    failure: Option<Failure>,
    log: Arc<Mutex<CallLog>>,
}

impl FakeLauncher {
    pub fn new(html: &str) -> Self {
        Self {
            html: html.to_string(),
            failure: None,
            log: Arc::new(Mutex::new(CallLog::default())),
        }
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Snapshot of the calls recorded so far
    pub fn log(&self) -> CallLog {
        self.log.lock().unwrap().clone()
    }
}

impl Launcher for FakeLauncher {
    type Browser = FakeBrowser;

    async fn launch(&self, options: &LaunchOptions) -> Result<FakeBrowser> {
        let mut log = self.log.lock().unwrap();
        log.launches += 1;
        log.launch_options = Some(options.clone());
        if self.failure == Some(Failure::Launch) {
            return Err(ScrapeError::Launch("browser binary not found".to_string()));
        }
        Ok(FakeBrowser {
            html: self.html.clone(),
            failure: self.failure,
            log: Arc::clone(&self.log),
        })
    }
}

pub struct FakeBrowser {
    html: String,
    failure: Option<Failure>,
    log: Arc<Mutex<CallLog>>,
}

impl Browser for FakeBrowser {
    type Page = FakePage;

    async fn new_page(&mut self) -> Result<FakePage> {
        self.log.lock().unwrap().calls.push("new_page");
        Ok(FakePage {
            html: self.html.clone(),
            failure: self.failure,
            log: Arc::clone(&self.log),
            current_url: "about:blank".to_string(),
            clock: 0,
        })
    }

    async fn close(self) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        log.closes += 1;
        log.calls.push("close");
        if self.failure == Some(Failure::Close) {
            return Err(ScrapeError::Cleanup("session already gone".to_string()));
        }
        Ok(())
    }
}

pub struct FakePage {
    html: String,
    failure: Option<Failure>,
    log: Arc<Mutex<CallLog>>,
    current_url: String,
    clock: u32,
}

impl FakePage {
    fn record(&self, call: &'static str) {
        self.log.lock().unwrap().calls.push(call);
    }

    /// Next per-item timestamp; every call yields a distinct instant
    fn now(&mut self) -> String {
        self.clock += 1;
        format!("2024-01-01T00:00:00.{:03}Z", self.clock)
    }

    fn run_extraction(&mut self, args: &[Value]) -> Result<Value> {
        let selector = |i: usize| {
            let raw = args.get(i).and_then(Value::as_str).unwrap_or_default();
            Selector::parse(raw)
                .map_err(|e| ScrapeError::Browser(format!("SyntaxError: {e:?}")))
        };
        let items = selector(0)?;
        let title = selector(1)?;
        let description = selector(2)?;
        let link = selector(3)?;

        let doc = Html::parse_document(&self.html);
        let base = url::Url::parse(&self.current_url).ok();
        let matched: Vec<ElementRef> = doc.select(&items).collect();

        let mut records = Vec::with_capacity(matched.len());
        for item in matched {
            let url = item
                .select(&link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| base.as_ref().and_then(|b| b.join(href).ok()))
                .map(|u| u.to_string())
                .unwrap_or_else(|| self.current_url.clone());

            records.push(ScrapedItem {
                title: first_text(item, &title),
                description: first_text(item, &description),
                url,
                timestamp: self.now(),
            });
        }
        Ok(json!(records))
    }
}

fn first_text(item: ElementRef, selector: &Selector) -> String {
    item.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

impl Page for FakePage {
    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.record("set_viewport");
        self.log.lock().unwrap().viewport = Some(viewport);
        Ok(())
    }

    async fn set_user_agent(&mut self, user_agent: &str) -> Result<()> {
        self.record("set_user_agent");
        self.log.lock().unwrap().user_agent = Some(user_agent.to_string());
        Ok(())
    }

    async fn evaluate_on_new_document(&mut self, source: &str) -> Result<()> {
        self.record("evaluate_on_new_document");
        self.log
            .lock()
            .unwrap()
            .init_scripts
            .push(source.to_string());
        Ok(())
    }

    async fn set_extra_http_headers(&mut self, headers: &[(String, String)]) -> Result<()> {
        self.record("set_extra_http_headers");
        self.log.lock().unwrap().headers = headers.to_vec();
        Ok(())
    }

    async fn goto(&mut self, url: &str, options: &GotoOptions) -> Result<()> {
        self.record("goto");
        {
            let mut log = self.log.lock().unwrap();
            log.visited.push(url.to_string());
            log.goto_options
                .push((options.timeout, options.wait_until.max_inflight()));
        }
        match self.failure {
            Some(Failure::NavigationTimeout) => Err(ScrapeError::NavigationTimeout {
                url: url.to_string(),
                timeout: options.timeout,
            }),
            Some(Failure::Navigation) => Err(ScrapeError::Navigation {
                url: url.to_string(),
                message: "net::ERR_CONNECTION_REFUSED".to_string(),
            }),
            _ => {
                self.current_url = url.to_string();
                Ok(())
            }
        }
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.record("wait_for_selector");
        self.log
            .lock()
            .unwrap()
            .waited_for
            .push((selector.to_string(), timeout));
        Ok(())
    }

    async fn evaluate(&mut self, _script: &str, args: Vec<Value>) -> Result<Value> {
        self.record("evaluate");
        match self.failure {
            Some(Failure::Extraction) => Err(ScrapeError::Browser(
                "javascript error: Cannot read properties of null".to_string(),
            )),
            Some(Failure::BadShape) => Ok(json!({ "unexpected": true })),
            _ => self.run_extraction(&args),
        }
    }
}

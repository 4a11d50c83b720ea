//! Seam between the scrape pipeline and the browser automation backend.
//!
//! The pipeline only talks to these traits. [`webdriver`] provides the real
//! implementation; tests provide a recording fake.
#![allow(async_fn_in_trait)]

pub mod cdp;
pub mod idle;
pub mod webdriver;

#[cfg(test)]
pub(crate) mod fake;

use crate::config::{LaunchOptions, Viewport, WaitUntil};
use crate::error::Result;
use serde_json::Value;
use std::time::Duration;

/// Options for a single navigation
#[derive(Debug, Clone, Copy)]
pub struct GotoOptions {
    pub wait_until: WaitUntil,
    pub timeout: Duration,
}

/// Starts browser instances
pub trait Launcher {
    type Browser: Browser;

    /// Start a browser with the given options
    async fn launch(&self, options: &LaunchOptions) -> Result<Self::Browser>;
}

/// A running browser instance
pub trait Browser {
    type Page: Page;

    /// Open a fresh page
    async fn new_page(&mut self) -> Result<Self::Page>;

    /// Shut the browser down. Consumes the handle so it can only happen once.
    async fn close(self) -> Result<()>;
}

/// A single page (tab) inside a browser
pub trait Page {
    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    async fn set_user_agent(&mut self, user_agent: &str) -> Result<()>;

    /// Register a script that runs before any page script on every new document
    async fn evaluate_on_new_document(&mut self, source: &str) -> Result<()>;

    async fn set_extra_http_headers(&mut self, headers: &[(String, String)]) -> Result<()>;

    /// Load `url` and wait according to `options`
    async fn goto(&mut self, url: &str, options: &GotoOptions) -> Result<()>;

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Run `script` as a function body inside the page. `args` are exposed as
    /// `arguments[i]`; the return value comes back as JSON.
    async fn evaluate(&mut self, script: &str, args: Vec<Value>) -> Result<Value>;
}

/// Launch a browser, run `body` with it, then close it.
///
/// The browser is closed exactly once whatever `body` returns. When both the
/// body and the close fail, the body's error wins and the close error is logged.
pub async fn with_browser<L, T, F>(launcher: &L, options: &LaunchOptions, body: F) -> Result<T>
where
    L: Launcher,
    F: AsyncFnOnce(&mut L::Browser) -> Result<T>,
{
    let mut browser = launcher.launch(options).await?;
    ::log::debug!("Browser launched");

    let outcome = body(&mut browser).await;
    let closed = browser.close().await;
    ::log::debug!("Browser closed");

    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            ::log::warn!("Ignoring close failure after error: {}", close_err);
            Err(e)
        }
    }
}

use std::time::Duration;

/// Errors raised while scraping a page.
///
/// Every variant is propagated to the process boundary; the split only
/// exists so diagnostics can say which step failed.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// The URL argument could not be parsed.
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The browser process could not be started.
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// Navigation did not settle within the timeout.
    #[error("Navigation to {url} timed out after {timeout:?}")]
    NavigationTimeout { url: String, timeout: Duration },

    /// Navigation failed before the page settled.
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// A selector did not appear within the timeout.
    #[error("Timed out after {timeout:?} waiting for selector {selector}")]
    Timeout { selector: String, timeout: Duration },

    /// Any other browser command failed.
    #[error("Browser error: {0}")]
    Browser(String),

    /// The in-page extraction script failed or returned an unexpected shape.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// The browser could not be closed.
    #[error("Failed to close browser: {0}")]
    Cleanup(String),
}

/// Convenient alias for results that use [`ScrapeError`].
pub type Result<T> = std::result::Result<T, ScrapeError>;

//! Fetch one page in a headless browser and pull a fixed shape of records
//! out of its DOM.
//!
//! [`pipeline::scrape`] owns the browser for a single run: it launches it,
//! configures one page, navigates, extracts [`ScrapedItem`]s and always
//! closes the browser again. The browser itself sits behind the traits in
//! [`browser`]; [`browser::webdriver`] drives Chrome through a WebDriver server.

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod results;

// Re-export commonly used types for convenience
pub use browser::webdriver::WebDriverLauncher;
pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use pipeline::scrape;
pub use results::ScrapedItem;

//! The scrape pipeline: configure, navigate, extract.

pub mod configure;
pub mod extract;
pub mod navigate;


pub use configure::configure_page;
pub use extract::extract;
pub use navigate::navigate;

use crate::browser::{Browser, Launcher, with_browser};
use crate::config::ScraperConfig;
use crate::error::Result;
use crate::results::ScrapedItem;

/// Scrape `url` once with a browser started by `launcher`.
///
/// The browser is closed before this returns, on success and on every error.
pub async fn scrape<L: Launcher>(
    launcher: &L,
    url: &str,
    config: &ScraperConfig,
) -> Result<Vec<ScrapedItem>> {
    ::log::info!("Starting scrape of: {}", url);

    let result = with_browser(
        launcher,
        &config.launch,
        async |browser: &mut L::Browser| {
            let mut page = browser.new_page().await?;
            configure_page(&mut page, config).await?;

            ::log::info!("Navigating to page...");
            navigate(&mut page, url, config).await?;

            ::log::info!("Extracting data...");
            let items = extract(&mut page).await?;

            ::log::info!("Extracted {} items", items.len());
            Ok(items)
        },
    )
    .await;

    if let Err(e) = &result {
        ::log::error!("Scraping failed: {}", e);
    }
    result
}

use crate::browser::{GotoOptions, Page};
use crate::config::ScraperConfig;
use crate::error::Result;

/// Load `url`, then wait for the ready selector, both bounded by `config.timeout`
pub async fn navigate<P: Page>(page: &mut P, url: &str, config: &ScraperConfig) -> Result<()> {
    let options = GotoOptions {
        wait_until: config.wait_until,
        timeout: config.timeout,
    };
    page.goto(url, &options).await?;

    // Some pages report idle before anything is attached
    ::log::debug!("Waiting for {}", config.ready_selector);
    page.wait_for_selector(&config.ready_selector, config.timeout)
        .await
}

use crate::browser::Page;
use crate::config::ScraperConfig;
use crate::error::Result;

/// Makes `navigator.webdriver` read as `undefined` instead of `true`
pub const HIDE_WEBDRIVER_SCRIPT: &str = r#"
    Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
"#;

/// Apply viewport, user agent, webdriver masking and extra headers to a fresh page.
///
/// Must run before the first navigation so the init script covers the first document.
pub async fn configure_page<P: Page>(page: &mut P, config: &ScraperConfig) -> Result<()> {
    ::log::debug!(
        "Configuring page: viewport {}x{}",
        config.viewport.width,
        config.viewport.height
    );
    page.set_viewport(config.viewport).await?;
    page.set_user_agent(&config.user_agent).await?;
    page.evaluate_on_new_document(HIDE_WEBDRIVER_SCRIPT).await?;
    page.set_extra_http_headers(&config.extra_headers).await?;
    Ok(())
}

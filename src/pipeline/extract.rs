use crate::browser::Page;
use crate::error::{Result, ScrapeError};
use crate::results::ScrapedItem;
use serde_json::Value;

/// Elements that become one record each
pub const ITEM_SELECTOR: &str = "article, .item, [data-item]";

/// Source of an item's title
pub const TITLE_SELECTOR: &str = "h1, h2, h3, .title";

/// Source of an item's description
pub const DESCRIPTION_SELECTOR: &str = "p, .description, .summary";

/// Source of an item's link
pub const LINK_SELECTOR: &str = "a";

/// Runs inside the page. Selectors arrive as `arguments`, in the order `selector_args` builds them.
const EXTRACT_SCRIPT: &str = r#"
    const [itemSelector, titleSelector, descriptionSelector, linkSelector] = arguments;
    const text = (el, selector) => el.querySelector(selector)?.textContent?.trim() || '';

    return Array.from(document.querySelectorAll(itemSelector)).map(item => ({
        title: text(item, titleSelector),
        description: text(item, descriptionSelector),
        url: item.querySelector(linkSelector)?.href || window.location.href,
        timestamp: new Date().toISOString(),
    }));
"#;

fn selector_args() -> Vec<Value> {
    [
        ITEM_SELECTOR,
        TITLE_SELECTOR,
        DESCRIPTION_SELECTOR,
        LINK_SELECTOR,
    ]
    .into_iter()
    .map(Value::from)
    .collect()
}

/// Collect every matching item on the loaded page, in document order
pub async fn extract<P: Page>(page: &mut P) -> Result<Vec<ScrapedItem>> {
    let value = page
        .evaluate(EXTRACT_SCRIPT, selector_args())
        .await
        .map_err(|e| match e {
            ScrapeError::Browser(message) => ScrapeError::Extraction(message),
            other => other,
        })?;

    serde_json::from_value(value)
        .map_err(|e| ScrapeError::Extraction(format!("unexpected result shape: {}", e)))
}

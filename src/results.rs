use serde::{Deserialize, Serialize};

/// One record extracted from a matched page element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedItem {
    /// Trimmed text of the first heading-like descendant, or empty
    pub title: String,

    /// Trimmed text of the first paragraph-like descendant, or empty
    pub description: String,

    /// First descendant link, falling back to the page URL
    pub url: String,

    /// ISO-8601 time at which this record was built inside the page
    pub timestamp: String,
}

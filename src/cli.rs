use crate::browser::Launcher;
use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::pipeline;
use crate::results::ScrapedItem;
use std::io::Write;
use std::process::ExitCode;
use url::Url;

/// Printed when no URL is given
pub const USAGE: &str = "Usage: basic-scraper <url>";

/// Run one scrape for the command line and write the result to `out`.
///
/// A missing URL prints [`USAGE`] and fails without launching a browser.
/// Any failure prints a message to stderr and leaves `out` untouched.
pub async fn execute<L, W>(
    url: Option<&str>,
    launcher: &L,
    config: &ScraperConfig,
    out: &mut W,
) -> ExitCode
where
    L: Launcher,
    W: Write,
{
    let Some(url) = url else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let items = match run(url, launcher, config).await {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match write_items(out, &items) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run<L: Launcher>(
    url: &str,
    launcher: &L,
    config: &ScraperConfig,
) -> Result<Vec<ScrapedItem>> {
    Url::parse(url).map_err(|source| ScrapeError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    pipeline::scrape(launcher, url, config).await
}

/// Banner line followed by the items as two-space indented JSON
pub fn write_items<W: Write>(out: &mut W, items: &[ScrapedItem]) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    writeln!(out, "\nScraped Data:")?;
    writeln!(out, "{}", json)?;
    out.flush()
}

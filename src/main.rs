use basic_scraper::{ScraperConfig, WebDriverLauncher, cli};
use clap::Parser;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Progress goes to stderr; stdout only carries the result
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if !args.rest.is_empty() {
        ::log::debug!("Ignoring extra arguments: {:?}", args.rest);
    }
    let config = ScraperConfig::from_env();

    ::log::debug!(
        "Using WebDriver at {} (set WEBDRIVER_URL to change)",
        config.webdriver_url
    );
    let launcher = WebDriverLauncher::new(config.webdriver_url.clone());

    let mut stdout = std::io::stdout().lock();
    cli::execute(args.url.as_deref(), &launcher, &config, &mut stdout).await
}

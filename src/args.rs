use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "basic-scraper")]
#[command(about = "Scrape items from a single page with a headless browser and print them as JSON")]
#[command(version)]
pub struct Args {
    /// Page to scrape
    pub url: Option<String>,

    /// Anything after the URL is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

use realtylink_core::{RealtylinkScraper, ScraperConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ScraperConfig {
        target_records: 10,
        ..ScraperConfig::default()
    };
    let scraper = RealtylinkScraper::with_config(config)?;

    let urls = scraper.discover_urls().await?;

    println!("Discovered {} listing URLs:", urls.len());
    for url in &urls {
        println!("  {}", url);
    }

    Ok(())
}

use realtylink_core::{RealtylinkScraper, ScraperConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ScraperConfig {
        target_records: 5,
        ..ScraperConfig::default()
    };
    let scraper = RealtylinkScraper::with_config(config)?;

    println!("🏠 Fetching 5 rental listings from realtylink.org...\n");

    let report = scraper.run().await?;

    for (i, listing) in report.listings.iter().enumerate() {
        println!("{}. {}", i + 1, listing.title);
        println!("   {} - {}, {}", listing.price, listing.address, listing.region);
        if let Some(rooms) = listing.rooms_counts {
            println!("   {} rooms", rooms);
        }
        if let Some(area) = &listing.area {
            println!("   {}", area);
        }
        println!("   {} photos | {}\n", listing.image_urls.len(), listing.url);
    }

    if !report.failures.is_empty() {
        println!("{} listings could not be extracted:", report.failures.len());
        for failure in &report.failures {
            println!("   {} - {}", failure.url, failure.reason);
        }
    }

    println!("Done: {} of {} listings extracted.", report.listings.len(), report.total());

    Ok(())
}

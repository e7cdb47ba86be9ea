//! Fetch the country list once and print a summary.
//!
//! Run with: cargo run -p country-source --example fetch_countries
//!
//! Examples:
//!   cargo run -p country-source --example fetch_countries
//!   COUNTRY_SOURCE_URL=https://countries-api-abhishek.vercel.app/countries \
//!       cargo run -p country-source --example fetch_countries

use country_source::{load_base_list, HttpCountrySource, SourceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = SourceConfig::from_env()?;
    println!("Fetching {}...", config.url);

    let source = HttpCountrySource::new(config)?;
    let built = load_base_list(&source).await?;

    println!("Countries: {}", built.base.len());
    println!("Rejected records: {}", built.rejected.len());
    println!("Duplicate names: {}", built.duplicates.len());

    for record in built.base.iter().take(5) {
        println!(
            "  {} ({})",
            record.name,
            record.region.as_deref().unwrap_or("N/A")
        );
    }

    Ok(())
}

//! Example: Search stations and resolve the first stream of each
//!
//! Run with: cargo run -p echoiheart --example search_stations -- jazz

use echoiheart::IHeartExtension;
use echosource::{SearchFeedClient, Shelf, TrackClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "jazz".to_string());
    let extension = IHeartExtension::new()?;

    println!("Searching for \"{}\"...\n", query);
    let shelves = extension.search_feed(&query, None)?.load_all().await?;

    for track in shelves.iter().filter_map(Shelf::as_item).filter_map(|item| item.as_track()) {
        println!("{} - {}", track.id, track.title);

        match track.streamables.first() {
            Some(streamable) => {
                let media = extension.load_streamable_media(streamable, false).await?;
                for source in media.sources() {
                    println!("    {:?} {}", source.source_type, source.url);
                }
            }
            None => println!("    no stream"),
        }
    }

    Ok(())
}

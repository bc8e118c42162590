//! Example: Browse home genres and the stations of the first one
//!
//! Run with: cargo run -p echoiheart --example home_genres
//!
//! Set `ALL_GENRES=1` to list every genre referenced by stations instead of
//! the curated list.

use echoiheart::{IHeartExtension, DEFAULT_GENRES_KEY};
use echosource::{
    EchoMediaItem, ExtensionClient, HomeFeedClient, MemorySettings, Settings, Shelf,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let extension = IHeartExtension::new()?;

    let settings = Arc::new(MemorySettings::new());
    settings.put_bool(DEFAULT_GENRES_KEY, std::env::var_os("ALL_GENRES").is_none());
    extension.set_settings(settings);

    let tabs = extension.get_home_tabs().await?;
    println!("Found {} genres:\n", tabs.len());
    for tab in &tabs {
        println!("  {} ({})", tab.title, tab.id);
    }

    let Some(first) = tabs.first() else {
        return Ok(());
    };

    println!("\n=== {} ===", first.title);
    let shelves = extension.get_home_feed(Some(first))?.load_all().await?;
    for shelf in &shelves {
        if let Shelf::Item(EchoMediaItem::Track(track)) = shelf {
            let streams: Vec<&str> = track
                .streamables
                .iter()
                .filter_map(|s| s.title.as_deref())
                .collect();
            println!("  {} [{}]", track.title, streams.join(", "));
        }
    }

    Ok(())
}

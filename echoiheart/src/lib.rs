//! iHeartRadio station directory extension for Echo
//!
//! This crate exposes the public iHeartRadio station directory to the Echo
//! host: genres become home tabs and categories, live stations become
//! tracks, and their stream URLs become streamables resolved on demand.
//!
//! # Features
//!
//! - **Genres**: curated genre list, or every genre referenced by the full
//!   station list (`default_genres` setting)
//! - **Stations by genre**: deferred feeds, re-fetched on every load
//! - **Search**: keyword search, with station details fetched per hit
//! - **Stream resolution**: HLS and Shoutcast URLs pass through, PLS pointer
//!   files are downloaded and their first entry extracted
//! - **Configuration Extension**: endpoints, listing size, stream policy and
//!   timeout stored in echoconfig
//!
//! # Example
//!
//! ```no_run
//! use echoiheart::IHeartExtension;
//! use echosource::{HomeFeedClient, SearchFeedClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extension = IHeartExtension::new()?;
//!
//!     for tab in extension.get_home_tabs().await? {
//!         println!("{}: {}", tab.id, tab.title);
//!     }
//!
//!     let results = extension.search_feed("jazz", None)?.load_all().await?;
//!     println!("{} stations found", results.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Stream policy
//!
//! Stations publish up to three stream URLs. [`StreamPolicy::current`] (the
//! default) offers PLS, then Shoutcast, then HLS, skips empty URLs, and
//! marks stations left without any stream as unplayable.
//! [`StreamPolicy::legacy`] offers HLS first and keeps every URL present in
//! the payload, even empty ones.

pub mod client;
pub mod config_ext;
pub mod error;
pub mod models;
pub mod pls;
pub mod source;
pub mod tracks;

pub use client::{ClientBuilder, IHeartClient};
pub use config_ext::IHeartConfigExt;
pub use error::{Error, Result};
pub use models::{
    GenreHit, GenreResponse, SearchHit, StationGenreResponse, StationHit, StationResponse,
    StationSearchResponse, StationStreams, StreamKind,
};
pub use pls::parse_pls;
pub use source::{IHeartExtension, DEFAULT_GENRES_KEY, EXTENSION_ID, EXTENSION_NAME};
pub use tracks::{
    genre_to_tab, station_to_track, StreamPolicy, NO_STREAMS_REASON, STREAM_TYPE_KEY,
};

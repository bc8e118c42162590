//! # EchoSource
//!
//! Common traits and types for Echo extensions.
//!
//! An extension adapts some third-party catalogue to the host's content
//! model. The host talks to it through a set of narrow capability traits,
//! and an extension implements only the ones it supports:
//!
//! - [`ExtensionClient`]: identification and settings (always required)
//! - [`HomeFeedClient`]: home page tabs and feeds
//! - [`TrackClient`]: track loading and stream resolution
//! - [`RadioClient`]: radios seeded from media items
//! - [`SearchFeedClient`]: search
//!
//! UI, playback and settings persistence stay on the host side.

pub mod models;
pub mod paged;
pub mod settings;

use std::fmt::Debug;
use std::sync::Arc;

pub use async_trait::async_trait;
pub use models::{
    Album, Artist, EchoMediaItem, ImageHolder, Playable, Playlist, QuickSearchItem, Radio, Shelf,
    ShelfCategory, Source, SourceType, Streamable, StreamableMedia, Tab, Track, User,
};
pub use paged::{Feed, Page, PagedData};
pub use settings::{MemorySettings, Setting, SettingSwitch, Settings};

/// Error types for extension operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The extension does not offer this operation
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Failure raised by the extension itself, kept as-is
    #[error("{0}")]
    Extension(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ClientError {
    /// Wraps an extension error without altering it
    pub fn extension(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Extension(Box::new(err))
    }
}

/// Result type for extension operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Base trait every extension implements
#[async_trait]
pub trait ExtensionClient: Debug + Send + Sync {
    /// Unique identifier of the extension
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Called when the user selects this extension
    async fn on_extension_selected(&self) -> Result<()> {
        Ok(())
    }

    /// Settings exposed in the host's settings screen
    fn setting_items(&self) -> Vec<Setting>;

    /// Hands the extension its settings accessor
    fn set_settings(&self, settings: Arc<dyn Settings>);
}

/// Home page provider
#[async_trait]
pub trait HomeFeedClient: ExtensionClient {
    /// Tabs shown at the top of the home page
    async fn get_home_tabs(&self) -> Result<Vec<Tab>>;

    /// Feed for the selected tab
    ///
    /// Must not perform network access: the returned feed is loaded by the
    /// host when it is displayed.
    fn get_home_feed(&self, tab: Option<&Tab>) -> Result<Feed<Shelf>>;
}

/// Track loading and stream resolution
#[async_trait]
pub trait TrackClient: ExtensionClient {
    /// Completes a track before playback
    async fn load_track(&self, track: Track) -> Result<Track>;

    /// Turns one of the track's streamables into playable media
    async fn load_streamable_media(
        &self,
        streamable: &Streamable,
        is_download: bool,
    ) -> Result<StreamableMedia>;

    /// Shelves displayed alongside a track
    fn get_shelves(&self, track: &Track) -> PagedData<Shelf>;
}

/// Radio provider
#[async_trait]
pub trait RadioClient: ExtensionClient {
    /// Tracks of a radio
    fn load_tracks(&self, radio: &Radio) -> PagedData<Track>;

    async fn radio_for_track(
        &self,
        track: &Track,
        context: Option<&EchoMediaItem>,
    ) -> Result<Radio>;

    async fn radio_for_album(&self, album: &Album) -> Result<Radio>;

    async fn radio_for_artist(&self, artist: &Artist) -> Result<Radio>;

    async fn radio_for_user(&self, user: &User) -> Result<Radio>;

    async fn radio_for_playlist(&self, playlist: &Playlist) -> Result<Radio>;
}

/// Search provider
#[async_trait]
pub trait SearchFeedClient: ExtensionClient {
    /// Suggestions shown while the user types
    async fn quick_search(&self, query: &str) -> Result<Vec<QuickSearchItem>>;

    /// Removes an entry from the quick-search history
    async fn delete_quick_search(&self, item: &QuickSearchItem) -> Result<()>;

    /// Tabs shown above the search results
    async fn search_tabs(&self, query: &str) -> Result<Vec<Tab>>;

    /// Search results, loaded lazily like the home feed
    fn search_feed(&self, query: &str, tab: Option<&Tab>) -> Result<Feed<Shelf>>;
}

//! Content model shared between the host and its extensions
//!
//! These are the objects an extension hands back to the host: tabs to
//! display, shelves of media items, tracks and their candidate streams, and
//! the resolved media the player finally consumes.

use crate::paged::Feed;
use std::collections::BTreeMap;

// ============================================================================
// Navigation
// ============================================================================

/// A tab shown above a feed (home page genres, search filters...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Identifier passed back to the extension when the tab is selected
    pub id: String,
    /// Display title
    pub title: String,
}

impl Tab {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A row rendered by the host
#[derive(Debug, Clone)]
pub enum Shelf {
    /// A single media item
    Item(EchoMediaItem),
    /// A named grouping whose content is loaded when the user opens it
    Category(ShelfCategory),
}

impl Shelf {
    /// Returns the media item held by this shelf, if any
    pub fn as_item(&self) -> Option<&EchoMediaItem> {
        match self {
            Shelf::Item(item) => Some(item),
            Shelf::Category(_) => None,
        }
    }

    /// Returns the category held by this shelf, if any
    pub fn as_category(&self) -> Option<&ShelfCategory> {
        match self {
            Shelf::Item(_) => None,
            Shelf::Category(category) => Some(category),
        }
    }
}

/// A category shelf with a lazily loaded child feed
#[derive(Debug, Clone)]
pub struct ShelfCategory {
    pub id: String,
    pub title: String,
    pub feed: Option<Feed<Shelf>>,
}

// ============================================================================
// Media items
// ============================================================================

/// Artwork reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageHolder {
    /// Remote image fetched by the host
    Url(String),
}

impl ImageHolder {
    pub fn from_url(url: impl Into<String>) -> Self {
        ImageHolder::Url(url.into())
    }

    pub fn url(&self) -> &str {
        match self {
            ImageHolder::Url(url) => url,
        }
    }
}

/// Whether the host may attempt playback of a track
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Playable {
    #[default]
    Yes,
    /// Not playable, with the reason shown to the user
    No(String),
}

impl Playable {
    pub fn is_playable(&self) -> bool {
        matches!(self, Playable::Yes)
    }
}

/// A playable track
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub cover: Option<ImageHolder>,
    /// Candidate streams, in display order
    pub streamables: Vec<Streamable>,
    pub playable: Playable,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Wraps the track into a shelf item
    pub fn to_shelf(self) -> Shelf {
        Shelf::Item(EchoMediaItem::Track(self))
    }
}

/// A radio built around some seed item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Radio {
    pub id: String,
    pub title: String,
}

impl Radio {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Album reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub title: String,
}

/// Artist reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// User reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// Playlist reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub title: String,
}

/// Any item the host knows how to render
#[derive(Debug, Clone)]
pub enum EchoMediaItem {
    Track(Track),
    Album(Album),
    Artist(Artist),
    User(User),
    Playlist(Playlist),
}

impl EchoMediaItem {
    pub fn id(&self) -> &str {
        match self {
            EchoMediaItem::Track(t) => &t.id,
            EchoMediaItem::Album(a) => &a.id,
            EchoMediaItem::Artist(a) => &a.id,
            EchoMediaItem::User(u) => &u.id,
            EchoMediaItem::Playlist(p) => &p.id,
        }
    }

    pub fn as_track(&self) -> Option<&Track> {
        match self {
            EchoMediaItem::Track(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Track> for EchoMediaItem {
    fn from(track: Track) -> Self {
        EchoMediaItem::Track(track)
    }
}

/// Entry of the quick-search history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickSearchItem {
    Query { query: String, searched: bool },
}

// ============================================================================
// Streams
// ============================================================================

/// A candidate stream attached to a track, resolved on demand
///
/// `id` is opaque to the host; extensions usually store the stream URL there
/// and use `extras` to remember how it must be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Streamable {
    pub id: String,
    /// Position among the track's streamables
    pub quality: usize,
    pub title: Option<String>,
    pub extras: BTreeMap<String, String>,
}

impl Streamable {
    /// A stream served directly by a remote server
    pub fn server(
        id: impl Into<String>,
        quality: usize,
        title: impl Into<String>,
        extras: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: id.into(),
            quality,
            title: Some(title.into()),
            extras,
        }
    }

    /// Looks up an extra attribute
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}

/// How the player should read a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// A single continuous HTTP body
    Progressive,
    /// HTTP Live Streaming playlist
    Hls,
}

/// A concrete playable location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub url: String,
    pub source_type: SourceType,
    /// Live sources cannot be seeked
    pub is_live: bool,
}

impl Source {
    pub fn new(url: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            url: url.into(),
            source_type,
            is_live: false,
        }
    }

    pub fn live(mut self) -> Self {
        self.is_live = true;
        self
    }
}

/// Result of resolving a [`Streamable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamableMedia {
    Server {
        sources: Vec<Source>,
        downloadable: bool,
    },
}

impl StreamableMedia {
    pub fn sources(&self) -> &[Source] {
        match self {
            StreamableMedia::Server { sources, .. } => sources,
        }
    }
}

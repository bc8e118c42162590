//! Data models for station directory API responses
//!
//! Only the fields the extension uses are declared; serde ignores the rest,
//! so new fields added by the API do not break decoding.

use serde::Deserialize;
use std::fmt;

// ============================================================================
// Genres
// ============================================================================

/// Response of the genre endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenreResponse {
    pub hits: Vec<GenreHit>,
}

/// A browsing category
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GenreHit {
    pub id: i64,
    pub name: String,
}

/// The station list, decoded only for the genres embedded in each station
#[derive(Debug, Clone, Deserialize)]
pub struct StationGenreResponse {
    pub hits: Vec<StationGenres>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationGenres {
    #[serde(default)]
    pub genres: Vec<GenreHit>,
}

impl StationGenreResponse {
    /// All genres referenced by the stations, first occurrence of each id
    /// only, in the order they appear
    pub fn unique_genres(self) -> Vec<GenreHit> {
        let mut seen = std::collections::HashSet::new();
        self.hits
            .into_iter()
            .flat_map(|station| station.genres)
            .filter(|genre| seen.insert(genre.id))
            .collect()
    }
}

// ============================================================================
// Stations
// ============================================================================

/// Response of the station list and station detail endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct StationResponse {
    pub hits: Vec<StationHit>,
}

/// One radio station
#[derive(Debug, Clone, Deserialize)]
pub struct StationHit {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub streams: StationStreams,
}

/// Stream URLs published for a station
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationStreams {
    #[serde(rename = "secure_hls_stream", default)]
    pub hls: Option<String>,
    #[serde(rename = "secure_shoutcast_stream", default)]
    pub shoutcast: Option<String>,
    #[serde(rename = "secure_pls_stream", default)]
    pub pls: Option<String>,
}

impl StationStreams {
    /// URL published for the given kind, if any
    pub fn get(&self, kind: StreamKind) -> Option<&str> {
        match kind {
            StreamKind::Hls => self.hls.as_deref(),
            StreamKind::Shoutcast => self.shoutcast.as_deref(),
            StreamKind::Pls => self.pls.as_deref(),
        }
    }
}

// ============================================================================
// Search
// ============================================================================

/// Response of the search endpoint
///
/// Hits only carry an id; details come from the station endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StationSearchResponse {
    pub stations: Vec<SearchHit>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub id: i64,
}

// ============================================================================
// Stream kinds
// ============================================================================

/// Kind of stream a station publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// HTTP Live Streaming playlist
    Hls,
    /// Direct Shoutcast/Icecast stream
    Shoutcast,
    /// PLS pointer file holding the real stream URL
    Pls,
}

impl StreamKind {
    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            StreamKind::Hls => "HLS",
            StreamKind::Shoutcast => "Shoutcast",
            StreamKind::Pls => "PLS",
        }
    }

    /// Tag stored in the streamable's `type` extra
    pub fn tag(&self) -> &'static str {
        match self {
            StreamKind::Hls => "hls",
            StreamKind::Shoutcast => "shoutcast",
            StreamKind::Pls => "pls",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "hls" => Some(StreamKind::Hls),
            "shoutcast" => Some(StreamKind::Shoutcast),
            "pls" => Some(StreamKind::Pls),
            _ => None,
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

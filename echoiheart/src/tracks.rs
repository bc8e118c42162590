//! Mapping of station records into host tracks
//!
//! A station becomes a [`Track`] whose streamables are the stream URLs the
//! station publishes. Which URLs count and in which order they are offered
//! is decided by a [`StreamPolicy`].

use crate::models::{GenreHit, StationHit, StationStreams, StreamKind};
use echosource::{ImageHolder, Playable, Streamable, Tab, Track};
use std::collections::BTreeMap;

/// Extra key holding the lowercase stream kind of a streamable
pub const STREAM_TYPE_KEY: &str = "type";

/// Reason shown for stations without any usable stream
pub const NO_STREAMS_REASON: &str = "No Supported Streams Found";

/// Selection and ordering of a station's streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPolicy {
    /// Keep only non-empty URLs and flag stations left without any stream
    /// as unplayable. When false, any present URL is kept, even empty, and
    /// tracks are always playable.
    pub strict: bool,
    /// Order in which streams are offered
    pub order: [StreamKind; 3],
}

impl StreamPolicy {
    /// PLS first, non-empty URLs only
    pub const fn current() -> Self {
        Self {
            strict: true,
            order: [StreamKind::Pls, StreamKind::Shoutcast, StreamKind::Hls],
        }
    }

    /// HLS first, any present URL
    pub const fn legacy() -> Self {
        Self {
            strict: false,
            order: [StreamKind::Hls, StreamKind::Shoutcast, StreamKind::Pls],
        }
    }

    fn accepts(&self, url: &str) -> bool {
        !self.strict || !url.is_empty()
    }

    /// Streams kept by this policy, in order, with their kind
    pub fn select<'a>(&self, streams: &'a StationStreams) -> Vec<(&'a str, StreamKind)> {
        self.order
            .iter()
            .filter_map(|&kind| streams.get(kind).map(|url| (url, kind)))
            .filter(|(url, _)| self.accepts(url))
            .collect()
    }

    /// Builds the streamables of a station
    ///
    /// Each streamable stores its URL as id, its position as quality, the
    /// kind label as title and the lowercase kind under [`STREAM_TYPE_KEY`].
    pub fn streamables(&self, streams: &StationStreams) -> Vec<Streamable> {
        self.select(streams)
            .into_iter()
            .enumerate()
            .map(|(idx, (url, kind))| {
                let mut extras = BTreeMap::new();
                extras.insert(STREAM_TYPE_KEY.to_string(), kind.tag().to_string());
                Streamable::server(url, idx, kind.label(), extras)
            })
            .collect()
    }
}

impl Default for StreamPolicy {
    fn default() -> Self {
        Self::current()
    }
}

/// Converts a station into a track
pub fn station_to_track(station: &StationHit, policy: &StreamPolicy) -> Track {
    let streamables = policy.streamables(&station.streams);
    let playable = if policy.strict && streamables.is_empty() {
        Playable::No(NO_STREAMS_REASON.to_string())
    } else {
        Playable::Yes
    };

    Track {
        id: station.id.to_string(),
        title: station.name.clone(),
        subtitle: Some(station.description.clone()),
        description: Some(station.description.clone()),
        cover: station.logo.as_deref().map(ImageHolder::from_url),
        streamables,
        playable,
    }
}

/// Converts a genre into a home tab
pub fn genre_to_tab(genre: &GenreHit) -> Tab {
    Tab::new(genre.id.to_string(), genre.name.as_str())
}

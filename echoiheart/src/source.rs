//! Echo extension implementation for the station directory
//!
//! This module implements the capability traits from `echosource`: genres
//! become home tabs and categories, stations become live tracks, and a
//! station's stream URLs become its streamables.
//!
//! Feeds are never loaded eagerly. `get_home_feed` and `search_feed` only
//! describe how to fetch their content; the host triggers the requests when
//! it displays them, and every load goes back to the network.

use crate::client::IHeartClient;
use crate::models::{GenreHit, StationHit, StreamKind};
use crate::tracks::{genre_to_tab, station_to_track, StreamPolicy, STREAM_TYPE_KEY};
use crate::IHeartConfigExt;
use async_trait::async_trait;
use echoconfig::Config;
use echosource::{
    Album, Artist, ClientError, EchoMediaItem, ExtensionClient, Feed, HomeFeedClient, PagedData,
    Playlist, QuickSearchItem, Radio, RadioClient, Result, SearchFeedClient, Setting,
    SettingSwitch, Settings, Shelf, ShelfCategory, Source, SourceType, Streamable,
    StreamableMedia, Tab, Track, TrackClient, User,
};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Extension identifier
pub const EXTENSION_ID: &str = "iheart";

/// Extension display name
pub const EXTENSION_NAME: &str = "iHeartRadio";

/// Settings key of the genre source switch
pub const DEFAULT_GENRES_KEY: &str = "default_genres";

type SettingsSlot = RwLock<Option<Arc<dyn Settings>>>;

/// Station directory extension
///
/// Holds a shared [`IHeartClient`], the [`StreamPolicy`] applied to every
/// station, and the settings accessor handed over by the host.
#[derive(Debug)]
pub struct IHeartExtension {
    client: Arc<IHeartClient>,
    policy: StreamPolicy,
    settings: Arc<SettingsSlot>,
}

impl IHeartExtension {
    /// Create an extension on the public API with the default policy
    pub fn new() -> crate::Result<Self> {
        Ok(Self::with_client(IHeartClient::new()?))
    }

    pub fn with_client(client: IHeartClient) -> Self {
        Self {
            client: Arc::new(client),
            policy: StreamPolicy::default(),
            settings: Arc::new(RwLock::new(None)),
        }
    }

    /// Create an extension from the `sources.iheart` configuration section
    ///
    /// # Example
    ///
    /// ```no_run
    /// use echoconfig::get_config;
    /// use echoiheart::IHeartExtension;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = get_config();
    /// let extension = IHeartExtension::from_config(&config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let client = IHeartClient::from_config(config)?;
        let policy = config.get_iheart_stream_policy()?;
        Ok(Self::with_client(client).with_policy(policy))
    }

    /// Replace the stream policy
    pub fn with_policy(mut self, policy: StreamPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn client(&self) -> &IHeartClient {
        &self.client
    }

    pub fn policy(&self) -> StreamPolicy {
        self.policy
    }

    /// Whether the home page uses the curated genre list
    ///
    /// True until the host provides settings saying otherwise.
    pub fn default_genres(&self) -> bool {
        read_default_genres(&self.settings)
    }

    /// Genres shown on the home page, according to the settings
    pub async fn genres(&self) -> crate::Result<Vec<GenreHit>> {
        fetch_genres(&self.client, self.default_genres()).await
    }

    /// Genres as category shelves, each with a deferred station feed
    pub async fn home_categories(&self) -> crate::Result<Vec<Shelf>> {
        let genres = self.genres().await?;
        Ok(categories(&self.client, self.policy, &genres))
    }
}

fn read_default_genres(slot: &SettingsSlot) -> bool {
    let settings = slot.read().unwrap_or_else(PoisonError::into_inner);
    settings
        .as_ref()
        .and_then(|settings| settings.get_bool(DEFAULT_GENRES_KEY))
        .unwrap_or(true)
}

async fn fetch_genres(client: &IHeartClient, default_genres: bool) -> crate::Result<Vec<GenreHit>> {
    if default_genres {
        client.genres().await
    } else {
        client.station_genres().await
    }
}

fn categories(client: &Arc<IHeartClient>, policy: StreamPolicy, genres: &[GenreHit]) -> Vec<Shelf> {
    genres
        .iter()
        .map(|genre| {
            let tab = genre_to_tab(genre);
            Shelf::Category(ShelfCategory {
                feed: Some(genre_feed(client.clone(), policy, tab.id.clone())),
                id: tab.id,
                title: tab.title,
            })
        })
        .collect()
}

fn station_shelves(stations: &[StationHit], policy: &StreamPolicy) -> Vec<Shelf> {
    stations
        .iter()
        .map(|station| station_to_track(station, policy).to_shelf())
        .collect()
}

fn genre_feed(client: Arc<IHeartClient>, policy: StreamPolicy, genre_id: String) -> Feed<Shelf> {
    PagedData::single(move || {
        let client = client.clone();
        let genre_id = genre_id.clone();
        async move {
            let stations = client.stations_by_genre(&genre_id).await?;
            Ok::<_, ClientError>(station_shelves(&stations, &policy))
        }
    })
    .to_feed()
}

#[async_trait]
impl ExtensionClient for IHeartExtension {
    fn id(&self) -> &str {
        EXTENSION_ID
    }

    fn name(&self) -> &str {
        EXTENSION_NAME
    }

    fn setting_items(&self) -> Vec<Setting> {
        vec![Setting::Switch(SettingSwitch::new(
            "Display Default Genres",
            DEFAULT_GENRES_KEY,
            "Whether to display only default genres on the home page or all available genres",
            self.default_genres(),
        ))]
    }

    fn set_settings(&self, settings: Arc<dyn Settings>) {
        let mut slot = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(settings);
    }
}

#[async_trait]
impl HomeFeedClient for IHeartExtension {
    async fn get_home_tabs(&self) -> Result<Vec<Tab>> {
        let genres = self.genres().await?;
        Ok(genres.iter().map(genre_to_tab).collect())
    }

    fn get_home_feed(&self, tab: Option<&Tab>) -> Result<Feed<Shelf>> {
        let policy = self.policy;
        match tab {
            Some(tab) => Ok(genre_feed(self.client.clone(), policy, tab.id.clone())),
            None => {
                // The genre source is read on each load, not when the feed is built
                let client = self.client.clone();
                let settings = self.settings.clone();
                Ok(PagedData::single(move || {
                    let client = client.clone();
                    let default_genres = read_default_genres(&settings);
                    async move {
                        let genres = fetch_genres(&client, default_genres).await?;
                        Ok::<_, ClientError>(categories(&client, policy, &genres))
                    }
                })
                .to_feed())
            }
        }
    }
}

#[async_trait]
impl TrackClient for IHeartExtension {
    async fn load_track(&self, track: Track) -> Result<Track> {
        Ok(track)
    }

    async fn load_streamable_media(
        &self,
        streamable: &Streamable,
        _is_download: bool,
    ) -> Result<StreamableMedia> {
        let kind = streamable
            .extra(STREAM_TYPE_KEY)
            .and_then(StreamKind::from_tag);

        let url = match kind {
            Some(StreamKind::Pls) => self.client.resolve_pls(&streamable.id).await?,
            _ => streamable.id.clone(),
        };
        let source_type = match kind {
            Some(StreamKind::Hls) => SourceType::Hls,
            _ => SourceType::Progressive,
        };
        debug!(%url, ?source_type, "Resolved stream");

        Ok(StreamableMedia::Server {
            sources: vec![Source::new(url, source_type).live()],
            downloadable: false,
        })
    }

    fn get_shelves(&self, _track: &Track) -> PagedData<Shelf> {
        PagedData::empty()
    }
}

#[async_trait]
impl RadioClient for IHeartExtension {
    fn load_tracks(&self, _radio: &Radio) -> PagedData<Track> {
        PagedData::empty()
    }

    async fn radio_for_track(
        &self,
        _track: &Track,
        _context: Option<&EchoMediaItem>,
    ) -> Result<Radio> {
        Ok(Radio::new("", ""))
    }

    async fn radio_for_album(&self, _album: &Album) -> Result<Radio> {
        Err(ClientError::NotSupported("Album radio".to_string()))
    }

    async fn radio_for_artist(&self, _artist: &Artist) -> Result<Radio> {
        Err(ClientError::NotSupported("Artist radio".to_string()))
    }

    async fn radio_for_user(&self, _user: &User) -> Result<Radio> {
        Err(ClientError::NotSupported("User radio".to_string()))
    }

    async fn radio_for_playlist(&self, _playlist: &Playlist) -> Result<Radio> {
        Err(ClientError::NotSupported("Playlist radio".to_string()))
    }
}

#[async_trait]
impl SearchFeedClient for IHeartExtension {
    async fn quick_search(&self, _query: &str) -> Result<Vec<QuickSearchItem>> {
        Ok(Vec::new())
    }

    async fn delete_quick_search(&self, _item: &QuickSearchItem) -> Result<()> {
        Ok(())
    }

    async fn search_tabs(&self, _query: &str) -> Result<Vec<Tab>> {
        Ok(Vec::new())
    }

    fn search_feed(&self, query: &str, _tab: Option<&Tab>) -> Result<Feed<Shelf>> {
        let client = self.client.clone();
        let policy = self.policy;
        let query = query.to_string();
        Ok(PagedData::single(move || {
            let client = client.clone();
            let query = query.clone();
            async move {
                let stations = client.search_stations(&query).await?;
                Ok::<_, ClientError>(station_shelves(&stations, &policy))
            }
        })
        .to_feed())
    }
}

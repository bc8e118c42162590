//! HTTP client for the station directory API
//!
//! This module provides a client for the three directory endpoints (genre
//! list, station list/detail, station search) and for the PLS pointer files
//! some stations publish instead of a direct stream URL.
//!
//! # Example
//!
//! ```no_run
//! use echoiheart::IHeartClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IHeartClient::new()?;
//!
//!     for genre in client.genres().await? {
//!         println!("{} ({})", genre.name, genre.id);
//!     }
//!
//!     let stations = client.search_stations("jazz").await?;
//!     println!("{} stations match", stations.len());
//!
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::{
    GenreHit, GenreResponse, SearchHit, StationGenreResponse, StationHit, StationResponse,
    StationSearchResponse,
};
use crate::pls::parse_pls;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default genre list endpoint
pub const DEFAULT_GENRE_URL: &str = "https://api.iheart.com/api/v2/content/genre/";

/// Default station list/detail endpoint
pub const DEFAULT_STATION_URL: &str = "https://api.iheart.com/api/v2/content/liveStations/";

/// Default station search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://api.iheart.com/api/v1/catalog/searchStation/";

/// Maximum number of stations requested per listing
pub const DEFAULT_PAGE_LIMIT: u32 = 5000;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("echoiheart/", env!("CARGO_PKG_VERSION"));

/// Station directory HTTP client
///
/// The client is stateless: it does not cache responses and never retries.
/// It is cheap to clone and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct IHeartClient {
    client: Client,
    genre_url: Url,
    station_url: Url,
    search_url: Url,
    page_limit: u32,
}

impl IHeartClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn genre_url(&self) -> &Url {
        &self.genre_url
    }

    pub fn station_url(&self) -> &Url {
        &self.station_url
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    // ========================================================================
    // Fetch & decode
    // ========================================================================

    /// GET a URL and return the response body as text
    ///
    /// Connection failures, timeouts and non-2xx statuses surface as
    /// [`Error::Http`].
    pub async fn fetch(&self, url: Url) -> Result<String> {
        debug!(%url, "GET");
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    /// Decode a JSON payload, ignoring unknown fields
    ///
    /// Any mismatch becomes [`Error::Parse`] carrying the payload.
    pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T> {
        serde_json::from_str(text).map_err(|e| Error::parse(text, e))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.fetch(url).await?;
        Self::decode(&body)
    }

    // ========================================================================
    // Genres
    // ========================================================================

    /// The curated genre list
    pub async fn genres(&self) -> Result<Vec<GenreHit>> {
        let response: GenreResponse = self.fetch_json(self.genre_url.clone()).await?;
        debug!(count = response.hits.len(), "Fetched curated genres");
        Ok(response.hits)
    }

    /// Every genre referenced by the full station list
    ///
    /// Genres are deduplicated by id, keeping the first occurrence, in the
    /// order they appear across stations.
    pub async fn station_genres(&self) -> Result<Vec<GenreHit>> {
        let mut url = self.station_url.clone();
        url.query_pairs_mut()
            .append_pair("limit", &self.page_limit.to_string());

        let response: StationGenreResponse = self.fetch_json(url).await?;
        let genres = response.unique_genres();
        debug!(count = genres.len(), "Derived genres from station list");
        Ok(genres)
    }

    // ========================================================================
    // Stations
    // ========================================================================

    /// Stations of a genre
    pub async fn stations_by_genre(&self, genre_id: &str) -> Result<Vec<StationHit>> {
        let mut url = self.station_url.clone();
        url.query_pairs_mut()
            .append_pair("genreId", genre_id)
            .append_pair("limit", &self.page_limit.to_string());

        let response: StationResponse = self.fetch_json(url).await?;
        debug!(genre_id, count = response.hits.len(), "Fetched genre stations");
        Ok(response.hits)
    }

    /// Full details of one station
    pub async fn station(&self, id: i64) -> Result<StationHit> {
        let url = self.station_url.join(&id.to_string())?;
        let response: StationResponse = self.fetch_json(url).await?;
        response
            .hits
            .into_iter()
            .next()
            .ok_or(Error::StationNotFound(id))
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Ids of the stations matching a query
    ///
    /// The query is sent between literal double quotes.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("keywords", &format!("\"{}\"", query));

        let response: StationSearchResponse = self.fetch_json(url).await?;
        debug!(query, count = response.stations.len(), "Search results");
        Ok(response.stations)
    }

    /// Stations matching a query, with full details
    ///
    /// Search hits only carry ids, so each one costs an extra request to the
    /// station endpoint. Requests run one after the other.
    pub async fn search_stations(&self, query: &str) -> Result<Vec<StationHit>> {
        let hits = self.search(query).await?;
        let mut stations = Vec::with_capacity(hits.len());
        for hit in hits {
            stations.push(self.station(hit.id).await?);
        }
        Ok(stations)
    }

    // ========================================================================
    // Stream URLs
    // ========================================================================

    /// Resolve a PLS pointer file into the stream URL it references
    ///
    /// An empty `pls_url`, or a playlist without a `File1=` entry, yields an
    /// empty string rather than an error.
    pub async fn resolve_pls(&self, pls_url: &str) -> Result<String> {
        if pls_url.is_empty() {
            warn!("Empty PLS URL, nothing to resolve");
            return Ok(String::new());
        }

        let content = self.fetch(Url::parse(pls_url)?).await?;
        match parse_pls(&content) {
            Some(stream_url) => Ok(stream_url.to_string()),
            None => {
                warn!(pls_url, "No File1 entry in PLS playlist");
                Ok(String::new())
            }
        }
    }
}

/// Builder for configuring an IHeartClient
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    genre_url: String,
    station_url: String,
    search_url: String,
    page_limit: u32,
    timeout: Duration,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            genre_url: DEFAULT_GENRE_URL.to_string(),
            station_url: DEFAULT_STATION_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    ///
    /// Timeout and User-Agent settings are then ignored.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the genre list endpoint
    pub fn genre_url(mut self, url: impl Into<String>) -> Self {
        self.genre_url = url.into();
        self
    }

    /// Set the station list/detail endpoint
    pub fn station_url(mut self, url: impl Into<String>) -> Self {
        self.station_url = url.into();
        self
    }

    /// Set the search endpoint
    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// Point every endpoint at another host, keeping the default paths
    ///
    /// Mostly useful for tests against a mock server.
    pub fn api_base(self, base: impl AsRef<str>) -> Self {
        let base = base.as_ref().trim_end_matches('/');
        self.genre_url(format!("{}/api/v2/content/genre/", base))
            .station_url(format!("{}/api/v2/content/liveStations/", base))
            .search_url(format!("{}/api/v1/catalog/searchStation/", base))
    }

    /// Set the maximum number of stations per listing
    pub fn page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<IHeartClient> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout)
                .build()?,
        };

        // Station ids are appended to the station endpoint
        let mut station_url = self.station_url;
        if !station_url.ends_with('/') {
            station_url.push('/');
        }

        Ok(IHeartClient {
            client,
            genre_url: Url::parse(&self.genre_url)?,
            station_url: Url::parse(&station_url)?,
            search_url: Url::parse(&self.search_url)?,
            page_limit: self.page_limit,
        })
    }
}

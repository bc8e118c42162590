//! Station directory settings stored in echoconfig
//!
//! This module provides the `IHeartConfigExt` trait, which adds the
//! directory endpoints, listing size, stream policy and request timeout to
//! `echoconfig::Config`.
//!
//! Getters persist their default value when the key is missing, so the
//! generated `config.yaml` documents every available setting.
//!
//! # Example
//!
//! ```no_run
//! use echoconfig::get_config;
//! use echoiheart::{IHeartClient, IHeartConfigExt};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = get_config();
//! println!("Station endpoint: {}", config.get_iheart_station_url()?);
//!
//! let client = IHeartClient::from_config(&config)?;
//! # Ok(())
//! # }
//! ```

use crate::client::{
    IHeartClient, DEFAULT_GENRE_URL, DEFAULT_PAGE_LIMIT, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SEARCH_URL, DEFAULT_STATION_URL,
};
use crate::tracks::StreamPolicy;
use anyhow::Result;
use echoconfig::Config;
use serde_yaml::Value;
use std::time::Duration;

const SECTION: [&str; 2] = ["sources", "iheart"];

fn key_path(key: &str) -> [&str; 3] {
    [SECTION[0], SECTION[1], key]
}

/// Extension trait for station directory settings in echoconfig
pub trait IHeartConfigExt {
    /// Genre list endpoint
    fn get_iheart_genre_url(&self) -> Result<String>;
    fn set_iheart_genre_url(&self, url: &str) -> Result<()>;

    /// Station list/detail endpoint
    fn get_iheart_station_url(&self) -> Result<String>;
    fn set_iheart_station_url(&self, url: &str) -> Result<()>;

    /// Station search endpoint
    fn get_iheart_search_url(&self) -> Result<String>;
    fn set_iheart_search_url(&self, url: &str) -> Result<()>;

    /// Maximum number of stations per listing (default: 5000)
    fn get_iheart_page_limit(&self) -> Result<u32>;
    fn set_iheart_page_limit(&self, limit: u32) -> Result<()>;

    /// Whether stations without a usable stream are flagged unplayable
    ///
    /// `true` (default) selects [`StreamPolicy::current`], `false`
    /// [`StreamPolicy::legacy`].
    fn get_iheart_strict_streams(&self) -> Result<bool>;
    fn set_iheart_strict_streams(&self, strict: bool) -> Result<()>;

    /// HTTP request timeout in seconds (default: 30)
    fn get_iheart_request_timeout_secs(&self) -> Result<u64>;
    fn set_iheart_request_timeout_secs(&self, secs: u64) -> Result<()>;

    /// Stream policy matching [`get_iheart_strict_streams`](Self::get_iheart_strict_streams)
    fn get_iheart_stream_policy(&self) -> Result<StreamPolicy> {
        Ok(if self.get_iheart_strict_streams()? {
            StreamPolicy::current()
        } else {
            StreamPolicy::legacy()
        })
    }
}

fn get_string_or_default(config: &Config, key: &str, default: &str) -> Result<String> {
    match config.get_value(&key_path(key)) {
        Ok(Value::String(s)) if !s.is_empty() => Ok(s),
        _ => {
            config.set_value(&key_path(key), Value::String(default.to_string()))?;
            Ok(default.to_string())
        }
    }
}

fn get_u64_or_default(config: &Config, key: &str, default: u64) -> Result<u64> {
    let current = match config.get_value(&key_path(key)) {
        Ok(Value::Number(n)) => n.as_u64(),
        _ => None,
    };
    match current {
        Some(value) => Ok(value),
        None => {
            set_u64(config, key, default)?;
            Ok(default)
        }
    }
}

fn set_u64(config: &Config, key: &str, value: u64) -> Result<()> {
    config.set_value(&key_path(key), Value::Number(serde_yaml::Number::from(value)))
}

impl IHeartConfigExt for Config {
    fn get_iheart_genre_url(&self) -> Result<String> {
        get_string_or_default(self, "genre_url", DEFAULT_GENRE_URL)
    }

    fn set_iheart_genre_url(&self, url: &str) -> Result<()> {
        self.set_value(&key_path("genre_url"), Value::String(url.to_string()))
    }

    fn get_iheart_station_url(&self) -> Result<String> {
        get_string_or_default(self, "station_url", DEFAULT_STATION_URL)
    }

    fn set_iheart_station_url(&self, url: &str) -> Result<()> {
        self.set_value(&key_path("station_url"), Value::String(url.to_string()))
    }

    fn get_iheart_search_url(&self) -> Result<String> {
        get_string_or_default(self, "search_url", DEFAULT_SEARCH_URL)
    }

    fn set_iheart_search_url(&self, url: &str) -> Result<()> {
        self.set_value(&key_path("search_url"), Value::String(url.to_string()))
    }

    fn get_iheart_page_limit(&self) -> Result<u32> {
        let limit = get_u64_or_default(self, "page_limit", u64::from(DEFAULT_PAGE_LIMIT))?;
        match u32::try_from(limit) {
            Ok(limit) if limit > 0 => Ok(limit),
            _ => {
                self.set_iheart_page_limit(DEFAULT_PAGE_LIMIT)?;
                Ok(DEFAULT_PAGE_LIMIT)
            }
        }
    }

    fn set_iheart_page_limit(&self, limit: u32) -> Result<()> {
        set_u64(self, "page_limit", u64::from(limit))
    }

    fn get_iheart_strict_streams(&self) -> Result<bool> {
        match self.get_value(&key_path("strict_streams")) {
            Ok(Value::Bool(b)) => Ok(b),
            _ => {
                self.set_iheart_strict_streams(true)?;
                Ok(true)
            }
        }
    }

    fn set_iheart_strict_streams(&self, strict: bool) -> Result<()> {
        self.set_value(&key_path("strict_streams"), Value::Bool(strict))
    }

    fn get_iheart_request_timeout_secs(&self) -> Result<u64> {
        get_u64_or_default(self, "request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    fn set_iheart_request_timeout_secs(&self, secs: u64) -> Result<()> {
        set_u64(self, "request_timeout_secs", secs)
    }
}

impl IHeartClient {
    /// Build a client from the `sources.iheart` section of the configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        Self::builder()
            .genre_url(config.get_iheart_genre_url()?)
            .station_url(config.get_iheart_station_url()?)
            .search_url(config.get_iheart_search_url()?)
            .page_limit(config.get_iheart_page_limit()?)
            .timeout(Duration::from_secs(config.get_iheart_request_timeout_secs()?))
            .build()
    }
}

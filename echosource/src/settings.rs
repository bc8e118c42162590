//! Extension settings
//!
//! The host owns settings storage; extensions only read and write values
//! through the [`Settings`] accessor they are handed, and describe the
//! settings they expose with [`Setting`] items.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

/// Key/value access to an extension's persisted settings
pub trait Settings: Send + Sync {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn put_bool(&self, key: &str, value: bool);
    fn get_string(&self, key: &str) -> Option<String>;
    fn put_string(&self, key: &str, value: &str);
}

impl fmt::Debug for dyn Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Settings")
    }
}

/// A setting exposed in the host's settings screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    Switch(SettingSwitch),
}

/// An on/off toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingSwitch {
    pub title: String,
    pub key: String,
    pub summary: String,
    pub default: bool,
}

impl SettingSwitch {
    pub fn new(
        title: impl Into<String>,
        key: impl Into<String>,
        summary: impl Into<String>,
        default: bool,
    ) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            summary: summary.into(),
            default,
        }
    }
}

#[derive(Debug, Clone)]
enum StoredValue {
    Bool(bool),
    String(String),
}

/// Volatile settings store, for hosts without persistence and for tests
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, StoredValue>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Settings for MemorySettings {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.read().unwrap().get(key) {
            Some(StoredValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    fn put_bool(&self, key: &str, value: bool) {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), StoredValue::Bool(value));
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.read().unwrap().get(key) {
            Some(StoredValue::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn put_string(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), StoredValue::String(value.to_string()));
    }
}

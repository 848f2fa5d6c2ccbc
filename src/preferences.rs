//! Notice dismissal flags
//!
//! The guide shows two one-time notices: a cookie-consent banner and a
//! history popup. Whether each was dismissed lives in a small key-value
//! store. Flags are read once at startup with [`NoticeState::load`] and
//! written once when the user dismisses a notice.

use crate::error::GuideResult;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const COOKIE_CONSENT_KEY: &str = "cookieConsent";
pub const HISTORY_POPUP_KEY: &str = "historyPopupSeen";

/// String key-value storage for preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> GuideResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> GuideResult<()>;
}

/// In-memory store, mostly for tests
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> GuideResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> GuideResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> GuideResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> GuideResult<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }))
    }

    fn set(&mut self, key: &str, value: &str) -> GuideResult<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        debug!(path = %self.path.display(), key, value, "preference written");
        Ok(())
    }
}

/// Answer given on the cookie banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieConsent {
    Accepted,
    Declined,
}

impl CookieConsent {
    pub fn as_str(&self) -> &'static str {
        match self {
            CookieConsent::Accepted => "accepted",
            CookieConsent::Declined => "declined",
        }
    }
}

/// Snapshot of both notice flags, taken once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoticeState {
    pub cookie_consent: Option<CookieConsent>,
    pub history_popup_seen: bool,
}

impl NoticeState {
    pub fn load(store: &dyn PreferenceStore) -> GuideResult<Self> {
        // Any stored answer counts as dismissed; unrecognised values read as declined
        let cookie_consent = store.get(COOKIE_CONSENT_KEY)?.map(|v| match v.as_str() {
            "accepted" => CookieConsent::Accepted,
            _ => CookieConsent::Declined,
        });
        let history_popup_seen = store.get(HISTORY_POPUP_KEY)?.is_some();

        Ok(Self {
            cookie_consent,
            history_popup_seen,
        })
    }

    pub fn show_cookie_banner(&self) -> bool {
        self.cookie_consent.is_none()
    }

    pub fn show_history_popup(&self) -> bool {
        !self.history_popup_seen
    }

    pub fn record_cookie_consent(
        &mut self,
        store: &mut dyn PreferenceStore,
        accepted: bool,
    ) -> GuideResult<()> {
        let consent = if accepted {
            CookieConsent::Accepted
        } else {
            CookieConsent::Declined
        };
        store.set(COOKIE_CONSENT_KEY, consent.as_str())?;
        self.cookie_consent = Some(consent);
        Ok(())
    }

    pub fn dismiss_history_popup(&mut self, store: &mut dyn PreferenceStore) -> GuideResult<()> {
        store.set(HISTORY_POPUP_KEY, "true")?;
        self.history_popup_seen = true;
        Ok(())
    }
}

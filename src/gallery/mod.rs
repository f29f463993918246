//! External content sources.
//!
//! A gallery manifest is a JSON array of [`ContentEntry`] values. Any
//! failure fetching or parsing it falls back to the built-in catalogue;
//! errors are logged and never reach the deck.

pub mod thumbnail;

use std::time::Duration;

use url::Url;

use crate::config::GalleryConfig;
use crate::content::{catalog, ContentEntry};
use crate::error::GalleryError;

pub(crate) fn client(timeout_secs: u64) -> Result<reqwest::blocking::Client, GalleryError> {
    Ok(reqwest::blocking::Client::builder()
        .user_agent(concat!("iris-folio/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?)
}

pub fn parse_manifest(json: &str) -> Result<Vec<ContentEntry>, GalleryError> {
    Ok(serde_json::from_str(json)?)
}

/// Fetch and parse a manifest (blocking).
pub fn fetch_manifest(url: &str, timeout_secs: u64) -> Result<Vec<ContentEntry>, GalleryError> {
    let parsed = Url::parse(url)?;
    let response = client(timeout_secs)?
        .get(parsed.as_str())
        .header("Accept", "application/json")
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(GalleryError::Status(status.as_u16()));
    }
    parse_manifest(&response.text()?)
}

/// Entries to show: the manifest when configured and reachable, otherwise
/// the built-in catalogue. An empty manifest also falls back.
pub fn entries_or_fallback(config: &GalleryConfig) -> Vec<ContentEntry> {
    let Some(url) = config.manifest_url.as_deref() else {
        return catalog::all();
    };
    match fetch_manifest(url, config.timeout_secs) {
        Ok(entries) if !entries.is_empty() => {
            log::info!("loaded {} entries from {}", entries.len(), url);
            entries
        }
        Ok(_) => {
            log::warn!("manifest {} is empty, using built-in content", url);
            catalog::all()
        }
        Err(e) => {
            log::warn!("manifest {} unavailable ({}), using built-in content", url, e);
            catalog::all()
        }
    }
}

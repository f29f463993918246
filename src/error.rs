//! Error types shared across the library.
//!
//! Nothing here is fatal to a session: callers either fall back to an
//! empty-but-valid state or drop the request.

use thiserror::Error;

/// Failure to build a deck.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck has no entries")]
    Empty,
    #[error("order is not a permutation of 0..{len}")]
    InvalidOrder { len: usize },
}

/// Rejected navigation request.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// A previous transition has not signalled completion yet.
    #[error("transition in flight")]
    Busy,
    #[error("deck is empty")]
    Empty,
}

/// Failure while talking to an external gallery source.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed json: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("reading image: {0}")]
    Io(#[from] std::io::Error),
    #[error("oembed response has no thumbnail")]
    NoThumbnail,
}

/// Failure loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] serde_json::Error),
}

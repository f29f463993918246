//! Background image loading for cards.
//!
//! Two kinds of request share one worker scheme: video thumbnails resolved
//! through oEmbed, and image-card sources read from disk or over HTTP.
//! Each request runs on its own thread and lands as RGBA pixels ready for
//! an egui texture. Failures are remembered and never retried; the card
//! simply renders without the picture.

use std::collections::{HashMap, HashSet};
use std::sync::{mpsc, Arc};

use serde::Deserialize;
use url::Url;

use super::client;
use crate::error::GalleryError;

/// Widest thumbnail kept in memory.
const MAX_WIDTH: u32 = 640;

/// Decoded image data (RGBA).
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct OEmbed {
    thumbnail_url: Option<String>,
}

/// Embed-player URLs aren't accepted by oEmbed; map them to the page URL.
pub fn canonical_video_url(embed_url: &str) -> String {
    if let Ok(u) = Url::parse(embed_url) {
        if u.host_str() == Some("player.vimeo.com") {
            if let Some(id) = u.path().strip_prefix("/video/") {
                return format!("https://vimeo.com/{}", id.trim_end_matches('/'));
            }
        }
    }
    embed_url.to_string()
}

/// oEmbed query URL for a video.
pub fn oembed_request_url(endpoint: &str, video_url: &str) -> Result<Url, GalleryError> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut()
        .append_pair("url", &canonical_video_url(video_url));
    Ok(url)
}

fn thumbnail_url(endpoint: &str, video_url: &str, timeout_secs: u64) -> Result<String, GalleryError> {
    let resp = client(timeout_secs)?
        .get(oembed_request_url(endpoint, video_url)?)
        .send()?;
    if !resp.status().is_success() {
        return Err(GalleryError::Status(resp.status().as_u16()));
    }
    let meta: OEmbed = serde_json::from_str(&resp.text()?)?;
    meta.thumbnail_url.ok_or(GalleryError::NoThumbnail)
}

/// Decode image bytes, downscaling anything wider than `MAX_WIDTH`.
pub fn decode(bytes: &[u8]) -> Result<Thumbnail, GalleryError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (width, height, pixels) = if w > MAX_WIDTH {
        let new_h = ((h as f32 * MAX_WIDTH as f32 / w as f32) as u32).max(1);
        let resized =
            image::imageops::resize(&rgba, MAX_WIDTH, new_h, image::imageops::FilterType::Triangle);
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    Ok(Thumbnail {
        width,
        height,
        rgba: pixels,
    })
}

fn fetch_thumbnail(endpoint: &str, video_url: &str, timeout_secs: u64) -> Result<Thumbnail, GalleryError> {
    let image_url = thumbnail_url(endpoint, video_url, timeout_secs)?;
    fetch_image(&image_url, timeout_secs)
}

/// Load an image card source: `scheme://` URLs over HTTP, anything else
/// as a local path.
pub fn fetch_image(src: &str, timeout_secs: u64) -> Result<Thumbnail, GalleryError> {
    if !src.contains("://") {
        return decode(&std::fs::read(src)?);
    }
    let resp = client(timeout_secs)?.get(Url::parse(src)?).send()?;
    if !resp.status().is_success() {
        return Err(GalleryError::Status(resp.status().as_u16()));
    }
    decode(&resp.bytes()?)
}

/// Blocking image source, run on a worker thread.
pub type Fetcher = Arc<dyn Fn(&str) -> Result<Thumbnail, GalleryError> + Send + Sync>;

/// Manages background fetching and decoding, keyed by request string.
pub struct ThumbnailLoader {
    oembed: Fetcher,
    images: Fetcher,
    pending: HashMap<String, mpsc::Receiver<Option<Thumbnail>>>,
    loaded: HashMap<String, Thumbnail>,
    failed: HashSet<String>,
}

impl ThumbnailLoader {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self::with_fetchers(
            Arc::new(move |url: &str| fetch_thumbnail(&endpoint, url, timeout_secs)),
            Arc::new(move |src: &str| fetch_image(src, timeout_secs)),
        )
    }

    /// Loader over custom sources for video thumbnails and image cards.
    pub fn with_fetchers(oembed: Fetcher, images: Fetcher) -> Self {
        Self {
            oembed,
            images,
            pending: HashMap::new(),
            loaded: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Request the oEmbed thumbnail for `video_url` in the background.
    pub fn request(&mut self, video_url: &str) {
        let fetch = Arc::clone(&self.oembed);
        self.spawn(video_url, fetch);
    }

    /// Request an image card's `src` in the background.
    pub fn request_image(&mut self, src: &str) {
        let fetch = Arc::clone(&self.images);
        self.spawn(src, fetch);
    }

    fn spawn(&mut self, key: &str, fetch: Fetcher) {
        if self.loaded.contains_key(key) || self.pending.contains_key(key) || self.failed.contains(key) {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let key_owned = key.to_string();
        std::thread::spawn(move || {
            let result = match (*fetch)(&key_owned) {
                Ok(t) => Some(t),
                Err(e) => {
                    log::warn!("image for {} unavailable: {}", key_owned, e);
                    None
                }
            };
            let _ = tx.send(result);
        });

        self.pending.insert(key.to_string(), rx);
    }

    /// Collect finished downloads. Call every frame.
    pub fn poll(&mut self) {
        let mut completed = Vec::new();
        for (key, rx) in &self.pending {
            match rx.try_recv() {
                Ok(Some(data)) => {
                    self.loaded.insert(key.clone(), data);
                    completed.push(key.clone());
                }
                Ok(None) | Err(mpsc::TryRecvError::Disconnected) => {
                    self.failed.insert(key.clone());
                    completed.push(key.clone());
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
        for key in completed {
            self.pending.remove(&key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Thumbnail> {
        self.loaded.get(key)
    }

    pub fn has_failed(&self, key: &str) -> bool {
        self.failed.contains(key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    fn drain(loader: &mut ThumbnailLoader) {
        for _ in 0..400 {
            loader.poll();
            if loader.pending_count() == 0 {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("loader never settled");
    }

    #[test]
    fn player_url_is_canonicalized() {
        assert_eq!(
            canonical_video_url("https://player.vimeo.com/video/187204270"),
            "https://vimeo.com/187204270"
        );
        assert_eq!(
            canonical_video_url("https://youtu.be/abc"),
            "https://youtu.be/abc"
        );
    }

    #[test]
    fn oembed_url_carries_encoded_video() {
        let u = oembed_request_url(
            "https://vimeo.com/api/oembed.json",
            "https://player.vimeo.com/video/42",
        )
        .unwrap();
        let pairs: Vec<(String, String)> = u.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("url".to_string(), "https://vimeo.com/42".to_string())]);
    }

    #[test]
    fn decode_downscales_wide_images() {
        let t = decode(&png(1280, 100)).unwrap();
        assert_eq!(t.width, MAX_WIDTH);
        assert_eq!(t.height, 50);
        assert_eq!(t.rgba.len(), (t.width * t.height * 4) as usize);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(decode(b"nope"), Err(GalleryError::Image(_))));
    }

    #[test]
    fn missing_local_image_is_io_error() {
        assert!(matches!(
            fetch_image("/nonexistent/iris-folio/card.png", 1),
            Err(GalleryError::Io(_))
        ));
    }

    #[test]
    fn failed_request_is_fetched_once_and_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let fetch: Fetcher = Arc::new(move |_: &str| -> Result<Thumbnail, GalleryError> {
            seen.fetch_add(1, Ordering::SeqCst);
            Err(GalleryError::NoThumbnail)
        });
        let mut loader = ThumbnailLoader::with_fetchers(Arc::clone(&fetch), fetch);

        loader.request("https://vimeo.com/1");
        loader.request("https://vimeo.com/1");
        assert_eq!(loader.pending_count(), 1);

        drain(&mut loader);
        assert!(loader.has_failed("https://vimeo.com/1"));
        loader.request("https://vimeo.com/1");
        assert_eq!(loader.pending_count(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn image_requests_use_the_image_source() {
        let oembed: Fetcher =
            Arc::new(|_: &str| -> Result<Thumbnail, GalleryError> { Err(GalleryError::NoThumbnail) });
        let images: Fetcher = Arc::new(|_: &str| -> Result<Thumbnail, GalleryError> {
            Ok(Thumbnail {
                width: 1,
                height: 1,
                rgba: vec![0; 4],
            })
        });
        let mut loader = ThumbnailLoader::with_fetchers(oembed, images);
        loader.request_image("images/loom.png");
        drain(&mut loader);
        assert_eq!(loader.get("images/loom.png").map(|t| t.width), Some(1));
    }

    #[test]
    fn local_image_loads_off_thread() {
        let path = std::env::temp_dir().join(format!("iris-folio-card-{}.png", std::process::id()));
        std::fs::write(&path, png(4, 2)).unwrap();
        let src = path.to_string_lossy().into_owned();

        let mut loader = ThumbnailLoader::new("http://127.0.0.1:9/unused", 1);
        loader.request_image(&src);
        drain(&mut loader);
        let t = loader.get(&src).unwrap();
        assert_eq!((t.width, t.height), (4, 2));
        let _ = std::fs::remove_file(&path);
    }
}

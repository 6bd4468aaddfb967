//! Turning backend image references into URLs a front end can display.

use chrono::Utc;
use reqwest::Url;

/// Absolute references (anything starting with `http`) pass through; the
/// rest are joined onto the backend origin.
pub fn resolve(origin: &Url, image_url: &str) -> String {
    if image_url.starts_with("http") {
        return image_url.to_string();
    }
    match origin.join(image_url) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}{}", origin.as_str().trim_end_matches('/'), image_url),
    }
}

pub fn cache_busted(url: &str, timestamp_ms: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, timestamp_ms)
}

/// Resolved and cache-busted with the current time, so a regenerated image
/// at the same path is never served stale.
pub fn display_url(origin: &Url, image_url: &str) -> String {
    cache_busted(&resolve(origin, image_url), Utc::now().timestamp_millis())
}

use crate::error::{ImagineError, Result};
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub poll_interval: Duration,
    /// `None` leaves timeouts to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let backend_url =
            env::var("IMAGINE_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let poll_interval = env::var("IMAGINE_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let request_timeout = env::var("IMAGINE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Config {
            backend_url,
            poll_interval,
            request_timeout,
        }
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Parses the backend origin. Only http(s) origins are accepted. The
    /// returned path always ends in `/` so endpoints join under any prefix.
    pub fn backend_origin(&self) -> Result<Url> {
        let mut url = Url::parse(self.backend_url.trim()).map_err(|e| {
            ImagineError::Config(format!("invalid backend url '{}': {}", self.backend_url, e))
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ImagineError::Config(format!(
                    "unsupported backend url scheme '{}'",
                    other
                )))
            }
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn validate(&self) -> Result<()> {
        self.backend_origin()?;
        if self.poll_interval.is_zero() {
            return Err(ImagineError::Config(
                "poll interval must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

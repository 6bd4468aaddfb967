#![allow(dead_code)]

use async_trait::async_trait;
use imagine::{
    Config, GenerationRequest, GenerationStatus, ImagineBackend, ImagineClient, ImagineError,
    ModelId, Result,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// In-memory backend with scripted replies and call accounting.
#[derive(Default)]
pub struct ScriptedBackend {
    /// `None` entries fail the fetch. The last status repeats once the
    /// script runs out.
    progress_script: Mutex<VecDeque<Option<GenerationStatus>>>,
    last_status: Mutex<Option<GenerationStatus>>,
    progress_delay: Mutex<Duration>,
    image_url: Mutex<Option<String>>,
    generate_fails: AtomicBool,
    generate_gate: Mutex<Option<Arc<Notify>>>,
    gallery: Mutex<Option<Vec<String>>>,
    chat_script: Mutex<VecDeque<(Duration, Option<String>)>>,

    pub generate_calls: AtomicUsize,
    pub progress_calls: AtomicUsize,
    pub cancel_calls: AtomicUsize,
    pub gallery_calls: AtomicUsize,
    pub chat_calls: AtomicUsize,
    progress_in_flight: AtomicUsize,
    pub max_progress_in_flight: AtomicUsize,
    pub requests: Mutex<Vec<GenerationRequest>>,
    pub progress_models: Mutex<Vec<ModelId>>,
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn status(progress: u8, eta: u64) -> Option<GenerationStatus> {
    Some(GenerationStatus { progress, eta })
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(self, script: Vec<Option<GenerationStatus>>) -> Self {
        *self.progress_script.lock().unwrap() = script.into();
        self
    }

    pub fn with_progress_delay(self, delay: Duration) -> Self {
        *self.progress_delay.lock().unwrap() = delay;
        self
    }

    pub fn with_image(self, url: &str) -> Self {
        *self.image_url.lock().unwrap() = Some(url.to_string());
        self
    }

    pub fn failing_generate(self) -> Self {
        self.generate_fails.store(true, Ordering::SeqCst);
        self
    }

    /// `/generate` blocks until the returned notify is signalled.
    pub fn gated(self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        *self.generate_gate.lock().unwrap() = Some(gate.clone());
        (self, gate)
    }

    pub fn with_gallery(self, images: &[&str]) -> Self {
        self.set_gallery(Some(images.iter().map(|s| s.to_string()).collect()));
        self
    }

    pub fn set_gallery(&self, images: Option<Vec<String>>) {
        *self.gallery.lock().unwrap() = images;
    }

    pub fn with_chat(self, script: Vec<(Duration, Option<&str>)>) -> Self {
        *self.chat_script.lock().unwrap() = script
            .into_iter()
            .map(|(delay, reply)| (delay, reply.map(str::to_string)))
            .collect();
        self
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImagineBackend for ScriptedBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let gate = self.generate_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.generate_fails.load(Ordering::SeqCst) {
            return Err(ImagineError::Http {
                status: 500,
                url: "http://backend/generate".into(),
            });
        }
        self.image_url
            .lock()
            .unwrap()
            .clone()
            .ok_or(ImagineError::MissingField("imageUrl"))
    }

    async fn progress(&self, model: ModelId) -> Result<GenerationStatus> {
        self.progress_calls.fetch_add(1, Ordering::SeqCst);
        self.progress_models.lock().unwrap().push(model);
        let now = self.progress_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_progress_in_flight.fetch_max(now, Ordering::SeqCst);
        // aborted polls drop this future mid-sleep
        let in_flight = InFlightGuard(&self.progress_in_flight);

        let delay = *self.progress_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        drop(in_flight);

        let next = self.progress_script.lock().unwrap().pop_front();
        let reply = match next {
            Some(entry) => entry,
            None => *self.last_status.lock().unwrap(),
        };
        match reply {
            Some(status) => {
                *self.last_status.lock().unwrap() = Some(status);
                Ok(status)
            }
            None => Err(ImagineError::Transport("connection refused".into())),
        }
    }

    async fn cancel(&self) -> Result<()> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn gallery(&self) -> Result<Vec<String>> {
        self.gallery_calls.fetch_add(1, Ordering::SeqCst);
        self.gallery
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ImagineError::Transport("gallery unavailable".into()))
    }

    async fn chat(&self, _prompt: &str) -> Result<String> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.chat_script.lock().unwrap().pop_front();
        let (delay, reply) = next.unwrap_or((Duration::ZERO, None));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply.ok_or(ImagineError::MissingField("response"))
    }
}

pub fn client_with(backend: Arc<ScriptedBackend>) -> ImagineClient {
    ImagineClient::with_backend(Config::new(), backend).unwrap()
}

pub async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

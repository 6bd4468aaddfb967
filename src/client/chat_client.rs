use crate::{
    backend::ImagineBackend,
    models::{ChatMessage, CHAT_FALLBACK, CHAT_WELCOME},
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Chat widget backed by `/api/gemini`. Each send is a single exchange;
/// the transcript lives only in memory.
#[derive(Clone)]
pub struct ChatClient {
    backend: Arc<dyn ImagineBackend>,
    transcript: Arc<Mutex<Vec<ChatMessage>>>,
    send_lock: Arc<tokio::sync::Mutex<()>>,
    in_flight: Arc<AtomicUsize>,
    open: Arc<AtomicBool>,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ChatClient {
    pub fn new(backend: Arc<dyn ImagineBackend>) -> Self {
        Self {
            backend,
            transcript: Arc::new(Mutex::new(vec![ChatMessage::ai(CHAT_WELCOME)])),
            send_lock: Arc::new(tokio::sync::Mutex::new(())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            open: Arc::new(AtomicBool::new(false)),
        }
    }

    fn messages(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends `input` as a user message right away, then appends the reply
    /// (or the fallback text) once the exchange settles. Blank input is
    /// ignored and returns `None`.
    ///
    /// Exchanges run one at a time, so replies land in send order.
    pub async fn send(&self, input: &str) -> Option<ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }
        log::debug!("Sending chat message: {}", input);
        self.messages().push(ChatMessage::user(input));
        let _in_flight = InFlight::enter(&self.in_flight);

        let _turn = self.send_lock.lock().await;
        let reply = match self.backend.chat(input).await {
            Ok(text) => ChatMessage::ai(text),
            Err(e) => {
                log::error!("Error in chat exchange: {}", e);
                ChatMessage::ai(CHAT_FALLBACK)
            }
        };
        self.messages().push(reply.clone());
        Some(reply)
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.messages().clone()
    }

    /// True while an exchange is outstanding; drives the typing indicator.
    pub fn is_typing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn toggle(&self) -> bool {
        let was_open = self.open.fetch_xor(true, Ordering::SeqCst);
        log::debug!("Chat widget {}", if was_open { "closed" } else { "opened" });
        !was_open
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

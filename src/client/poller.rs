//! Fixed-cadence progress polling for one generation at a time.

use crate::{
    backend::ImagineBackend,
    models::ModelId,
    store::{Action, Store},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling,
    Stopped,
}

/// The running poll task. Dropping the handle aborts the task.
struct PollHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct ProgressPoller {
    backend: Arc<dyn ImagineBackend>,
    store: Store,
    interval: Duration,
    current: Option<PollHandle>,
}

impl ProgressPoller {
    pub fn new(backend: Arc<dyn ImagineBackend>, store: Store, interval: Duration) -> Self {
        Self {
            backend,
            store,
            interval,
            current: None,
        }
    }

    /// Starts polling for `generation`, replacing any cycle already running.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, model: ModelId, generation: u64) {
        if self.stop() {
            log::debug!("Replaced running progress poll with generation #{}", generation);
        }
        self.store.dispatch(Action::PollingStarted { id: generation });

        let task = tokio::spawn(poll_loop(
            Arc::clone(&self.backend),
            self.store.clone(),
            model,
            generation,
            self.interval,
        ));
        self.current = Some(PollHandle { generation, task });
    }

    /// Returns whether a cycle was still running.
    pub fn stop(&mut self) -> bool {
        match self.current.take() {
            Some(handle) => !handle.task.is_finished(),
            None => false,
        }
    }

    /// Stops the cycle only if it belongs to `generation`.
    pub fn stop_for(&mut self, generation: u64) -> bool {
        if self.generation() == Some(generation) {
            self.stop()
        } else {
            false
        }
    }

    pub fn generation(&self) -> Option<u64> {
        self.current.as_ref().map(|h| h.generation)
    }

    pub fn state(&self) -> PollerState {
        match &self.current {
            None => PollerState::Idle,
            Some(handle) if handle.task.is_finished() => PollerState::Stopped,
            Some(_) => PollerState::Polling,
        }
    }
}

async fn poll_loop(
    backend: Arc<dyn ImagineBackend>,
    store: Store,
    model: ModelId,
    generation: u64,
    period: Duration,
) {
    // the next tick is only awaited after the previous fetch settled, so
    // status requests never overlap
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match backend.progress(model).await {
            Ok(status) => {
                log::debug!(
                    "Generation #{} progress {}% (eta {}s)",
                    generation,
                    status.progress,
                    status.eta
                );
                if !store.dispatch(Action::ProgressTick {
                    id: generation,
                    status,
                }) {
                    log::debug!("Generation #{} no longer polling", generation);
                    break;
                }
                if status.is_complete() {
                    log::info!("✅ Generation #{} reported complete", generation);
                    break;
                }
            }
            Err(e) => {
                log::error!("Error polling progress for generation #{}: {}", generation, e);
                store.dispatch(Action::PollingStopped { id: generation });
                break;
            }
        }
    }
}

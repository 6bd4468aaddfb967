mod common;

use common::{settle, status, ScriptedBackend};
use imagine::{ModelId, PollerState, ProgressPoller, Store};
use std::sync::Arc;
use std::time::Duration;

fn poller(backend: Arc<ScriptedBackend>, store: &Store) -> ProgressPoller {
    ProgressPoller::new(backend, store.clone(), Duration::from_secs(1))
}

#[tokio::test(start_paused = true)]
async fn state_moves_idle_polling_stopped() {
    let backend = Arc::new(ScriptedBackend::new().with_progress(vec![status(50, 4), status(100, 0)]));
    let store = Store::default();
    let mut poller = poller(backend.clone(), &store);
    assert_eq!(poller.state(), PollerState::Idle);

    let id = store.begin_generation();
    poller.start(ModelId::Model1, id);
    assert_eq!(poller.state(), PollerState::Polling);
    assert_eq!(poller.generation(), Some(id));

    settle(2500).await;
    assert_eq!(poller.state(), PollerState::Stopped);
    assert_eq!(store.read(|s| s.progress), 100);
    assert!(!store.read(|s| s.loading));
    assert!(!poller.stop());
    assert_eq!(poller.state(), PollerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn first_fetch_waits_one_interval() {
    let backend = Arc::new(ScriptedBackend::new().with_progress(vec![status(10, 9)]));
    let store = Store::default();
    let mut poller = poller(backend.clone(), &store);

    let id = store.begin_generation();
    poller.start(ModelId::Model2, id);
    settle(900).await;
    assert_eq!(ScriptedBackend::count(&backend.progress_calls), 0);
    settle(200).await;
    assert_eq!(ScriptedBackend::count(&backend.progress_calls), 1);
    assert!(poller.stop());
}

#[tokio::test(start_paused = true)]
async fn stop_for_ignores_other_generations() {
    let backend = Arc::new(ScriptedBackend::new().with_progress(vec![status(10, 9)]));
    let store = Store::default();
    let mut poller = poller(backend.clone(), &store);

    let id = store.begin_generation();
    poller.start(ModelId::Model1, id);
    assert!(!poller.stop_for(id + 1));
    assert_eq!(poller.state(), PollerState::Polling);
    assert!(poller.stop_for(id));
    assert_eq!(poller.state(), PollerState::Idle);

    settle(3000).await;
    assert_eq!(ScriptedBackend::count(&backend.progress_calls), 0);
}

#[tokio::test(start_paused = true)]
async fn restarting_keeps_a_single_timer() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .with_progress(vec![status(10, 9)])
            .with_progress_delay(Duration::from_millis(400)),
    );
    let store = Store::default();
    let mut poller = poller(backend.clone(), &store);

    for _ in 0..3 {
        let id = store.begin_generation();
        poller.start(ModelId::Model1, id);
        settle(1200).await;
    }
    settle(3000).await;

    assert_eq!(ScriptedBackend::count(&backend.max_progress_in_flight), 1);
    assert_eq!(poller.generation(), Some(3));
    poller.stop();
}

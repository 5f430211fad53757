//! Data-fetching hook with cancellation on teardown.
//!
//! A [`Resource`] runs one load at a time on the tokio runtime. A new load
//! cancels the one in flight, a cancelled load never touches the state, and
//! once the resource is dropped nothing is written at all.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use client::{PendingRequest, RequestScope};
use tokio::sync::watch;
use tokio::task::JoinHandle;

const LOAD_SLOT: &str = "load";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    /// Notification text for the failed load.
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

struct Shared<T> {
    state: watch::Sender<LoadState<T>>,
    generation: AtomicU64,
}

pub struct Resource<T> {
    shared: Arc<Shared<T>>,
    scope: RequestScope,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Default for Resource<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Resource<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            shared: Arc::new(Shared {
                state,
                generation: AtomicU64::new(0),
            }),
            scope: RequestScope::new(),
            task: Mutex::new(None),
        }
    }

    pub fn state(&self) -> LoadState<T> {
        self.shared.state.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.shared.state.borrow().data().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading()
    }

    /// Watch state changes. The channel closes when the resource is dropped.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.shared.state.subscribe()
    }

    /// Start a load, replacing any load still in flight. Must be called
    /// inside a tokio runtime.
    pub fn load(&self, request: PendingRequest<T>) {
        let request = self.scope.latest(LOAD_SLOT, request);
        let mut generation = 0;
        self.shared.state.send_modify(|state| {
            generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = LoadState::Loading;
        });

        let shared = Arc::downgrade(&self.shared);
        let task = tokio::spawn(async move {
            let result = request.await;
            apply(&shared, generation, result);
        });

        let mut slot = self.task.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = slot.replace(task) {
            previous.abort();
        }
    }

    /// Abandon the load in flight. The state goes back to `Idle` if it was loading.
    pub fn cancel(&self) {
        self.scope.cancel_slot(LOAD_SLOT);
        self.shared.state.send_if_modified(|state| {
            self.shared.generation.fetch_add(1, Ordering::SeqCst);
            if state.is_loading() {
                *state = LoadState::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Wait until the current load has finished and return its outcome.
    pub async fn settled(&self) -> LoadState<T> {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }
}

fn apply<T>(shared: &Weak<Shared<T>>, generation: u64, result: Result<T, client::ClientError>) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let next = match result {
        Ok(data) => LoadState::Ready(data),
        Err(err) if err.is_canceled() => {
            tracing::debug!(generation, "load cancelled");
            return;
        }
        Err(err) => LoadState::Failed(err.notification().unwrap_or_else(|| err.to_string())),
    };
    shared.state.send_if_modified(|state| {
        if shared.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *state = next;
        true
    });
}

impl<T> Drop for Resource<T> {
    fn drop(&mut self) {
        self.scope.cancel_all();
        let slot = self.task.get_mut().unwrap_or_else(|p| p.into_inner());
        if let Some(task) = slot.take() {
            task.abort();
        }
    }
}

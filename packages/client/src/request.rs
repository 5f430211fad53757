use std::collections::HashMap;
use std::future::{Future, IntoFuture};
use std::sync::{Mutex, MutexGuard};

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

/// Cancels the request it was taken from. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelHandle(CancellationToken);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.cancel();
    }

    pub fn is_canceled(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// An issued API call: the `{ request, cancel }` pair.
///
/// Await it (it implements `IntoFuture`) or call [`PendingRequest::response`].
/// Once cancelled it resolves to [`ClientError::Canceled`], even if the server
/// already answered, so a stale response is never acted on.
pub struct PendingRequest<T> {
    token: CancellationToken,
    request: BoxFuture<'static, Result<T, ClientError>>,
}

impl<T: Send + 'static> PendingRequest<T> {
    pub fn new<F>(request: F) -> Self
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        Self::with_token(CancellationToken::new(), request)
    }

    fn with_token<F>(token: CancellationToken, request: F) -> Self
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        Self {
            token,
            request: Box::pin(request),
        }
    }

    /// A request that settles immediately without touching the network.
    pub fn ready(result: Result<T, ClientError>) -> Self {
        Self::new(async move { result })
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.token.clone())
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_canceled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn map<U, F>(self, f: F) -> PendingRequest<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let Self { token, request } = self;
        PendingRequest::with_token(token, async move { request.await.map(f) })
    }

    /// Split into the raw request future and its cancel handle.
    pub fn into_parts(self) -> (BoxFuture<'static, Result<T, ClientError>>, CancelHandle) {
        let handle = self.cancel_handle();
        (Box::pin(self.response()), handle)
    }

    pub async fn response(self) -> Result<T, ClientError> {
        let Self { token, request } = self;
        if token.is_cancelled() {
            return Err(ClientError::Canceled);
        }
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(ClientError::Canceled),
            result = request => {
                if token.is_cancelled() {
                    Err(ClientError::Canceled)
                } else {
                    result
                }
            }
        }
    }
}

impl<T: Send + 'static> IntoFuture for PendingRequest<T> {
    type Output = Result<T, ClientError>;
    type IntoFuture = BoxFuture<'static, Result<T, ClientError>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.response())
    }
}

/// Owns the requests issued on behalf of one view.
///
/// Dropping the scope (the view going away) cancels everything it tracks.
/// Requests issued through [`RequestScope::latest`] also cancel the previous
/// request for the same slot, so only the newest response is applied.
#[derive(Debug, Default)]
pub struct RequestScope {
    root: CancellationToken,
    slots: Mutex<HashMap<String, CancelHandle>>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tie a request to this scope.
    pub fn track<T: Send + 'static>(&self, pending: PendingRequest<T>) -> PendingRequest<T> {
        let token = self.root.child_token();
        PendingRequest::with_token(token, pending.response())
    }

    /// Tie a request to this scope, cancelling the previous one issued for `slot`.
    pub fn latest<T: Send + 'static>(
        &self,
        slot: &str,
        pending: PendingRequest<T>,
    ) -> PendingRequest<T> {
        let tracked = self.track(pending);
        let previous = self
            .lock_slots()
            .insert(slot.to_string(), tracked.cancel_handle());
        if let Some(previous) = previous {
            previous.cancel();
        }
        tracked
    }

    /// Cancel the in-flight request for one slot, if any.
    pub fn cancel_slot(&self, slot: &str) {
        if let Some(handle) = self.lock_slots().remove(slot) {
            handle.cancel();
        }
    }

    /// Cancel everything; requests tracked afterwards start out cancelled.
    pub fn cancel_all(&self) {
        self.root.cancel();
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, CancelHandle>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

//! Interval polling
//!
//! A [`Poller`] owns one spawned task that fetches a resource immediately and
//! then on every tick, publishing a [`PollState`] through a `watch` channel.
//!
//! - `loading` is true only until the first response, success or failure.
//! - A success replaces `data` and clears `error`.
//! - A failure sets `error` and keeps the previous `data`.
//! - No backoff and no de-duplication: a failing source is polled forever.
//!
//! To change endpoint, session or interval, drop the poller and start a new
//! one.

use crate::error::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::Session;
use crate::SirestClient;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use shared::models::{DiningTable, Payment, Product, StaffStatus, StockAlert, UserProfile};
use shared::order::Order;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Something a poller can fetch
#[async_trait]
pub trait Fetch<T>: Send + Sync + 'static {
    async fn fetch(&self) -> ClientResult<T>;
}

/// Snapshot published after every fetch
#[derive(Debug)]
pub struct PollState<T> {
    /// Last successful result
    pub data: Option<Arc<T>>,
    /// True until the first response arrives
    pub loading: bool,
    /// Message of the most recent failure, cleared by the next success
    pub error: Option<String>,
    /// Number of completed fetches
    pub generation: u64,
}

impl<T> Clone for PollState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
            generation: self.generation,
        }
    }
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            generation: 0,
        }
    }
}

impl<T> PollState<T> {
    /// Data present and the last fetch failed
    pub fn is_stale(&self) -> bool {
        self.data.is_some() && self.error.is_some()
    }

    fn apply(&mut self, result: ClientResult<T>) {
        match result {
            Ok(value) => {
                self.data = Some(Arc::new(value));
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
        self.generation += 1;
    }
}

/// Cloneable trigger for an immediate refetch
#[derive(Clone)]
pub struct RefetchHandle {
    name: Arc<str>,
    notify: Arc<Notify>,
    cancel: CancellationToken,
}

impl RefetchHandle {
    pub fn refetch(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!(poller = %self.name, "refetch requested");
            self.notify.notify_one();
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl fmt::Debug for RefetchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefetchHandle")
            .field("name", &self.name)
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// Handle to a running poll task. Dropping it stops the task.
pub struct Poller<T> {
    rx: watch::Receiver<PollState<T>>,
    handle: RefetchHandle,
}

impl<T: Send + Sync + 'static> Poller<T> {
    /// Start polling `source` every `interval`. Must be called inside a Tokio
    /// runtime.
    pub fn spawn<F: Fetch<T>>(name: impl Into<String>, source: F, interval: Duration) -> Self {
        let name: Arc<str> = Arc::from(name.into());
        let (tx, rx) = watch::channel(PollState::default());
        let handle = RefetchHandle {
            name: name.clone(),
            notify: Arc::new(Notify::new()),
            cancel: CancellationToken::new(),
        };

        let task = handle.clone();
        tokio::spawn(async move {
            run(task, source, interval, tx).await;
        });

        Self { rx, handle }
    }

    /// Receiver that wakes on every published state
    pub fn subscribe(&self) -> watch::Receiver<PollState<T>> {
        self.rx.clone()
    }

    /// Current state
    pub fn state(&self) -> PollState<T> {
        self.rx.borrow().clone()
    }

    pub fn data(&self) -> Option<Arc<T>> {
        self.rx.borrow().data.clone()
    }

    /// Fetch now, outside the timer
    pub fn refetch(&self) {
        self.handle.refetch();
    }

    pub fn refetch_handle(&self) -> RefetchHandle {
        self.handle.clone()
    }

    /// Cancel the task. A fetch in flight is discarded.
    pub fn stop(&self) {
        self.handle.cancel.cancel();
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.handle.cancel.cancel();
    }
}

impl<T> fmt::Debug for Poller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller").field("handle", &self.handle).finish()
    }
}

async fn run<T, F: Fetch<T>>(
    handle: RefetchHandle,
    source: F,
    interval: Duration,
    tx: watch::Sender<PollState<T>>,
) {
    // first tick completes immediately
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::debug!(poller = %handle.name, interval_ms = interval.as_millis() as u64, "Poller started");

    loop {
        tokio::select! {
            biased;
            _ = handle.cancel.cancelled() => break,
            _ = ticker.tick() => {}
            _ = handle.notify.notified() => {}
        }

        let result = tokio::select! {
            biased;
            _ = handle.cancel.cancelled() => break,
            result = source.fetch() => result,
        };

        if let Err(e) = &result {
            tracing::warn!(poller = %handle.name, error = %e, "Poll failed");
        }
        tx.send_modify(|state| state.apply(result));
    }

    tracing::debug!(poller = %handle.name, "Poller stopped");
}

// ============================================================================
// Backend resources
// ============================================================================

/// GET `endpoint` and take `field` from the envelope
pub struct EndpointSource<C: HttpClient = NetworkHttpClient> {
    client: SirestClient<C>,
    endpoint: &'static str,
    field: &'static str,
    session: Option<Session>,
}

impl<C: HttpClient> EndpointSource<C> {
    pub fn new(
        client: SirestClient<C>,
        endpoint: &'static str,
        field: &'static str,
        session: Option<Session>,
    ) -> Self {
        Self {
            client,
            endpoint,
            field,
            session,
        }
    }
}

#[async_trait]
impl<C, T> Fetch<T> for EndpointSource<C>
where
    C: HttpClient,
    T: DeserializeOwned + Default + Send + 'static,
{
    async fn fetch(&self) -> ClientResult<T> {
        self.client
            .fetch_or_default(self.endpoint, self.field, self.session.as_ref())
            .await
    }
}

/// Builds pollers for the backend collections
#[derive(Debug)]
pub struct ResourcePoller<C: HttpClient = NetworkHttpClient> {
    client: SirestClient<C>,
    session: Session,
    interval: Duration,
}

impl<C: HttpClient> Clone for ResourcePoller<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            session: self.session.clone(),
            interval: self.interval,
        }
    }
}

impl<C: HttpClient> ResourcePoller<C> {
    pub fn new(client: SirestClient<C>, session: Session, interval: Duration) -> Self {
        Self {
            client,
            session,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn start<T>(&self, endpoint: &'static str, field: &'static str) -> Poller<T>
    where
        T: DeserializeOwned + Default + Send + Sync + 'static,
    {
        let source = EndpointSource::new(
            self.client.clone(),
            endpoint,
            field,
            Some(self.session.clone()),
        );
        Poller::spawn(endpoint, source, self.interval)
    }

    pub fn orders(&self) -> Poller<Vec<Order>> {
        self.start(crate::api::endpoints::ORDERS, "orders")
    }

    pub fn products(&self) -> Poller<Vec<Product>> {
        self.start(crate::api::endpoints::PRODUCTS, "products")
    }

    pub fn tables(&self) -> Poller<Vec<DiningTable>> {
        self.start(crate::api::endpoints::TABLES, "tables")
    }

    pub fn payments(&self) -> Poller<Vec<Payment>> {
        self.start(crate::api::endpoints::PAYMENTS, "payments")
    }

    pub fn users(&self) -> Poller<Vec<UserProfile>> {
        self.start(crate::api::endpoints::USERS, "users")
    }

    pub fn alerts(&self) -> Poller<Vec<StockAlert>> {
        self.start(crate::api::endpoints::ALERTS, "alerts")
    }

    pub fn staff_status(&self) -> Poller<Vec<StaffStatus>> {
        self.start(crate::api::endpoints::STAFF_STATUS, "staff")
    }
}

// ============================================================================
// Refetch registry
// ============================================================================

/// Resources a mutation can invalidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Orders,
    Tables,
    Payments,
    Products,
}

/// Pollers to nudge after a mutation. Shared between services.
#[derive(Debug, Default, Clone)]
pub struct RefetchRegistry {
    entries: Arc<Mutex<Vec<(Resource, RefetchHandle)>>>,
}

impl RefetchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, resource: Resource, handle: RefetchHandle) {
        self.entries.lock().push((resource, handle));
    }

    /// Refetch every live poller of `resources`; forgets stopped ones
    pub fn refetch(&self, resources: &[Resource]) {
        let mut entries = self.entries.lock();
        entries.retain(|(_, h)| !h.is_stopped());
        for (resource, handle) in entries.iter() {
            if resources.contains(resource) {
                handle.refetch();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Odd calls succeed with the call number, even calls fail
    struct Alternating {
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl Fetch<u32> for Alternating {
        async fn fetch(&self) -> ClientResult<u32> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n % 2 == 1 {
                Ok(n)
            } else {
                Err(ClientError::Api {
                    status: 500,
                    message: format!("failure {n}"),
                })
            }
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl Fetch<u32> for AlwaysFails {
        async fn fetch(&self) -> ClientResult<u32> {
            Err(ClientError::InvalidResponse("down".into()))
        }
    }

    struct Slow;

    #[async_trait]
    impl Fetch<u32> for Slow {
        async fn fetch(&self) -> ClientResult<u32> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(1)
        }
    }

    fn alternating() -> (Alternating, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            Alternating {
                calls: calls.clone(),
            },
            calls,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_last_data() {
        let (source, _) = alternating();
        let poller = Poller::spawn("alt", source, Duration::from_millis(3000));
        let mut rx = poller.subscribe();

        assert!(rx.borrow().loading);

        rx.changed().await.unwrap();
        {
            let s = rx.borrow_and_update();
            assert_eq!(s.generation, 1);
            assert_eq!(s.data.as_deref(), Some(&1));
            assert!(!s.loading);
            assert!(s.error.is_none());
        }

        rx.changed().await.unwrap();
        {
            let s = rx.borrow_and_update();
            assert_eq!(s.generation, 2);
            assert_eq!(s.data.as_deref(), Some(&1));
            assert_eq!(s.error.as_deref(), Some("API error (500): failure 2"));
            assert!(!s.loading);
        }
        assert!(poller.state().is_stale());

        rx.changed().await.unwrap();
        let s = rx.borrow_and_update();
        assert_eq!(s.data.as_deref(), Some(&3));
        assert!(s.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_is_immediate_then_on_interval() {
        let (source, calls) = alternating();
        let start = tokio::time::Instant::now();
        let poller = Poller::spawn("alt", source, Duration::from_millis(3000));
        let mut rx = poller.subscribe();

        rx.changed().await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);

        rx.changed().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_first_fetch_clears_loading() {
        let poller = Poller::spawn("down", AlwaysFails, Duration::from_millis(3000));
        let mut rx = poller.subscribe();
        rx.changed().await.unwrap();
        let s = rx.borrow_and_update().clone();
        assert!(!s.loading);
        assert!(s.data.is_none());
        assert!(s.error.is_some());

        // keeps polling without backoff
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetch_bypasses_timer() {
        let (source, calls) = alternating();
        let poller = Poller::spawn("alt", source, Duration::from_secs(3600));
        let mut rx = poller.subscribe();
        rx.changed().await.unwrap();

        let start = tokio::time::Instant::now();
        poller.refetch();
        rx.changed().await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_task() {
        let (source, _) = alternating();
        let poller = Poller::spawn("alt", source, Duration::from_millis(3000));
        let mut rx = poller.subscribe();
        rx.changed().await.unwrap();

        poller.stop();
        assert!(rx.changed().await.is_err());
        assert!(poller.refetch_handle().is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_fetch_discarded_on_stop() {
        let poller = Poller::spawn("slow", Slow, Duration::from_millis(3000));
        let mut rx = poller.subscribe();
        tokio::time::sleep(Duration::from_secs(1)).await;
        poller.stop();
        assert!(rx.changed().await.is_err());
        let s = rx.borrow();
        assert_eq!(s.generation, 0);
        assert!(s.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_registry_refetches_matching_resources() {
        let (orders_src, order_calls) = alternating();
        let (tables_src, table_calls) = alternating();
        let orders = Poller::spawn("orders", orders_src, Duration::from_secs(3600));
        let tables = Poller::spawn("tables", tables_src, Duration::from_secs(3600));
        let mut orders_rx = orders.subscribe();
        let mut tables_rx = tables.subscribe();
        orders_rx.changed().await.unwrap();
        tables_rx.changed().await.unwrap();

        let registry = RefetchRegistry::new();
        registry.register(Resource::Orders, orders.refetch_handle());
        registry.register(Resource::Tables, tables.refetch_handle());

        registry.refetch(&[Resource::Orders]);
        orders_rx.changed().await.unwrap();
        assert_eq!(order_calls.load(Ordering::SeqCst), 2);
        assert_eq!(table_calls.load(Ordering::SeqCst), 1);

        drop(tables);
        registry.refetch(&[Resource::Tables]);
        assert_eq!(registry.len(), 1);
    }
}

//! Headless role console
//!
//! Starts the pollers a role's screen needs and re-renders the screen as
//! text every time one of them publishes.

use crate::views::{self, Feeds, Snapshots};
use chrono::{DateTime, Utc};
use shared::models::{RestaurantConfig, Role};
use sirest_client::{HttpClient, PollState, Poller, ResourcePoller, Session, SirestClient};
use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

struct Feed<T> {
    poller: Poller<Vec<T>>,
    rx: watch::Receiver<PollState<Vec<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Feed<T> {
    fn new(poller: Poller<Vec<T>>) -> Self {
        let rx = poller.subscribe();
        Self { poller, rx }
    }

    fn items(&self) -> Vec<T> {
        self.rx.borrow().data.as_deref().cloned().unwrap_or_default()
    }

    /// `loading` / error line for the status bar, `None` when healthy
    fn problem(&self) -> Option<String> {
        let state = self.rx.borrow();
        if state.loading {
            Some(format!("{}: cargando", self.poller.name()))
        } else {
            state
                .error
                .as_ref()
                .map(|e| format!("{}: {e}", self.poller.name()))
        }
    }
}

fn items<T: Clone + Send + Sync + 'static>(feed: &Option<Feed<T>>) -> Vec<T> {
    feed.as_ref().map(Feed::items).unwrap_or_default()
}

fn stop<T: Send + Sync + 'static>(feed: &Option<Feed<T>>) {
    if let Some(f) = feed {
        f.poller.stop();
    }
}

/// Resolves when `feed` publishes; never resolves for an absent or closed feed
async fn changed<T>(feed: &mut Option<Feed<T>>) {
    if let Some(f) = feed
        && f.rx.changed().await.is_ok()
    {
        return;
    }
    std::future::pending::<()>().await
}

pub struct Console {
    session: Session,
    view: Role,
    width: usize,
    restaurant: RestaurantConfig,
    clear_screen: bool,
    orders: Option<Feed<shared::order::Order>>,
    products: Option<Feed<shared::models::Product>>,
    tables: Option<Feed<shared::models::DiningTable>>,
    payments: Option<Feed<shared::models::Payment>>,
    users: Option<Feed<shared::models::UserProfile>>,
    alerts: Option<Feed<shared::models::StockAlert>>,
    staff: Option<Feed<shared::models::StaffStatus>>,
}

impl Console {
    /// Start polling what the `view` screen needs. Must be called inside a
    /// Tokio runtime.
    pub fn start<C: HttpClient>(
        client: &SirestClient<C>,
        session: Session,
        view: Role,
        width: usize,
        restaurant: RestaurantConfig,
        interval: Duration,
    ) -> Self {
        let feeds = Feeds::for_role(view);
        let pollers = ResourcePoller::new(client.clone(), session.clone(), interval);
        tracing::info!(
            user = %session.display_name(),
            role = %session.role(),
            view = %view,
            interval_ms = interval.as_millis() as u64,
            "Starting console"
        );
        Self {
            session,
            view,
            width,
            restaurant,
            clear_screen: false,
            orders: feeds.orders.then(|| Feed::new(pollers.orders())),
            products: feeds.products.then(|| Feed::new(pollers.products())),
            tables: feeds.tables.then(|| Feed::new(pollers.tables())),
            payments: feeds.payments.then(|| Feed::new(pollers.payments())),
            users: feeds.users.then(|| Feed::new(pollers.users())),
            alerts: feeds.alerts.then(|| Feed::new(pollers.alerts())),
            staff: feeds.staff.then(|| Feed::new(pollers.staff_status())),
        }
    }

    /// Clear the terminal before every frame
    pub fn clear_screen(mut self, on: bool) -> Self {
        self.clear_screen = on;
        self
    }

    pub fn view(&self) -> Role {
        self.view
    }

    pub fn snapshots(&self, now: DateTime<Utc>) -> Snapshots {
        Snapshots {
            orders: items(&self.orders),
            products: items(&self.products),
            tables: items(&self.tables),
            payments: items(&self.payments),
            users: items(&self.users),
            alerts: items(&self.alerts),
            staff: items(&self.staff),
            config: self.restaurant.clone(),
            viewer_id: self.session.user_id().to_string(),
            now,
        }
    }

    fn problems(&self) -> Vec<String> {
        [
            self.orders.as_ref().and_then(Feed::problem),
            self.products.as_ref().and_then(Feed::problem),
            self.tables.as_ref().and_then(Feed::problem),
            self.payments.as_ref().and_then(Feed::problem),
            self.users.as_ref().and_then(Feed::problem),
            self.alerts.as_ref().and_then(Feed::problem),
            self.staff.as_ref().and_then(Feed::problem),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Render the current screen
    pub fn frame(&self, now: DateTime<Utc>) -> String {
        let snap = self.snapshots(now);
        let body = views::for_role(self.view, &snap).render(self.width, &self.restaurant.currency_symbol);

        let mut out = String::with_capacity(body.len() + 256);
        let header = format!(
            "{} | {} ({}) | {}",
            self.restaurant.name,
            self.session.display_name(),
            self.session.role().label(),
            now.format("%H:%M:%S")
        );
        out.push_str(&crate::render::truncate(&header, self.width));
        out.push('\n');
        for problem in self.problems() {
            out.push_str(&crate::render::truncate(&format!("! {problem}"), self.width));
            out.push('\n');
        }
        out.push_str(&body);
        out
    }

    /// Wait until any feed publishes a new state
    pub async fn changed(&mut self) {
        tokio::select! {
            _ = changed(&mut self.orders) => {}
            _ = changed(&mut self.products) => {}
            _ = changed(&mut self.tables) => {}
            _ = changed(&mut self.payments) => {}
            _ = changed(&mut self.users) => {}
            _ = changed(&mut self.alerts) => {}
            _ = changed(&mut self.staff) => {}
        }
    }

    /// Re-render on every change until `cancel` fires. Returns the number of
    /// frames written.
    pub async fn run<W: Write>(&mut self, out: &mut W, cancel: &CancellationToken) -> anyhow::Result<u64> {
        let mut frames = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = self.changed() => {}
            }
            let frame = self.frame(Utc::now());
            if self.clear_screen {
                out.write_all(CLEAR_SCREEN.as_bytes())?;
            }
            out.write_all(frame.as_bytes())?;
            out.flush()?;
            frames += 1;
        }
        self.stop();
        tracing::info!(frames, "Console stopped");
        Ok(frames)
    }

    /// Stop every poller
    pub fn stop(&self) {
        stop(&self.orders);
        stop(&self.products);
        stop(&self.tables);
        stop(&self.payments);
        stop(&self.users);
        stop(&self.alerts);
        stop(&self.staff);
    }
}

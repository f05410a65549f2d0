//! Foreground/background lifecycle
//!
//! The terminal reports focus gained/lost; the dispatcher turns those into
//! [`AppState`] transitions and forwards them to registered listeners.
//! [`ReloadSubscription`] is the one listener the application owns: it runs
//! a background task re-reading dataset files while the app is in front.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::DatasetConfig;
use crate::dataset::Library;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Foreground,
    Background,
}

/// Receives lifecycle transitions
pub trait LifecycleListener {
    fn on_foreground(&mut self);
    fn on_background(&mut self);
}

/// Forwards state transitions to its listeners
///
/// Repeated reports of the same state are swallowed, so listeners only see
/// real transitions.
pub struct LifecycleDispatcher<'a> {
    state: AppState,
    listeners: Vec<&'a mut dyn LifecycleListener>,
}

impl<'a> LifecycleDispatcher<'a> {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: initial,
            listeners: Vec::new(),
        }
    }

    pub fn register(&mut self, listener: &'a mut dyn LifecycleListener) {
        self.listeners.push(listener);
    }

    pub fn dispatch(&mut self, state: AppState) {
        if state == self.state {
            return;
        }
        tracing::debug!("Lifecycle transition {:?} -> {:?}", self.state, state);
        self.state = state;
        for listener in self.listeners.iter_mut() {
            match state {
                AppState::Foreground => listener.on_foreground(),
                AppState::Background => listener.on_background(),
            }
        }
    }
}

/// Result of one background reload
pub type ReloadResult = Result<Library, String>;

/// Periodic dataset reload with explicit start/stop
pub struct ReloadSubscription {
    config: DatasetConfig,
    interval: Duration,
    tx: mpsc::UnboundedSender<ReloadResult>,
    handle: Option<JoinHandle<()>>,
}

impl ReloadSubscription {
    /// Create a stopped subscription and the receiver its results arrive on
    pub fn new(
        config: DatasetConfig,
        interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ReloadResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = Self {
            config,
            interval,
            tx,
            handle: None,
        };
        (subscription, rx)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Spawn the reload task. Does nothing if it is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let config = self.config.clone();
        let interval = self.interval;
        let tx = self.tx.clone();

        tracing::debug!("Starting dataset reload every {:?}", interval);
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let config = config.clone();
                let result = tokio::task::spawn_blocking(move || Library::load(&config))
                    .await
                    .map_err(|e| e.to_string())
                    .and_then(|r| r.map_err(|e| format!("{e:#}")));
                if tx.send(result).is_err() {
                    // Receiver dropped
                    break;
                }
            }
        }));
    }

    /// Abort the reload task
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            tracing::debug!("Stopping dataset reload");
            handle.abort();
        }
    }
}

impl LifecycleListener for ReloadSubscription {
    fn on_foreground(&mut self) {
        self.start();
    }

    fn on_background(&mut self) {
        self.stop();
    }
}

impl Drop for ReloadSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

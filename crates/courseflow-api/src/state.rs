//! Shared server state.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use courseflow_advisor::AdvisorClient;
use courseflow_cache::FilePrefsStore;
use courseflow_protocols::Response;
use courseflow_sync::SyncService;

/// State shared by every handler and the background loops.
pub struct AppState {
    pub sync: Arc<SyncService>,
    pub prefs: Arc<FilePrefsStore>,
    /// None when no advisor API key is configured.
    pub advisor: Option<AdvisorClient>,
    notify_tx: broadcast::Sender<Response>,
}

impl AppState {
    pub fn new(
        sync: Arc<SyncService>,
        prefs: Arc<FilePrefsStore>,
        advisor: Option<AdvisorClient>,
    ) -> Self {
        let (notify_tx, _) = broadcast::channel(64);
        Self {
            sync,
            prefs,
            advisor,
            notify_tx,
        }
    }

    /// Broadcast a notification to every connected WebSocket client.
    /// Dropped silently when nobody is listening.
    pub fn notify(&self, title: impl Into<String>, body: impl Into<String>, priority: u8) {
        let message = Response::notification(title, body, priority);
        if let Err(e) = self.notify_tx.send(message) {
            debug!(error = %e, "notification dropped, no subscribers");
        }
    }

    /// Subscribe to notification broadcasts.
    pub fn subscribe(&self) -> broadcast::Receiver<Response> {
        self.notify_tx.subscribe()
    }
}

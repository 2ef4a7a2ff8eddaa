//! The session context: everything one login needs, composed.
//!
//! A [`Session`] wires the credential store, the connection manager, the
//! projection set and the event pump together. One session per login; on
//! logout (or a fatal server frame) the session is dropped and all derived
//! state goes with it — nothing persists except the credential store the
//! auth layer refills.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use wayfarer_client::{
    ClientConfig, ConnectionManager, ConnectionStatus, CredentialStore, EventStream,
};
use wayfarer_protocol::Command;
use wayfarer_protocol::types::{ChatDraft, SlotRef};
use wayfarer_state::ProjectionSet;
use wayfarer_transport::{Dialer, WebSocketDialer};

/// A live game session over one socket.
///
/// Must be created inside a Tokio runtime; the event pump is spawned at
/// construction and aborted on drop.
pub struct Session<D: Dialer> {
    credentials: CredentialStore,
    manager: ConnectionManager<D>,
    projections: Arc<ProjectionSet>,
    pump: JoinHandle<()>,
}

impl Session<WebSocketDialer> {
    /// A session over the real WebSocket transport.
    pub fn open(config: ClientConfig) -> Self {
        Self::with_dialer(Arc::new(WebSocketDialer), config)
    }
}

impl<D: Dialer> Session<D> {
    /// A session over any transport — tests inject the memory dialer here.
    pub fn with_dialer(dialer: Arc<D>, config: ClientConfig) -> Self {
        let credentials = CredentialStore::new();
        let manager =
            ConnectionManager::new(dialer, config, credentials.clone());
        let projections = Arc::new(ProjectionSet::new());

        let pump = tokio::spawn(pump(
            manager.subscribe(),
            Arc::clone(&projections),
        ));

        Self {
            credentials,
            manager,
            projections,
            pump,
        }
    }

    /// Opens (or re-opens after a terminal state) the socket with the given
    /// bearer token. Idempotent while a connect cycle is running.
    pub fn connect(&self, token: &str) {
        self.manager.connect(token);
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn projections(&self) -> &ProjectionSet {
        &self.projections
    }

    pub fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.manager.status()
    }

    pub fn is_connected(&self) -> bool {
        self.manager.is_connected()
    }

    /// A raw event subscription, for consumers that want the stream itself
    /// rather than projected state.
    pub fn subscribe(&self) -> EventStream {
        self.manager.subscribe()
    }

    /// The player's level, derived from the experience curve.
    pub async fn level(&self) -> u8 {
        let meta = self.projections.meta.read().await;
        self.projections
            .player
            .read()
            .await
            .level(meta.level_to_exp())
    }

    // -- Outbound commands -------------------------------------------------
    //
    // All fire-and-forget: dropped silently while disconnected, confirmed
    // only by the server's next authoritative frame.

    pub fn send_chat(&self, draft: ChatDraft) {
        self.manager.send(&Command::SendChatMessage(draft));
    }

    pub fn take_item(&self, slot: SlotRef) {
        self.manager.send(&Command::TakeItem(slot));
    }

    pub fn drop_item(&self, slot: SlotRef) {
        self.manager.send(&Command::DropItem(slot));
    }

    pub fn start_expedition(&self) {
        self.manager.send(&Command::StartExpedition);
    }

    /// Leaves the current expedition. Optimistic: the local timer and gain
    /// state is zeroed before the intent is sent; the server's confirming
    /// frame is a full replacement either way.
    pub async fn leave_expedition(&self) {
        self.projections.expedition.write().await.reset();
        self.manager.send(&Command::EndExpedition);
    }

    pub fn toggle_attack(&self) {
        self.manager.send(&Command::ToggleAttack);
    }

    pub fn toggle_loot(&self) {
        self.manager.send(&Command::ToggleLoot);
    }

    pub fn resurrect(&self) {
        self.manager.send(&Command::Resurrect);
    }
}

impl<D: Dialer> Drop for Session<D> {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Feeds every decoded envelope from the bus into the projection set.
async fn pump(mut events: EventStream, projections: Arc<ProjectionSet>) {
    while let Some(envelope) = events.next().await {
        projections.apply(&envelope, Instant::now()).await;
    }
    tracing::debug!("event pump stopped");
}

//! The connection manager: one authenticated, reconnecting socket per
//! session.
//!
//! Exactly one manager exists per session and it is the only owner of the
//! channel. Projections never open, close, or touch the socket — they
//! subscribe to the event bus and send commands through a
//! [`ConnectionHandle`].
//!
//! # Lifecycle
//!
//! ```text
//! connect(token)
//!      │
//!      ▼
//! [Connecting] ──ok──▶ [Connected] ──drop──▶ [Disconnected]
//!      │                    │                      │
//!      │fail                │error frame           ▼
//!      ▼                    ▼               [Reconnecting{n}] ──ok──▶ [Connected]
//! [Reconnecting{n}]    [LoggedOut]                 │
//!      │                (credential               n > 5
//!      │ n > 5           cleared)                  ▼
//!      ▼                                      [Exhausted]
//! [Exhausted]
//! ```
//!
//! Transport failures retry up to the configured bound with a fixed delay;
//! exhaustion is terminal and observable. A server `error` frame is
//! different in kind — it means the credential or session is invalid, not
//! that the network hiccuped — so it clears the stored credential and ends
//! the session without retrying.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use wayfarer_protocol::{Codec, Command, Envelope, GameEvent, JsonCodec};
use wayfarer_transport::{Connection, Dialer};

use crate::bus::EventStream;
use crate::config::ClientConfig;
use crate::credentials::CredentialStore;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Externally observable connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No connection and no attempt in flight.
    Disconnected,
    /// First dial of a session in flight.
    Connecting,
    /// Socket open; frames flow.
    Connected,
    /// Re-dial `attempt` of the bounded retry budget in flight.
    Reconnecting { attempt: u32 },
    /// Retry budget spent. Terminal: user action required.
    Exhausted,
    /// The server invalidated the session; the credential is gone.
    /// Terminal: re-authentication required.
    LoggedOut,
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    /// Terminal states end the session; only a fresh `connect` leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ConnectionStatus::Exhausted | ConnectionStatus::LoggedOut
        )
    }
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// State shared between the manager facade, its handles, and the driver task.
struct Shared<D: Dialer> {
    dialer: Arc<D>,
    config: ClientConfig,
    credentials: CredentialStore,
    codec: JsonCodec,
    status_tx: watch::Sender<ConnectionStatus>,
    events_tx: broadcast::Sender<Envelope>,
    /// True while a connect cycle (dialing, connected, or retrying) runs.
    /// Makes `connect` idempotent.
    active: AtomicBool,
}

/// Owns the single socket for an authenticated session.
///
/// Must be created inside a Tokio runtime — the driver task is spawned at
/// construction and aborted on drop.
pub struct ConnectionManager<D: Dialer> {
    shared: Arc<Shared<D>>,
    connect_tx: mpsc::UnboundedSender<String>,
    outbound_tx: mpsc::UnboundedSender<String>,
    status_rx: watch::Receiver<ConnectionStatus>,
    driver: JoinHandle<()>,
}

impl<D: Dialer> ConnectionManager<D> {
    pub fn new(dialer: Arc<D>, config: ClientConfig, credentials: CredentialStore) -> Self {
        let (status_tx, status_rx) = watch::channel(ConnectionStatus::Disconnected);
        let (events_tx, _) = broadcast::channel(config.event_buffer);
        let (connect_tx, connect_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        let shared = Arc::new(Shared {
            dialer,
            config,
            credentials,
            codec: JsonCodec,
            status_tx,
            events_tx,
            active: AtomicBool::new(false),
        });

        let driver = tokio::spawn(drive(Arc::clone(&shared), connect_rx, outbound_rx));

        Self {
            shared,
            connect_tx,
            outbound_tx,
            status_rx,
            driver,
        }
    }

    /// Starts a connect cycle with the given bearer token.
    ///
    /// Idempotent: while a cycle is already running (connected, dialing, or
    /// retrying) further calls are no-ops. After a terminal state the next
    /// call starts a fresh cycle — a new login, a new session.
    pub fn connect(&self, token: &str) {
        if self.shared.active.swap(true, Ordering::SeqCst) {
            tracing::debug!("connect ignored: a connect cycle is already running");
            return;
        }
        // Fails only if the driver is gone, i.e. the manager is mid-drop.
        let _ = self.connect_tx.send(token.to_string());
    }

    /// Fire-and-forget send. Dropped silently (with a trace log) when not
    /// connected — delivery is at most once and never acknowledged.
    pub fn send(&self, command: &Command) {
        send_command(
            &self.shared.codec,
            &self.status_rx,
            &self.outbound_tx,
            command,
        );
    }

    /// A cheap clonable handle for code that only needs `send`.
    pub fn handle(&self) -> ConnectionHandle {
        ConnectionHandle {
            codec: self.shared.codec,
            status_rx: self.status_rx.clone(),
            outbound_tx: self.outbound_tx.clone(),
        }
    }

    /// Subscribes to the decoded inbound event stream. Every subscriber
    /// sees every frame published after this call, in order.
    pub fn subscribe(&self) -> EventStream {
        EventStream::new(self.shared.events_tx.subscribe())
    }

    /// Watches the connection status.
    pub fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_rx.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.status_rx.borrow().is_connected()
    }
}

impl<D: Dialer> Drop for ConnectionManager<D> {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Send-only view of the connection, handed to command surfaces.
#[derive(Clone)]
pub struct ConnectionHandle {
    codec: JsonCodec,
    status_rx: watch::Receiver<ConnectionStatus>,
    outbound_tx: mpsc::UnboundedSender<String>,
}

impl ConnectionHandle {
    /// See [`ConnectionManager::send`].
    pub fn send(&self, command: &Command) {
        send_command(&self.codec, &self.status_rx, &self.outbound_tx, command);
    }

    pub fn is_connected(&self) -> bool {
        self.status_rx.borrow().is_connected()
    }

    pub fn status(&self) -> ConnectionStatus {
        *self.status_rx.borrow()
    }
}

fn send_command(
    codec: &JsonCodec,
    status_rx: &watch::Receiver<ConnectionStatus>,
    outbound_tx: &mpsc::UnboundedSender<String>,
    command: &Command,
) {
    if !status_rx.borrow().is_connected() {
        tracing::trace!("dropping outbound command while disconnected");
        return;
    }
    match codec.encode(command) {
        Ok(frame) => {
            let _ = outbound_tx.send(frame);
        }
        Err(e) => tracing::warn!(error = %e, "failed to encode outbound command"),
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Long-lived task owning the socket. One per manager; exits when the
/// manager is dropped.
async fn drive<D: Dialer>(
    shared: Arc<Shared<D>>,
    mut connect_rx: mpsc::UnboundedReceiver<String>,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
) {
    while let Some(token) = connect_rx.recv().await {
        shared.credentials.set(&token);
        run_connect_cycle(&shared, &mut outbound_rx).await;
        shared.active.store(false, Ordering::SeqCst);
    }
}

/// One connect cycle: dial, pump, retry within the budget, end terminal.
async fn run_connect_cycle<D: Dialer>(
    shared: &Shared<D>,
    outbound_rx: &mut mpsc::UnboundedReceiver<String>,
) {
    let mut attempt: u32 = 0;
    loop {
        // The credential can vanish mid-cycle (fatal frame on a previous
        // iteration, explicit logout elsewhere). Never dial without one.
        let Some(token) = shared.credentials.token() else {
            shared.status_tx.send_replace(ConnectionStatus::LoggedOut);
            return;
        };
        let url = format!("{}?token={}", shared.config.endpoint, token);

        shared.status_tx.send_replace(if attempt == 0 {
            ConnectionStatus::Connecting
        } else {
            ConnectionStatus::Reconnecting { attempt }
        });

        match shared.dialer.dial(&url).await {
            Ok(conn) => {
                tracing::info!(endpoint = %shared.config.endpoint, "connected");
                shared.status_tx.send_replace(ConnectionStatus::Connected);
                attempt = 0;

                let exit = pump(shared, &conn, outbound_rx).await;
                let _ = conn.close().await;

                match exit {
                    PumpExit::Fatal => {
                        tracing::warn!("server invalidated the session; forcing logout");
                        shared.credentials.clear();
                        shared.status_tx.send_replace(ConnectionStatus::LoggedOut);
                        return;
                    }
                    PumpExit::Dropped => {
                        tracing::warn!("connection dropped");
                        shared.status_tx.send_replace(ConnectionStatus::Disconnected);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, attempt, "connect attempt failed");
            }
        }

        attempt += 1;
        if attempt > shared.config.max_reconnect_attempts {
            tracing::error!(
                attempts = shared.config.max_reconnect_attempts,
                "reconnect attempts exhausted"
            );
            shared.status_tx.send_replace(ConnectionStatus::Exhausted);
            return;
        }
        tokio::time::sleep(shared.config.reconnect_delay).await;
    }
}

enum PumpExit {
    /// Server `error` frame: non-retryable, session is over.
    Fatal,
    /// Transport-level drop: retry within the budget.
    Dropped,
}

/// Pumps frames both ways until the connection ends one way or the other.
///
/// Each inbound frame is decoded exactly once and broadcast typed; a frame
/// that fails to decode is dropped and logged, and the stream continues —
/// one bad frame must never take the session down.
async fn pump<D: Dialer>(
    shared: &Shared<D>,
    conn: &D::Conn,
    outbound_rx: &mut mpsc::UnboundedReceiver<String>,
) -> PumpExit {
    loop {
        tokio::select! {
            inbound = conn.recv() => match inbound {
                Ok(Some(text)) => {
                    match shared.codec.decode::<Envelope>(&text) {
                        Ok(envelope) => {
                            let fatal = match &envelope.event {
                                GameEvent::Error(err) => {
                                    tracing::warn!(
                                        code = ?err.code,
                                        message = %err.message,
                                        "server error frame"
                                    );
                                    true
                                }
                                _ => false,
                            };
                            // Err here only means nobody is subscribed yet.
                            let _ = shared.events_tx.send(envelope);
                            if fatal {
                                return PumpExit::Fatal;
                            }
                        }
                        Err(e) => {
                            tracing::debug!(error = %e, "dropping undecodable frame");
                        }
                    }
                }
                Ok(None) => return PumpExit::Dropped,
                Err(e) => {
                    tracing::debug!(error = %e, "receive failed");
                    return PumpExit::Dropped;
                }
            },
            outbound = outbound_rx.recv() => match outbound {
                Some(frame) => {
                    if let Err(e) = conn.send(&frame).await {
                        tracing::debug!(error = %e, "send failed");
                        return PumpExit::Dropped;
                    }
                }
                // All senders gone: the manager is mid-drop.
                None => return PumpExit::Dropped,
            },
        }
    }
}

//! In-process transport backed by channel pairs.
//!
//! [`memory_pair`] wires two [`MemoryConnection`]s back to back: whatever
//! one side sends, the other receives. [`MemoryDialer`] hands out scripted
//! connections in order and fails once the script runs dry, which is how
//! the client tests simulate transport failures and bounded reconnects
//! without touching a socket.

use std::collections::VecDeque;

use tokio::sync::{Mutex, mpsc};

use crate::{Connection, Dialer, TransportError};

/// One end of an in-memory duplex channel.
pub struct MemoryConnection {
    tx: Mutex<Option<mpsc::UnboundedSender<String>>>,
    rx: Mutex<mpsc::UnboundedReceiver<String>>,
}

/// Creates two connected [`MemoryConnection`] halves.
pub fn memory_pair() -> (MemoryConnection, MemoryConnection) {
    let (a_tx, b_rx) = mpsc::unbounded_channel();
    let (b_tx, a_rx) = mpsc::unbounded_channel();
    (
        MemoryConnection {
            tx: Mutex::new(Some(a_tx)),
            rx: Mutex::new(a_rx),
        },
        MemoryConnection {
            tx: Mutex::new(Some(b_tx)),
            rx: Mutex::new(b_rx),
        },
    )
}

impl Connection for MemoryConnection {
    async fn send(&self, text: &str) -> Result<(), TransportError> {
        match self.tx.lock().await.as_ref() {
            Some(tx) => tx
                .send(text.to_string())
                .map_err(|_| TransportError::Closed),
            None => Err(TransportError::Closed),
        }
    }

    async fn recv(&self) -> Result<Option<String>, TransportError> {
        // `None` from the channel means the peer dropped or closed —
        // the memory transport's version of a clean close.
        Ok(self.rx.lock().await.recv().await)
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.tx.lock().await.take();
        Ok(())
    }
}

/// A [`Dialer`] that replays a script of pre-built connections.
///
/// Each [`dial`](Dialer::dial) pops the next scripted connection; an empty
/// script fails the attempt. Dialed URLs are recorded so tests can assert
/// on the credential query parameter.
#[derive(Default)]
pub struct MemoryDialer {
    script: Mutex<VecDeque<MemoryConnection>>,
    dialed: Mutex<Vec<String>>,
}

impl MemoryDialer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a connection to hand out on the next dial.
    pub async fn enqueue(&self, conn: MemoryConnection) {
        self.script.lock().await.push_back(conn);
    }

    /// Every URL dialed so far, in order.
    pub async fn dialed(&self) -> Vec<String> {
        self.dialed.lock().await.clone()
    }

    /// How many dial attempts have been made.
    pub async fn dial_count(&self) -> usize {
        self.dialed.lock().await.len()
    }
}

impl Dialer for MemoryDialer {
    type Conn = MemoryConnection;

    async fn dial(&self, url: &str) -> Result<MemoryConnection, TransportError> {
        self.dialed.lock().await.push(url.to_string());
        self.script
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| TransportError::ConnectFailed("no scripted connection".into()))
    }
}

// =========================================================================
// Tests
// =========================================================================

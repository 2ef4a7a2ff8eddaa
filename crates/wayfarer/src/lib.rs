//! # Wayfarer
//!
//! Client-side real-time state synchronization for a multiplayer
//! expedition game. One authenticated WebSocket carries a tagged event
//! stream; a set of projections keep typed, always-current slices of game
//! state for the presentation layer; outbound commands ride the same
//! socket back.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use wayfarer::{AuthClient, AuthPayload, ClientConfig, Session};
//!
//! # async fn run() -> Result<(), wayfarer::ClientError> {
//! let auth = AuthClient::new("https://play.example.com");
//! let token = auth
//!     .login(&AuthPayload {
//!         email: "b@example.com".into(),
//!         username: "brynja".into(),
//!         password: "hunter2".into(),
//!     })
//!     .await?;
//!
//! let session = Session::open(ClientConfig::new("ws://play.example.com/ws"));
//! session.connect(&token);
//!
//! // Read projected state; send fire-and-forget commands.
//! let level = session.level().await;
//! session.start_expedition();
//! # let _ = level;
//! # Ok(())
//! # }
//! ```

mod session;

pub use session::Session;
pub use wayfarer_client::{
    AuthClient, AuthPayload, ClientConfig, ClientError, ConnectionHandle,
    ConnectionManager, ConnectionStatus, CredentialStore, EventStream,
};
pub use wayfarer_protocol::{Codec, Command, Envelope, GameEvent, JsonCodec, ProtocolError, types};
pub use wayfarer_state::{
    ApplyCtx, AttributesProjection, ChatProjection, CombatProjection,
    ExpeditionProjection, JournalProjection, MetaProjection, PlayerProjection,
    Projection, ProjectionSet, ResourcesProjection, SlotsProjection,
    StatsProjection,
};
pub use wayfarer_transport::{
    Connection, Dialer, MemoryConnection, MemoryDialer, TransportError,
    WebSocketConnection, WebSocketDialer, memory_pair,
};

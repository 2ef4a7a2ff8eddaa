//! Chat log projection.

use wayfarer_protocol::GameEvent;
use wayfarer_protocol::types::ChatMessage;

use crate::{ApplyCtx, Projection};

/// Append-only chat log in arrival order.
///
/// Unbounded by design: the log lives for one session and chat volume is
/// tiny next to the rest of the stream. Outbound messages are not echoed
/// locally — a sent message shows up when the server broadcasts it back.
#[derive(Debug, Default)]
pub struct ChatProjection {
    messages: Vec<ChatMessage>,
}

impl ChatProjection {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Projection for ChatProjection {
    fn apply(&mut self, event: &GameEvent, _ctx: &ApplyCtx) {
        if let GameEvent::ChatMessage(message) = event {
            self.messages.push(message.clone());
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use chrono::Utc;
    use uuid::Uuid;
    use wayfarer_protocol::types::{ChatKind, PlayerState};

    use super::*;

    fn msg(content: &str) -> ChatMessage {
        ChatMessage {
            id: Uuid::new_v4(),
            sender: "brynja".into(),
            recipient: None,
            kind: ChatKind::General,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    fn ctx() -> ApplyCtx {
        ApplyCtx::at(Instant::now())
    }

    #[test]
    fn test_apply_appends_in_arrival_order() {
        let mut chat = ChatProjection::default();
        chat.apply(&GameEvent::ChatMessage(msg("first")), &ctx());
        chat.apply(&GameEvent::ChatMessage(msg("second")), &ctx());

        let contents: Vec<&str> =
            chat.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_apply_never_replaces_or_dedupes() {
        // Two players can say the same thing; both lines stay.
        let mut chat = ChatProjection::default();
        let repeated = msg("gg");
        chat.apply(&GameEvent::ChatMessage(repeated.clone()), &ctx());
        chat.apply(&GameEvent::ChatMessage(repeated), &ctx());
        assert_eq!(chat.len(), 2);
    }

    #[test]
    fn test_apply_ignores_other_tags() {
        let mut chat = ChatProjection::default();
        chat.apply(&GameEvent::PlayerState(PlayerState::default()), &ctx());
        chat.apply(&GameEvent::GainedCin(5), &ctx());
        assert!(chat.is_empty());
    }
}

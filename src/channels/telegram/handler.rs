//! Telegram Update Classification
//!
//! Turns raw Telegram updates into [`InboundEvent`]s. Anything the bot has no
//! handler for (edited messages, photos, callback queries, ...) is dropped.

use crate::bot::{EventKind, InboundEvent};
use teloxide::types::{Message, Update, UpdateKind};

/// Classify an update; `None` if the bot does not react to it.
pub fn event_from_update(update: Update) -> Option<InboundEvent> {
    match update.kind {
        UpdateKind::Message(msg) => event_from_message(&msg),
        _ => {
            tracing::debug!("Telegram: ignoring non-message update {}", update.id.0);
            None
        }
    }
}

/// Classify a message; `None` for senderless or unsupported messages.
pub fn event_from_message(msg: &Message) -> Option<InboundEvent> {
    let Some(user) = msg.from.as_ref() else {
        tracing::debug!("Telegram: ignoring message without sender in chat {}", msg.chat.id.0);
        return None;
    };

    let kind = if let Some(text) = msg.text() {
        EventKind::from_text(text)
    } else if msg.voice().is_some() {
        EventKind::Voice
    } else if msg.video_note().is_some() {
        EventKind::VideoNote
    } else if msg.contact().is_some() {
        EventKind::Contact
    } else {
        tracing::debug!("Telegram: ignoring unsupported message from user {}", user.id.0);
        return None;
    };

    Some(InboundEvent {
        user_id: user.id.0 as i64,
        chat_id: msg.chat.id.0,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::Command;
    use serde_json::json;

    fn update_with(message_fields: serde_json::Value) -> Update {
        let mut message = json!({
            "message_id": 10,
            "date": 1_700_000_000,
            "chat": {"id": 555, "type": "private", "first_name": "Sara"},
            "from": {"id": 777, "is_bot": false, "first_name": "Sara"}
        });
        if let (Some(base), Some(extra)) = (message.as_object_mut(), message_fields.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        let raw = json!({"update_id": 1, "message": message}).to_string();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_text_update() {
        let event = event_from_update(update_with(json!({"text": "مرحبا"}))).unwrap();
        assert_eq!(event.user_id, 777);
        assert_eq!(event.chat_id, 555);
        assert_eq!(event.kind, EventKind::Text("مرحبا".to_string()));
    }

    #[test]
    fn test_command_update() {
        let event = event_from_update(update_with(json!({"text": "/payment 80"}))).unwrap();
        assert_eq!(
            event.kind,
            EventKind::Command(Command::Payment {
                args: vec!["80".to_string()]
            })
        );
    }

    #[test]
    fn test_voice_update() {
        let update = update_with(json!({
            "voice": {
                "file_id": "v1",
                "file_unique_id": "u1",
                "duration": 3,
                "mime_type": "audio/ogg",
                "file_size": 4096
            }
        }));
        assert_eq!(event_from_update(update).unwrap().kind, EventKind::Voice);
    }

    #[test]
    fn test_video_note_update() {
        let update = update_with(json!({
            "video_note": {
                "file_id": "v2",
                "file_unique_id": "u2",
                "length": 240,
                "duration": 5,
                "file_size": 81920
            }
        }));
        assert_eq!(event_from_update(update).unwrap().kind, EventKind::VideoNote);
    }

    #[test]
    fn test_contact_update() {
        let update = update_with(json!({
            "contact": {
                "phone_number": "+966500000000",
                "first_name": "Omar",
                "last_name": "Haddad",
                "user_id": 888
            }
        }));
        assert_eq!(event_from_update(update).unwrap().kind, EventKind::Contact);
    }

    #[test]
    fn test_location_update_is_ignored() {
        let update = update_with(json!({
            "location": {"latitude": 24.7, "longitude": 46.7}
        }));
        assert!(event_from_update(update).is_none());
    }
}

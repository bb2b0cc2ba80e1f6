//! WhatsApp webhook payload types (Evolution API)

use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Raw webhook payload as delivered by the Evolution API.
///
/// The gateway's payload shape varies by event type, so everything under
/// `data` stays untyped and the fields we care about are pulled out in
/// [`WebhookPayload::message`].
#[derive(Debug, Deserialize, ToSchema)]
pub struct WebhookPayload {
    #[schema(value_type = Object)]
    pub data: Value,
}

/// The parts of an inbound message the bot acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Gateway message id, used to drop redelivered webhooks
    pub id: String,
    /// Gateway timestamp (epoch seconds)
    pub timestamp: i64,
    /// Message text as typed by the client
    pub text: String,
    /// Sender phone number (digits only, no @-suffix)
    pub sender: String,
    /// Sender display name
    pub push_name: String,
}

impl WebhookPayload {
    /// Extract the inbound message, if this payload carries one.
    ///
    /// Messages sent by the shop's own number (`fromMe`) are ignored, as are
    /// payloads without a message id and timestamp (status events). Text
    /// comes from `conversation`, falling back to `extendedTextMessage.text`
    /// for quoted and long-form replies.
    pub fn message(&self) -> Option<IncomingMessage> {
        let key = self.data.get("key")?;
        if key.get("fromMe").and_then(Value::as_bool).unwrap_or(false) {
            return None;
        }

        let remote_jid = key.get("remoteJid")?.as_str()?;
        let sender = remote_jid.split('@').next()?.to_string();
        let id = key.get("id")?.as_str()?.to_string();
        let timestamp = self.data.get("messageTimestamp")?.as_i64()?;

        let message = self.data.get("message")?;
        let text = message
            .get("conversation")
            .and_then(Value::as_str)
            .or_else(|| {
                message
                    .get("extendedTextMessage")
                    .and_then(|m| m.get("text"))
                    .and_then(Value::as_str)
            })?
            .trim()
            .to_string();

        let push_name = self
            .data
            .get("pushName")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        Some(IncomingMessage {
            id,
            timestamp,
            text,
            sender,
            push_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_message() {
        let payload = WebhookPayload {
            data: json!({
                "key": {"remoteJid": "5561999990000@s.whatsapp.net", "fromMe": false, "id": "ABC123"},
                "messageTimestamp": 1751980000,
                "pushName": "Ana",
                "message": {"conversation": " 1 "}
            }),
        };
        let msg = payload.message().unwrap();
        assert_eq!(msg.sender, "5561999990000");
        assert_eq!(msg.text, "1");
        assert_eq!(msg.push_name, "Ana");
        assert_eq!(msg.id, "ABC123");
        assert_eq!(msg.timestamp, 1751980000);
    }

    #[test]
    fn test_extended_text_fallback() {
        let payload = WebhookPayload {
            data: json!({
                "key": {"remoteJid": "5561999990000@s.whatsapp.net", "id": "DEF456"},
                "messageTimestamp": 1751980001,
                "message": {"extendedTextMessage": {"text": "2"}}
            }),
        };
        let msg = payload.message().unwrap();
        assert_eq!(msg.text, "2");
    }

    #[test]
    fn test_ignores_own_messages() {
        let payload = WebhookPayload {
            data: json!({
                "key": {"remoteJid": "5561999990000@s.whatsapp.net", "fromMe": true, "id": "GHI789"},
                "messageTimestamp": 1751980002,
                "message": {"conversation": "hi"}
            }),
        };
        assert!(payload.message().is_none());
    }

    #[test]
    fn test_missing_text() {
        let payload = WebhookPayload {
            data: json!({
                "key": {"remoteJid": "5561999990000@s.whatsapp.net", "id": "JKL012"},
                "messageTimestamp": 1751980003,
                "message": {"imageMessage": {}}
            }),
        };
        assert!(payload.message().is_none());
    }

    #[test]
    fn test_missing_id_or_timestamp() {
        let payload = WebhookPayload {
            data: json!({
                "key": {"remoteJid": "5561999990000@s.whatsapp.net"},
                "message": {"conversation": "1"}
            }),
        };
        assert!(payload.message().is_none());
    }
}

//! Decoded-message envelope and the two marshalling directions across the
//! host boundary.
//!
//! Inbound: (identity, raw payload bytes) from the messaging layer → typed
//! content → canonical JSON tree → envelope the host UI renders. Outbound:
//! a content tree authored by the host → typed content → raw payload bytes
//! stamped with the identity the messaging layer should send under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use pl_content::{wire, CodecRegistry, Content, ContentTypeId};

use crate::error::BridgeError;

/// Inbound message as handed over by the messaging layer.
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub id: String,
    pub topic: String,
    pub content_type: ContentTypeId,
    pub payload: Vec<u8>,
    pub sender_address: String,
    pub sent: DateTime<Utc>,
}

/// What the host collaborator receives: envelope fields plus the content
/// as a canonical JSON tree. `sent` crosses the wire as epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedMessage {
    pub id: String,
    pub topic: String,
    /// Canonical `"authorityId:typeId"` string.
    pub content_type_id: String,
    pub content: Value,
    pub sender_address: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub sent: DateTime<Utc>,
}

impl DecodedMessage {
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Inbound path: resolve the codec, decode the payload, marshal to a tree.
///
/// An unrecognised content type is not a failure — the message degrades to
/// an `unknown` placeholder so one unrecognised payload cannot break a
/// conversation feed. Everything else propagates as an error.
pub fn decode_message(
    registry: &CodecRegistry,
    raw: RawMessage,
) -> Result<DecodedMessage, BridgeError> {
    let content = registry.decode(&raw.content_type, &raw.payload)?;
    if let Content::Unknown(id) = &content {
        warn!(content_type = %id, message_id = %raw.id, "no codec registered, rendering placeholder");
    }
    let tree = wire::to_value(&content)?;
    debug!(message_id = %raw.id, content_type = %raw.content_type, "decoded message content");
    Ok(DecodedMessage {
        id: raw.id,
        topic: raw.topic,
        content_type_id: raw.content_type.to_string(),
        content: tree,
        sender_address: raw.sender_address,
        sent: raw.sent,
    })
}

/// Outbound path: host-authored content tree (as a JSON string) → typed
/// content → raw payload bytes plus the identity to send them under.
///
/// Unlike the inbound path, malformed input here is rejected outright; the
/// caller authored it and should hear about the mistake.
pub fn encode_content(
    registry: &CodecRegistry,
    content_json: &str,
) -> Result<(ContentTypeId, Vec<u8>), BridgeError> {
    let tree: Value = serde_json::from_str(content_json)?;
    let content = wire::from_value(&tree)?;
    let bytes = registry.encode(&content)?;
    Ok((content.content_type(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pl_content::ContentError;
    use serde_json::json;

    fn raw(content_type: ContentTypeId, payload: &[u8]) -> RawMessage {
        RawMessage {
            id: "msg-1".into(),
            topic: "topic/a".into(),
            content_type,
            payload: payload.to_vec(),
            sender_address: "0xsender".into(),
            sent: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        }
    }

    #[test]
    fn inbound_text_message_envelope() {
        let registry = CodecRegistry::with_defaults();
        let msg = decode_message(&registry, raw(ContentTypeId::text(), b"hello")).unwrap();
        assert_eq!(msg.content_type_id, "parley.chat:text");
        assert_eq!(msg.content, json!({"text": "hello"}));

        let v: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(v["senderAddress"], "0xsender");
        assert_eq!(v["contentTypeId"], "parley.chat:text");
        // Epoch milliseconds as a JSON integer, not a string.
        assert_eq!(v["sent"], 1_700_000_000_123i64);
    }

    #[test]
    fn inbound_unknown_type_degrades_to_placeholder() {
        let registry = CodecRegistry::with_defaults();
        let id = ContentTypeId::new("example.org", "poll");
        let msg = decode_message(&registry, raw(id, b"\x00\x01\x02")).unwrap();
        assert_eq!(
            msg.content,
            json!({"unknown": {"contentTypeId": "example.org:poll"}})
        );
    }

    #[test]
    fn envelope_json_roundtrip() {
        let registry = CodecRegistry::with_defaults();
        let msg = decode_message(&registry, raw(ContentTypeId::text(), b"hi")).unwrap();
        let back = DecodedMessage::from_json(&msg.to_json().unwrap()).unwrap();
        assert_eq!(back.sent, msg.sent);
        assert_eq!(back.content, msg.content);
    }

    #[test]
    fn outbound_reply_roundtrips_through_registry() {
        let registry = CodecRegistry::with_defaults();
        let tree = r#"{"reply": {"reference": "abc123", "content": {"text": "hi"}}}"#;
        let (id, bytes) = encode_content(&registry, tree).unwrap();
        assert_eq!(id, ContentTypeId::reply());

        let content = registry.decode(&id, &bytes).unwrap();
        match content {
            Content::Reply(r) => {
                assert_eq!(r.reference, "abc123");
                assert_eq!(*r.content, Content::Text("hi".into()));
            }
            other => panic!("expected reply, got {other:?}"),
        }
    }

    #[test]
    fn outbound_rejects_unrecognised_tree() {
        let registry = CodecRegistry::with_defaults();
        let err = encode_content(&registry, r#"{"poll": {"question": "?"}}"#).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Content(ContentError::UnknownContentType)
        ));
    }

    #[test]
    fn outbound_rejects_invalid_json_text() {
        let registry = CodecRegistry::with_defaults();
        assert!(matches!(
            encode_content(&registry, "not json").unwrap_err(),
            BridgeError::Json(_)
        ));
    }
}

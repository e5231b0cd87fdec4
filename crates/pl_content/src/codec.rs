//! Per-type encoder/decoder bindings.
//!
//! A codec owns the raw byte format for one content type: UTF-8 for plain
//! text, JSON of the type's inner wire object for everything structured.
//! The identity a codec answers to is the same one the messaging layer
//! stamps on outbound payloads.

use serde_json::Value;

use crate::content::Content;
use crate::content_type::ContentTypeId;
use crate::error::ContentError;
use crate::wire;

/// One encode/decode binding, dispatched by content type identity.
pub trait ContentCodec: Send + Sync {
    /// The identity this codec is registered under.
    fn content_type(&self) -> ContentTypeId;

    /// Typed content → raw payload bytes for the messaging layer.
    fn encode(&self, content: &Content) -> Result<Vec<u8>, ContentError>;

    /// Raw payload bytes → typed content.
    fn decode(&self, bytes: &[u8]) -> Result<Content, ContentError>;
}

fn wrong_variant(codec: &dyn ContentCodec, content: &Content) -> ContentError {
    ContentError::Encode(format!(
        "codec for {} cannot encode {}",
        codec.content_type(),
        content.content_type()
    ))
}

fn payload_value(bytes: &[u8]) -> Result<Value, ContentError> {
    serde_json::from_slice(bytes).map_err(|e| ContentError::Decode(format!("payload JSON: {e}")))
}

fn payload_bytes(value: &Value) -> Result<Vec<u8>, ContentError> {
    serde_json::to_vec(value).map_err(|e| ContentError::Encode(e.to_string()))
}

/// Plain text; the payload is the UTF-8 body with no framing.
pub struct TextCodec;

impl ContentCodec for TextCodec {
    fn content_type(&self) -> ContentTypeId {
        ContentTypeId::text()
    }

    fn encode(&self, content: &Content) -> Result<Vec<u8>, ContentError> {
        match content {
            Content::Text(body) => Ok(body.as_bytes().to_vec()),
            other => Err(wrong_variant(self, other)),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Content, ContentError> {
        let body = String::from_utf8(bytes.to_vec())
            .map_err(|e| ContentError::Decode(format!("text payload is not UTF-8: {e}")))?;
        Ok(Content::Text(body))
    }
}

pub struct ReactionCodec;

impl ContentCodec for ReactionCodec {
    fn content_type(&self) -> ContentTypeId {
        ContentTypeId::reaction()
    }

    fn encode(&self, content: &Content) -> Result<Vec<u8>, ContentError> {
        match content {
            Content::Reaction(r) => payload_bytes(&wire::reaction_value(r)),
            other => Err(wrong_variant(self, other)),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Content, ContentError> {
        Ok(Content::Reaction(wire::reaction_from_value(&payload_value(bytes)?)))
    }
}

pub struct AttachmentCodec;

impl ContentCodec for AttachmentCodec {
    fn content_type(&self) -> ContentTypeId {
        ContentTypeId::attachment()
    }

    fn encode(&self, content: &Content) -> Result<Vec<u8>, ContentError> {
        match content {
            Content::Attachment(a) => payload_bytes(&wire::attachment_value(a)),
            other => Err(wrong_variant(self, other)),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Content, ContentError> {
        Ok(Content::Attachment(wire::attachment_from_value(&payload_value(bytes)?)?))
    }
}

/// Reply payloads carry their nested content as a full canonical tree, so a
/// reply round-trips any content kind the wire format can express.
pub struct ReplyCodec;

impl ContentCodec for ReplyCodec {
    fn content_type(&self) -> ContentTypeId {
        ContentTypeId::reply()
    }

    fn encode(&self, content: &Content) -> Result<Vec<u8>, ContentError> {
        match content {
            Content::Reply(r) => payload_bytes(&wire::reply_value(r, 0)?),
            other => Err(wrong_variant(self, other)),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Content, ContentError> {
        Ok(Content::Reply(wire::reply_from_value(&payload_value(bytes)?, 0)?))
    }
}

pub struct RemoteAttachmentCodec;

impl ContentCodec for RemoteAttachmentCodec {
    fn content_type(&self) -> ContentTypeId {
        ContentTypeId::remote_attachment()
    }

    fn encode(&self, content: &Content) -> Result<Vec<u8>, ContentError> {
        match content {
            Content::RemoteAttachment(r) => payload_bytes(&wire::remote_attachment_value(r)),
            other => Err(wrong_variant(self, other)),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Content, ContentError> {
        Ok(Content::RemoteAttachment(wire::remote_attachment_from_value(
            &payload_value(bytes)?,
        )?))
    }
}

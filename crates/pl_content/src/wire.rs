//! Wire marshalling — typed [`Content`] to and from the canonical JSON tree.
//!
//! The tree is the bit-exact interop contract: one top-level key per content
//! kind, camelCase field names, base64 for inline attachment bytes, lowercase
//! hex for remote-attachment key material, and `contentLength` as a decimal
//! *string* (large values must not pass through a JSON number).
//!
//! Decoding dispatches on which top-level key is present, in a fixed priority
//! order; missing sub-fields default per variant in exactly one place each.
//! The asymmetry with codec-level byte decode is intentional: bytes from the
//! messaging layer degrade to `Unknown` when the identity is unrecognised,
//! but a JSON tree authored by a caller with no recognised key is rejected.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{json, Map, Value};

use crate::content::{
    Attachment, Content, ContentScheme, Reaction, ReactionAction, ReactionSchema,
    RemoteAttachment, Reply,
};
use crate::error::ContentError;

/// Maximum reply-in-reply nesting accepted on either direction.
pub const MAX_REPLY_DEPTH: usize = 32;

/// Convert typed content into the canonical JSON tree.
pub fn to_value(content: &Content) -> Result<Value, ContentError> {
    value_at_depth(content, 0)
}

/// Parse a canonical JSON tree back into typed content.
pub fn from_value(value: &Value) -> Result<Content, ContentError> {
    content_at_depth(value, 0)
}

fn value_at_depth(content: &Content, depth: usize) -> Result<Value, ContentError> {
    let value = match content {
        Content::Text(body) => json!({ "text": body }),
        Content::Reaction(r) => json!({ "reaction": reaction_value(r) }),
        Content::Reply(r) => json!({ "reply": reply_value(r, depth)? }),
        Content::Attachment(a) => json!({ "attachment": attachment_value(a) }),
        Content::RemoteAttachment(r) => json!({ "remoteAttachment": remote_attachment_value(r) }),
        Content::Unknown(id) => json!({ "unknown": { "contentTypeId": id.to_string() } }),
    };
    Ok(value)
}

fn content_at_depth(value: &Value, depth: usize) -> Result<Content, ContentError> {
    let obj = value.as_object().ok_or(ContentError::UnknownContentType)?;

    // Fixed priority order; first recognised key wins.
    if let Some(v) = obj.get("text") {
        return Ok(Content::Text(v.as_str().unwrap_or_default().to_owned()));
    }
    if let Some(v) = obj.get("reaction") {
        return Ok(Content::Reaction(reaction_from_value(v)));
    }
    if let Some(v) = obj.get("reply") {
        return Ok(Content::Reply(reply_from_value(v, depth)?));
    }
    if let Some(v) = obj.get("attachment") {
        return Ok(Content::Attachment(attachment_from_value(v)?));
    }
    if let Some(v) = obj.get("remoteAttachment") {
        return Ok(Content::RemoteAttachment(remote_attachment_from_value(v)?));
    }
    Err(ContentError::UnknownContentType)
}

// ── Reaction ─────────────────────────────────────────────────────────────────

pub(crate) fn reaction_value(r: &Reaction) -> Value {
    json!({
        "reference": r.reference,
        "action": match r.action {
            ReactionAction::Added => "added",
            ReactionAction::Removed => "removed",
        },
        "schema": match r.schema {
            ReactionSchema::Unicode => "unicode",
            ReactionSchema::Shortcode => "shortcode",
            ReactionSchema::Custom => "custom",
        },
        "content": r.content,
    })
}

/// Permissive: every missing or mistyped field falls back to its default.
pub(crate) fn reaction_from_value(value: &Value) -> Reaction {
    let obj = value.as_object();
    Reaction {
        reference: str_field(obj, "reference"),
        action: match str_field(obj, "action").as_str() {
            "removed" => ReactionAction::Removed,
            _ => ReactionAction::Added,
        },
        content: str_field(obj, "content"),
        schema: match str_field(obj, "schema").as_str() {
            "shortcode" => ReactionSchema::Shortcode,
            "custom" => ReactionSchema::Custom,
            _ => ReactionSchema::Unicode,
        },
    }
}

// ── Reply ────────────────────────────────────────────────────────────────────

pub(crate) fn reply_value(r: &Reply, depth: usize) -> Result<Value, ContentError> {
    if depth >= MAX_REPLY_DEPTH {
        return Err(ContentError::BadReplyContent(format!(
            "nesting deeper than {MAX_REPLY_DEPTH} levels"
        )));
    }
    if r.content_type != r.content.content_type() {
        return Err(ContentError::BadReplyContent(format!(
            "declared content type {} does not match nested content {}",
            r.content_type,
            r.content.content_type()
        )));
    }
    Ok(json!({
        "reference": r.reference,
        "content": value_at_depth(&r.content, depth + 1)?,
    }))
}

pub(crate) fn reply_from_value(value: &Value, depth: usize) -> Result<Reply, ContentError> {
    if depth >= MAX_REPLY_DEPTH {
        return Err(ContentError::BadReplyContent(format!(
            "nesting deeper than {MAX_REPLY_DEPTH} levels"
        )));
    }
    let obj = value.as_object();
    let nested = obj
        .and_then(|o| o.get("content"))
        .ok_or_else(|| ContentError::BadReplyContent("no nested content".into()))?;
    // A reply is not salvageable without its nested content.
    let content = content_at_depth(nested, depth + 1)
        .map_err(|e| ContentError::BadReplyContent(e.to_string()))?;
    Ok(Reply::new(str_field(obj, "reference"), content))
}

// ── Attachment ───────────────────────────────────────────────────────────────

pub(crate) fn attachment_value(a: &Attachment) -> Value {
    json!({
        "filename": a.filename,
        "mimeType": a.mime_type,
        "data": BASE64.encode(&a.data),
    })
}

pub(crate) fn attachment_from_value(value: &Value) -> Result<Attachment, ContentError> {
    let obj = value.as_object();
    let data = BASE64
        .decode(str_field(obj, "data"))
        .map_err(|e| ContentError::BadAttachmentData(e.to_string()))?;
    Ok(Attachment {
        filename: str_field(obj, "filename"),
        mime_type: str_field(obj, "mimeType"),
        data,
    })
}

// ── RemoteAttachment ─────────────────────────────────────────────────────────

pub(crate) fn remote_attachment_value(r: &RemoteAttachment) -> Value {
    json!({
        "filename": r.filename(),
        "secret": hex::encode(&r.secret),
        "salt": hex::encode(&r.salt),
        "nonce": hex::encode(&r.nonce),
        "contentDigest": r.content_digest,
        "contentLength": r.content_length().to_string(),
        "scheme": r.scheme.as_str(),
        "url": r.url,
    })
}

pub(crate) fn remote_attachment_from_value(
    value: &Value,
) -> Result<RemoteAttachment, ContentError> {
    let obj = value.as_object();
    Ok(RemoteAttachment {
        url: str_field(obj, "url"),
        content_digest: str_field(obj, "contentDigest"),
        secret: hex_field(obj, "secret")?,
        salt: hex_field(obj, "salt")?,
        nonce: hex_field(obj, "nonce")?,
        scheme: ContentScheme::Https,
        filename: opt_str_field(obj, "filename"),
        content_length: opt_len_field(obj, "contentLength"),
    })
}

// ── Field helpers ────────────────────────────────────────────────────────────

pub(crate) fn str_field(obj: Option<&Map<String, Value>>, key: &str) -> String {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Empty string means absent (`""` is the wire sentinel for no filename).
pub(crate) fn opt_str_field(obj: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    Some(str_field(obj, key)).filter(|s| !s.is_empty())
}

/// Decimal-string length; `"0"`, a non-numeric string, or a missing field
/// all mean absent rather than failing the decode.
pub(crate) fn opt_len_field(obj: Option<&Map<String, Value>>, key: &str) -> Option<u64> {
    str_field(obj, key).parse::<u64>().ok().filter(|n| *n > 0)
}

pub(crate) fn hex_field(obj: Option<&Map<String, Value>>, key: &str) -> Result<Vec<u8>, ContentError> {
    hex::decode(str_field(obj, key))
        .map_err(|e| ContentError::BadRemoteAttachmentMetadata(format!("{key}: {e}")))
}

//! Typed message content — the closed set of payload shapes.
//!
//! Every variant the codecs understand is a case of [`Content`]; the
//! compiler enforces that encode and decode handle each one. [`Content::Unknown`]
//! exists only for genuinely unrecognised *external* identities (no registered
//! codec) and carries nothing but the identity, so downstream UIs can render
//! a placeholder instead of dropping the message.

use serde::{Deserialize, Serialize};

use crate::content_type::ContentTypeId;

/// A decoded message payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Reaction(Reaction),
    Reply(Reply),
    Attachment(Attachment),
    RemoteAttachment(RemoteAttachment),
    /// No codec registered for this identity; payload is not preserved.
    Unknown(ContentTypeId),
}

impl Content {
    /// The identity this payload dispatches under.
    pub fn content_type(&self) -> ContentTypeId {
        match self {
            Content::Text(_) => ContentTypeId::text(),
            Content::Reaction(_) => ContentTypeId::reaction(),
            Content::Reply(_) => ContentTypeId::reply(),
            Content::Attachment(_) => ContentTypeId::attachment(),
            Content::RemoteAttachment(_) => ContentTypeId::remote_attachment(),
            Content::Unknown(id) => id.clone(),
        }
    }
}

/// Reaction to another message (emoji, shortcode, or custom token).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    /// ID of the message being reacted to.
    pub reference: String,
    #[serde(default)]
    pub action: ReactionAction,
    /// The reaction body itself (e.g. "👍" or ":thumbsup:").
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub schema: ReactionSchema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionAction {
    #[default]
    Added,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionSchema {
    #[default]
    Unicode,
    Shortcode,
    Custom,
}

/// Threaded reply wrapping another content payload.
///
/// Invariant: `content_type` equals the nested content's own identity.
/// [`Reply::new`] derives it; tree decoding re-derives it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// ID of the message being replied to.
    pub reference: String,
    pub content: Box<Content>,
    pub content_type: ContentTypeId,
}

impl Reply {
    pub fn new(reference: impl Into<String>, content: Content) -> Self {
        let content_type = content.content_type();
        Self {
            reference: reference.into(),
            content: Box::new(content),
            content_type,
        }
    }
}

/// Attachment with bytes embedded inline.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// URL scheme a remote attachment may be fetched over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentScheme {
    #[default]
    Https,
}

impl ContentScheme {
    /// Wire string, exactly as other implementations emit it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentScheme::Https => "https://",
        }
    }
}

/// Pointer to externally stored, encrypted attachment bytes, plus the
/// key material needed to decrypt them once fetched.
///
/// `secret`, `salt`, and `nonce` are opaque to this layer; they travel as
/// lowercase hex on the wire. `filename` and `content_length` are optional
/// in the model; absent values serialise as `""` / `"0"` (never null).
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteAttachment {
    pub url: String,
    /// Digest of the *encrypted* payload, for integrity checking after fetch.
    pub content_digest: String,
    pub secret: Vec<u8>,
    pub salt: Vec<u8>,
    pub nonce: Vec<u8>,
    pub scheme: ContentScheme,
    pub filename: Option<String>,
    /// Plaintext length in bytes.
    pub content_length: Option<u64>,
}

impl RemoteAttachment {
    /// Filename for display; empty when unset.
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or("")
    }

    /// Plaintext length; 0 when unknown.
    pub fn content_length(&self) -> u64 {
        self.content_length.unwrap_or(0)
    }
}

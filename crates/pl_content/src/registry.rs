//! Codec registry — ordered collection of per-type bindings.
//!
//! Built once at startup and passed by reference to everything that needs
//! lookup; no global state. All registration happens before concurrent use
//! begins — a host that registers custom codecs later must provide its own
//! synchronisation around the registry value.

use crate::codec::{
    AttachmentCodec, ContentCodec, ReactionCodec, RemoteAttachmentCodec, ReplyCodec, TextCodec,
};
use crate::content::Content;
use crate::content_type::ContentTypeId;
use crate::error::ContentError;

#[derive(Default)]
pub struct CodecRegistry {
    // Insertion order is preserved for deterministic iteration; lookup is
    // by identity only.
    codecs: Vec<Box<dyn ContentCodec>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in codecs. Registering the same
    /// identity again (here or later) replaces the binding in place.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TextCodec));
        registry.register(Box::new(ReactionCodec));
        registry.register(Box::new(AttachmentCodec));
        registry.register(Box::new(ReplyCodec));
        registry.register(Box::new(RemoteAttachmentCodec));
        registry
    }

    /// Append a binding; last write wins for an already-registered identity.
    pub fn register(&mut self, codec: Box<dyn ContentCodec>) {
        let id = codec.content_type();
        match self.codecs.iter().position(|c| c.content_type() == id) {
            Some(i) => self.codecs[i] = codec,
            None => self.codecs.push(codec),
        }
    }

    /// Exact identity match only.
    pub fn lookup(&self, id: &ContentTypeId) -> Option<&dyn ContentCodec> {
        self.codecs
            .iter()
            .find(|c| c.content_type() == *id)
            .map(|c| c.as_ref())
    }

    /// Registered identities, in registration order.
    pub fn content_types(&self) -> impl Iterator<Item = ContentTypeId> + '_ {
        self.codecs.iter().map(|c| c.content_type())
    }

    /// Decode raw payload bytes stamped with `id`.
    ///
    /// An unrecognised identity is not an error: the message still has to
    /// reach the UI as a placeholder, so it degrades to [`Content::Unknown`].
    /// Decode failures from a *registered* codec do propagate.
    pub fn decode(&self, id: &ContentTypeId, bytes: &[u8]) -> Result<Content, ContentError> {
        match self.lookup(id) {
            Some(codec) => codec.decode(bytes),
            None => Ok(Content::Unknown(id.clone())),
        }
    }

    /// Encode typed content into raw payload bytes for the messaging layer.
    /// Unlike decode, a missing binding here is an explicit failure.
    pub fn encode(&self, content: &Content) -> Result<Vec<u8>, ContentError> {
        let id = content.content_type();
        self.lookup(&id)
            .ok_or(ContentError::NoCodec(id))?
            .encode(content)
    }
}

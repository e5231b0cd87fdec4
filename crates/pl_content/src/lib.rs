//! pl_content — Typed message content, codecs, and wire marshalling for Parley
//!
//! Content payloads are strongly typed on the inside and a canonical JSON
//! tree on the outside, so a payload produced by one runtime can be stored
//! and re-rendered by another without losing its type identity. All
//! transforms are synchronous, pure value-to-value functions; the only
//! shared structure is the [`CodecRegistry`], built once at startup.
//!
//! # Modules
//! - `content_type` — content kind identities (authority + type name)
//! - `content`      — the closed set of typed payload variants
//! - `codec`        — per-type raw-byte encoder/decoder bindings
//! - `registry`     — ordered codec collection, queried by identity
//! - `wire`         — Content ↔ canonical JSON tree marshalling
//! - `attachment`   — encryption metadata envelope + local transfer records
//! - `error`        — unified error type

pub mod attachment;
pub mod codec;
pub mod content;
pub mod content_type;
pub mod error;
pub mod registry;
pub mod wire;

pub use attachment::{
    DecryptedLocalAttachment, EncryptedAttachmentMetadata, EncryptedLocalAttachment,
    EncryptionOutput,
};
pub use codec::ContentCodec;
pub use content::{
    Attachment, Content, ContentScheme, Reaction, ReactionAction, ReactionSchema,
    RemoteAttachment, Reply,
};
pub use content_type::ContentTypeId;
pub use error::ContentError;
pub use registry::CodecRegistry;

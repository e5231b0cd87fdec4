//! pl_bridge — Host-boundary records and JSON-string marshalling for Parley
//!
//! Sits between `pl_content` and whatever bridge/FFI layer the host runtime
//! uses: everything crossing the boundary is a UTF-8 JSON string of one of
//! the shapes defined here or in `pl_content::wire`. This crate does no
//! I/O; reading attachment bytes from the file URIs in the transfer
//! records is the host's job.
//!
//! # Modules
//! - `message` — decoded-message envelope + inbound/outbound marshalling
//! - `error`   — boundary error type

pub mod error;
pub mod message;

pub use error::BridgeError;
pub use message::{decode_message, encode_content, DecodedMessage, RawMessage};

// The transfer records ride the same boundary; re-export them so hosts only
// need one crate in scope.
pub use pl_content::{DecryptedLocalAttachment, EncryptedLocalAttachment};

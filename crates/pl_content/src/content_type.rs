//! Content type identities — the dispatch keys for codec lookup.
//!
//! An identity is an (authority, type name) pair. Its canonical string form
//! `"authorityId:typeId"` is what appears on the wire and in logs; two
//! identities are interchangeable iff their canonical strings match exactly
//! (case-sensitive, no trimming, no normalisation).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Authority for the built-in content types.
pub const PARLEY_AUTHORITY: &str = "parley.chat";

/// Identifies one content kind across implementations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeId {
    pub authority_id: String,
    pub type_id: String,
}

impl ContentTypeId {
    pub fn new(authority_id: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            authority_id: authority_id.into(),
            type_id: type_id.into(),
        }
    }

    /// Built-in identity: plain text.
    pub fn text() -> Self {
        Self::new(PARLEY_AUTHORITY, "text")
    }

    /// Built-in identity: emoji/shortcode reaction to another message.
    pub fn reaction() -> Self {
        Self::new(PARLEY_AUTHORITY, "reaction")
    }

    /// Built-in identity: threaded reply wrapping arbitrary nested content.
    pub fn reply() -> Self {
        Self::new(PARLEY_AUTHORITY, "reply")
    }

    /// Built-in identity: inline attachment with embedded bytes.
    pub fn attachment() -> Self {
        Self::new(PARLEY_AUTHORITY, "attachment")
    }

    /// Built-in identity: pointer to externally stored encrypted bytes.
    pub fn remote_attachment() -> Self {
        Self::new(PARLEY_AUTHORITY, "remoteAttachment")
    }
}

impl fmt::Display for ContentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.authority_id, self.type_id)
    }
}

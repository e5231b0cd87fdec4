//! Attachment encryption metadata and local transfer records.
//!
//! Encryption itself happens in the host's crypto collaborator; this module
//! only carries its inputs and outputs as opaque byte strings and shapes
//! them for the wire. The metadata JSON here is byte-for-byte the same
//! convention the remote-attachment content uses (lowercase hex key
//! material, decimal-string length).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::content::{Attachment, ContentScheme, RemoteAttachment};
use crate::error::ContentError;
use crate::wire::{hex_field, str_field};

/// Outputs of the external encryption step, opaque to this layer.
#[derive(Debug, Clone)]
pub struct EncryptionOutput {
    pub secret: Vec<u8>,
    pub salt: Vec<u8>,
    pub nonce: Vec<u8>,
    /// Digest of the encrypted payload.
    pub content_digest: String,
}

/// Everything a receiver needs to fetch-and-decrypt an uploaded attachment,
/// minus the URL (which only exists after upload).
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptedAttachmentMetadata {
    pub filename: String,
    pub secret: Vec<u8>,
    pub salt: Vec<u8>,
    pub nonce: Vec<u8>,
    pub content_digest: String,
    /// Plaintext length in bytes.
    pub content_length: u64,
}

impl EncryptedAttachmentMetadata {
    /// Combine an attachment's own fields with the encryption step's
    /// outputs. Pure; no encryption happens here.
    pub fn from_attachment(attachment: &Attachment, output: EncryptionOutput) -> Self {
        Self {
            filename: attachment.filename.clone(),
            secret: output.secret,
            salt: output.salt,
            nonce: output.nonce,
            content_digest: output.content_digest,
            content_length: attachment.data.len() as u64,
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "filename": self.filename,
            "secret": hex::encode(&self.secret),
            "salt": hex::encode(&self.salt),
            "nonce": hex::encode(&self.nonce),
            "contentDigest": self.content_digest,
            "contentLength": self.content_length.to_string(),
        })
    }

    pub fn from_value(value: &Value) -> Result<Self, ContentError> {
        let obj = value.as_object();
        Ok(Self {
            filename: str_field(obj, "filename"),
            secret: hex_field(obj, "secret")?,
            salt: hex_field(obj, "salt")?,
            nonce: hex_field(obj, "nonce")?,
            content_digest: str_field(obj, "contentDigest"),
            content_length: str_field(obj, "contentLength").parse().unwrap_or(0),
        })
    }
}

impl RemoteAttachment {
    /// Build the remote-attachment content once the host has uploaded the
    /// encrypted blob and knows its URL.
    pub fn from_metadata(url: impl Into<String>, metadata: &EncryptedAttachmentMetadata) -> Self {
        Self {
            url: url.into(),
            content_digest: metadata.content_digest.clone(),
            secret: metadata.secret.clone(),
            salt: metadata.salt.clone(),
            nonce: metadata.nonce.clone(),
            scheme: ContentScheme::Https,
            filename: Some(metadata.filename.clone()).filter(|f| !f.is_empty()),
            content_length: Some(metadata.content_length).filter(|n| *n > 0),
        }
    }
}

/// Transfer record: where the encrypted bytes were written locally, plus
/// the metadata needed to build a [`RemoteAttachment`] after upload. Raw
/// bytes never ride the JSON tree; the host reads them from the file URI.
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptedLocalAttachment {
    pub encrypted_local_file_uri: String,
    pub metadata: EncryptedAttachmentMetadata,
}

impl EncryptedLocalAttachment {
    pub fn to_value(&self) -> Value {
        json!({
            "encryptedLocalFileUri": self.encrypted_local_file_uri,
            "metadata": self.metadata.to_value(),
        })
    }

    pub fn from_value(value: &Value) -> Result<Self, ContentError> {
        let obj = value.as_object();
        let metadata = obj
            .and_then(|o| o.get("metadata"))
            .map(EncryptedAttachmentMetadata::from_value)
            .transpose()?
            .ok_or_else(|| {
                ContentError::BadRemoteAttachmentMetadata("no metadata object".into())
            })?;
        Ok(Self {
            encrypted_local_file_uri: str_field(obj, "encryptedLocalFileUri"),
            metadata,
        })
    }
}

/// Transfer record: where decrypted bytes were written locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptedLocalAttachment {
    pub file_uri: String,
    pub mime_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> EncryptedAttachmentMetadata {
        EncryptedAttachmentMetadata {
            filename: "cat.png".into(),
            secret: vec![0xaa, 0xbb],
            salt: vec![0x01, 0x02],
            nonce: vec![0x03],
            content_digest: "digest".into(),
            content_length: 4,
        }
    }

    #[test]
    fn from_attachment_maps_fields() {
        let attachment = Attachment {
            filename: "cat.png".into(),
            mime_type: "image/png".into(),
            data: vec![9, 9, 9, 9],
        };
        let output = EncryptionOutput {
            secret: vec![0xaa, 0xbb],
            salt: vec![0x01, 0x02],
            nonce: vec![0x03],
            content_digest: "digest".into(),
        };
        let m = EncryptedAttachmentMetadata::from_attachment(&attachment, output);
        assert_eq!(m, metadata());
    }

    #[test]
    fn metadata_json_roundtrip() {
        let m = metadata();
        let v = m.to_value();
        assert_eq!(v["secret"], "aabb");
        assert_eq!(v["contentLength"], "4");
        assert_eq!(EncryptedAttachmentMetadata::from_value(&v).unwrap(), m);
    }

    #[test]
    fn metadata_bad_hex_is_rejected() {
        let v = json!({
            "filename": "f", "secret": "xx", "salt": "01", "nonce": "02",
            "contentDigest": "d", "contentLength": "1"
        });
        let err = EncryptedAttachmentMetadata::from_value(&v).unwrap_err();
        assert!(matches!(err, ContentError::BadRemoteAttachmentMetadata(_)));
    }

    #[test]
    fn remote_attachment_from_metadata() {
        let ra = RemoteAttachment::from_metadata("https://cdn.example/blob/1", &metadata());
        assert_eq!(ra.url, "https://cdn.example/blob/1");
        assert_eq!(ra.filename(), "cat.png");
        assert_eq!(ra.content_length(), 4);
        assert_eq!(ra.secret, vec![0xaa, 0xbb]);
    }

    #[test]
    fn encrypted_local_attachment_wire_shape() {
        let rec = EncryptedLocalAttachment {
            encrypted_local_file_uri: "file:///tmp/enc-1".into(),
            metadata: metadata(),
        };
        let v = rec.to_value();
        assert_eq!(v["encryptedLocalFileUri"], "file:///tmp/enc-1");
        assert_eq!(v["metadata"]["nonce"], "03");
        assert_eq!(EncryptedLocalAttachment::from_value(&v).unwrap(), rec);
    }

    #[test]
    fn encrypted_local_attachment_requires_metadata() {
        let err =
            EncryptedLocalAttachment::from_value(&json!({"encryptedLocalFileUri": "file:///x"}))
                .unwrap_err();
        assert!(matches!(err, ContentError::BadRemoteAttachmentMetadata(_)));
    }

    #[test]
    fn decrypted_local_attachment_uses_camel_case() {
        let rec = DecryptedLocalAttachment {
            file_uri: "file:///tmp/dec-1".into(),
            mime_type: "image/png".into(),
        };
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v, json!({"fileUri": "file:///tmp/dec-1", "mimeType": "image/png"}));
        let back: DecryptedLocalAttachment = serde_json::from_value(v).unwrap();
        assert_eq!(back, rec);
    }
}

use thiserror::Error;

use crate::content_type::ContentTypeId;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("JSON object contains no recognised content key")]
    UnknownContentType,

    #[error("Invalid attachment data: {0}")]
    BadAttachmentData(String),

    #[error("Missing or undecodable reply content: {0}")]
    BadReplyContent(String),

    #[error("Invalid remote attachment metadata: {0}")]
    BadRemoteAttachmentMetadata(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Payload decode failed: {0}")]
    Decode(String),

    #[error("No codec registered for content type {0}")]
    NoCodec(ContentTypeId),
}

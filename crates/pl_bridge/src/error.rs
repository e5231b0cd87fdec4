use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Content error: {0}")]
    Content(#[from] pl_content::ContentError),

    #[error("JSON serialisation error: {0}")]
    Json(#[from] serde_json::Error),
}

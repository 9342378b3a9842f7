//! Extraction capability. The controller only depends on this trait, so a real
//! statement parser can replace the stub without touching the state machine.

use async_trait::async_trait;
use intake_core::{IntakeError, ParseResult, SelectedFile};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Failed(String),
}

impl From<ExtractError> for IntakeError {
    fn from(value: ExtractError) -> Self {
        match value {
            ExtractError::Failed(msg) => IntakeError::Extraction(msg),
        }
    }
}

#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn extract(&self, file: &SelectedFile) -> Result<ParseResult, ExtractError>;
}

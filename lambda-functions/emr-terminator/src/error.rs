use aws_sdk_emr::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use std::fmt;
use thiserror::Error;

/// Everything that can stop an invocation short of a termination request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerminatorError {
    #[error("ClusterId is required.")]
    MissingClusterId,

    #[error("Cluster {cluster_id} not found in configured regions")]
    ClusterNotFound { cluster_id: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A failure reported by EMR (or by the SDK on its way there).
///
/// Displays the provider's message verbatim so it can be handed straight
/// back to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct ProviderError {
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn from_sdk<E, R>(err: &SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: fmt::Debug,
    {
        let message = match err.message() {
            Some(message) => message.to_string(),
            // Dispatch and timeout failures carry no service message
            None => DisplayErrorContext(err).to_string(),
        };

        Self::new(err.code().map(str::to_string), message)
    }
}

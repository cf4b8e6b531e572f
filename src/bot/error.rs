use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for the vision and decision pipeline.
pub type BotResult<T> = Result<T, BotError>;

/// The error type for frame analysis, template loading and bot housekeeping.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Screenshot buffer is empty; the capture source is unavailable")]
    SourceUnavailable,

    #[error("Invalid image data: {reason}")]
    InvalidImage { reason: String },

    #[error("Template directory not found or unreadable: {path:?}")]
    TemplateDirectory { path: PathBuf },

    #[error("No PNG template files found in {path:?}")]
    NoTemplates { path: PathBuf },

    #[error("Duplicate template name '{name}'; template names must be unique")]
    DuplicateTemplate { name: String },

    #[error("Failed to load template {path:?}: {reason}")]
    TemplateLoad { path: PathBuf, reason: String },

    #[error("Screenshot archive IO failed: {source}")]
    Archive {
        #[from]
        source: std::io::Error,
    },

    #[error("Matcher task failed to complete: {source}")]
    TaskJoin {
        #[from]
        source: tokio::task::JoinError,
    },
}

use std::time::Duration;
use thiserror::Error;

/// A specialized `Result` type for ADB operations.
pub type AdbResult<T> = Result<T, AdbError>;

/// The error type for all ADB-related operations.
#[derive(Debug, Error)]
pub enum AdbError {
    #[error(
        "Failed to invoke 'adb': {source}. Install Android Platform Tools (https://developer.android.com/tools/adb) or add 'adb' to PATH."
    )]
    Launch {
        #[from]
        source: std::io::Error,
    },

    #[error("adb {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("adb {command} timed out after {duration:?}")]
    Timeout {
        command: String,
        duration: Duration,
    },
}

// ADB module - device access through the Android Debug Bridge binary.
// This module provides the capture and input-injection plumbing the bot
// drives, plus the startup diagnostics for a misconfigured setup.

pub mod checker;
pub mod error;
pub mod shell;
pub mod types;

// Re-export the main types and functions for easy access
pub use checker::{check_adb_status, wait_for_device};
pub use error::{AdbError, AdbResult};
pub use shell::AdbShell;
pub use types::{Device, DeviceControl, KEYCODE_POWER};

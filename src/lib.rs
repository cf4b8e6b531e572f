pub mod adb;
pub mod args;
pub mod bot;

pub use adb::{AdbShell, DeviceControl};
pub use bot::{Bot, BotConfig, DecisionPolicy, TemplateLibrary};

// Bot module
// This module implements the screenshot-driven automation loop: template
// matching against captured frames, the tap decision policy, and the
// cycle driver that ties them to an ADB-controlled device.

pub mod aggregator;
pub mod archive;
pub mod config;
pub mod decision;
pub mod error;
pub mod frame;
pub mod matcher;
pub mod runner;
pub mod template;


// Re-export the main types and functions for easy access
pub use aggregator::{Candidate, find_candidates};
pub use archive::ScreenshotArchive;
pub use config::{BotConfig, CONFIDENCE_THRESHOLD};
pub use decision::{Action, DecisionPolicy};
pub use error::{BotError, BotResult};
pub use frame::Frame;
pub use matcher::{MatchResult, best_match};
pub use runner::{Bot, BotState, CycleOutcome, RunOutcome, shutdown_channel};
pub use template::{Template, TemplateLibrary};

//! Tunable knobs for the capture/decide/act loop

use std::path::PathBuf;
use std::time::Duration;

/// Smallest correlation score a match must beat to become a candidate.
pub const CONFIDENCE_THRESHOLD: f32 = 0.90;

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Directory scanned for PNG templates at startup
    pub template_dir: PathBuf,
    /// Directory for the rotating capture archive
    pub screenshot_dir: PathBuf,
    /// How many archived captures to keep before evicting the oldest
    pub max_screenshots: usize,
    /// Confidence cutoff passed to the aggregator (strictly greater-than)
    pub confidence_threshold: f32,
    /// Poll interval while the device is unreachable
    pub device_poll: Duration,
    /// Sleep after capturing a frame identical to the previous one
    pub unchanged_frame_delay: Duration,
    /// Sleep at the end of every completed cycle
    pub cycle_delay: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
            screenshot_dir: PathBuf::from("screenshots"),
            max_screenshots: 5,
            confidence_threshold: CONFIDENCE_THRESHOLD,
            device_poll: Duration::from_secs(5),
            unchanged_frame_delay: Duration::from_millis(2500),
            cycle_delay: Duration::from_millis(1500),
        }
    }
}

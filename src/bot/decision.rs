//! Priority policy that turns a candidate list into at most one action

use super::aggregator::Candidate;
use std::cmp::Ordering;
use std::time::Duration;

/// Priority prefixes scanned first to last; the first prefix with any
/// candidate wins regardless of what scored higher elsewhere.
const DEFAULT_PRIORITY: &[&str] = &[
    "max_number_of_games_played_text",
    "reward_",
    "start_",
    "select_master",
    "select_hypa",
    "start_button_yes",
    "welcome_to_gbl_button_text",
    "Yes",
];

/// Taps at y at or above this row land in the status HUD, never on a button.
pub const TAP_BOUNDARY_Y: u32 = 296;
/// Fixed point hammered while the attack screen is up (portrait 1080x2280).
pub const ATTACK_TAP_POSITION: (u32, u32) = (540, 1200);
/// Grace period before tapping a forfeit cue.
pub const FORFEIT_TAP_DELAY: Duration = Duration::from_secs(5);

/// The single action a frame cycle is allowed to produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    NoAction,
    Tap {
        position: (u32, u32),
        delay_before_tap: Duration,
        is_ingame: bool,
    },
    ExitProgram,
}

fn is_ingame(name: &str) -> bool {
    name.starts_with("ingame_") || name == "enemy_charge_attack"
}

fn is_attack_screen(name: &str) -> bool {
    name.starts_with("ingame_")
}

/// All the knobs of the cue-to-action mapping. The defaults reproduce the
/// GBL grind; tests and future cues swap fields instead of editing code.
#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    pub priority: Vec<String>,
    pub tap_boundary_y: u32,
    pub attack_tap: (u32, u32),
    pub forfeit_delay: Duration,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            priority: DEFAULT_PRIORITY.iter().map(|s| s.to_string()).collect(),
            tap_boundary_y: TAP_BOUNDARY_Y,
            attack_tap: ATTACK_TAP_POSITION,
            forfeit_delay: FORFEIT_TAP_DELAY,
        }
    }
}

impl DecisionPolicy {
    /// Resolve the cycle's candidates into at most one action.
    ///
    /// Priority prefixes are scanned in order first; without a priority hit,
    /// the best candidate below the tap boundary wins; otherwise no action.
    pub fn decide(&self, candidates: &[Candidate]) -> Action {
        if candidates.is_empty() {
            log::debug!("No image matches.");
            return Action::NoAction;
        }

        for prefix in &self.priority {
            let best = candidates
                .iter()
                .filter(|c| c.name.starts_with(prefix.as_str()))
                .max_by(|a, b| compare_confidence(a, b));
            if let Some(candidate) = best {
                log::info!(
                    "Priority match found: {} with confidence {:.4}",
                    candidate.name,
                    candidate.result.confidence
                );
                return self.synthesize(candidate);
            }
        }

        let best = candidates
            .iter()
            .filter(|c| c.result.location.1 > self.tap_boundary_y)
            .max_by(|a, b| compare_confidence(a, b));
        match best {
            Some(candidate) => self.synthesize(candidate),
            None => {
                log::info!(
                    "No matches with y > {} found; skipping tap.",
                    self.tap_boundary_y
                );
                Action::NoAction
            }
        }
    }

    fn synthesize(&self, candidate: &Candidate) -> Action {
        let name = candidate.name.as_str();
        let result = &candidate.result;
        log::info!(
            "Image {} matches with {:.2}%",
            name,
            result.confidence * 100.0
        );

        if name.starts_with("max_number_of_games_played_text") {
            return Action::ExitProgram;
        }
        if name.starts_with("forfeit") {
            return Action::Tap {
                position: result.location,
                delay_before_tap: self.forfeit_delay,
                is_ingame: false,
            };
        }
        if is_ingame(name) {
            // The match only confirms the attack screen is showing; the tap
            // itself goes to the fixed attack point
            let position = if is_attack_screen(name) {
                self.attack_tap
            } else {
                result.location
            };
            return Action::Tap {
                position,
                delay_before_tap: Duration::ZERO,
                is_ingame: true,
            };
        }
        Action::Tap {
            position: result.location,
            delay_before_tap: Duration::ZERO,
            is_ingame: false,
        }
    }
}

fn compare_confidence(a: &&Candidate, b: &&Candidate) -> Ordering {
    a.result
        .confidence
        .partial_cmp(&b.result.confidence)
        .unwrap_or(Ordering::Equal)
}

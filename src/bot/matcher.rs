//! Single-template correlation pass over one decoded frame

use super::template::Template;
use image::GrayImage;
use imageproc::template_matching::{MatchTemplateMethod, match_template};

/// Where and how well one template matched a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Best correlation score, clamped into [0, 1]
    pub confidence: f32,
    /// Tap point: the center of the matched region
    pub location: (u32, u32),
    /// Matched region size; matching is unscaled, so this is the template's
    /// native size
    pub width: u32,
    pub height: u32,
}

/// Best placement of `template` inside `frame`.
///
/// Returns `None` when the template does not fit inside the frame; there is
/// no meaningful comparison in that case.
pub fn best_match(frame: &GrayImage, template: &Template) -> Option<MatchResult> {
    let (tw, th) = (template.width(), template.height());
    if tw > frame.width() || th > frame.height() {
        return None;
    }

    let scores = match_template(
        frame,
        template.image(),
        MatchTemplateMethod::CrossCorrelationNormalized,
    );

    // CrossCorrelationNormalized yields f32 scores in [-1, 1], 1.0 being a
    // perfect match
    let mut best_score = f32::MIN;
    let mut best_pos = (0u32, 0u32);
    for (x, y, pixel) in scores.enumerate_pixels() {
        let score = pixel[0];
        if score > best_score {
            best_score = score;
            best_pos = (x, y);
        }
    }

    Some(MatchResult {
        confidence: best_score.clamp(0.0, 1.0),
        location: (best_pos.0 + tw / 2, best_pos.1 + th / 2),
        width: tw,
        height: th,
    })
}

//! Concurrent fan-out of the matcher across the whole template library

use super::error::BotResult;
use super::frame::Frame;
use super::matcher::{self, MatchResult};
use super::template::{Template, TemplateLibrary};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::task::JoinSet;

/// One template that cleared the acceptance rules for the current frame.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub result: MatchResult,
}

/// Forfeit cues demand an exact-size match or a score above 0.90 on top of
/// the generic threshold; everything else accepts on the threshold alone.
pub fn accept_candidate(template: &Template, result: &MatchResult, threshold: f32) -> bool {
    if result.confidence <= threshold {
        return false;
    }
    if template.is_forfeit() {
        let exact_size = result.width == template.width() && result.height == template.height();
        return exact_size || result.confidence > 0.90;
    }
    true
}

/// Match every template against `frame` concurrently and return the accepted
/// candidates sorted by confidence, best first.
///
/// Matching is CPU-bound, so each template runs on the blocking pool over the
/// shared decoded frame. The whole set is drained before returning; the
/// decision stage only ever sees a complete picture.
pub async fn find_candidates(
    frame: &Frame,
    library: &TemplateLibrary,
    threshold: f32,
) -> BotResult<Vec<Candidate>> {
    let image = Arc::new(frame.decode()?);

    let mut tasks = JoinSet::new();
    for template in library.templates() {
        let template = Arc::clone(template);
        let image = Arc::clone(&image);
        tasks.spawn_blocking(move || {
            let result = matcher::best_match(&image, &template);
            (template, result)
        });
    }

    let mut candidates = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (template, result) = joined?;
        let Some(result) = result else {
            log::debug!(
                "Template '{}' is larger than the frame; skipped",
                template.name
            );
            continue;
        };
        log::debug!(
            "Template '{}': confidence {:.4}",
            template.name,
            result.confidence
        );
        if accept_candidate(&template, &result, threshold) {
            candidates.push(Candidate {
                name: template.name.clone(),
                result,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.result
            .confidence
            .partial_cmp(&a.result.confidence)
            .unwrap_or(Ordering::Equal)
    });
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::error::BotError;
    use image::GrayImage;

    fn textured_frame(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            let v = x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17)) ^ (x * y);
            image::Luma([v as u8])
        })
    }

    fn png_bytes(image: &GrayImage) -> Vec<u8> {
        let mut png = Vec::new();
        image::DynamicImage::ImageLuma8(image.clone())
            .write_to(
                &mut std::io::Cursor::new(&mut png),
                image::ImageFormat::Png,
            )
            .unwrap();
        png
    }

    fn match_result(confidence: f32, width: u32, height: u32) -> MatchResult {
        MatchResult {
            confidence,
            location: (100, 400),
            width,
            height,
        }
    }

    fn forfeit_template() -> Template {
        Template::from_image("forfeit_flag", textured_frame(20, 10)).unwrap()
    }

    #[test]
    fn forfeit_below_gate_is_rejected_despite_generic_threshold() {
        let template = forfeit_template();
        // 0.85 clears a relaxed threshold but neither forfeit condition
        let result = match_result(0.85, 19, 10);
        assert!(!accept_candidate(&template, &result, 0.80));
    }

    #[test]
    fn forfeit_with_exact_size_passes_the_gate() {
        let template = forfeit_template();
        let result = match_result(0.85, 20, 10);
        assert!(accept_candidate(&template, &result, 0.80));
    }

    #[test]
    fn forfeit_with_high_confidence_passes_despite_size_mismatch() {
        let template = forfeit_template();
        let result = match_result(0.95, 18, 9);
        assert!(accept_candidate(&template, &result, 0.80));
    }

    #[test]
    fn generic_threshold_is_strictly_greater_than() {
        let template = Template::from_image("start_button", textured_frame(20, 10)).unwrap();
        assert!(!accept_candidate(&template, &match_result(0.90, 20, 10), 0.90));
        assert!(accept_candidate(&template, &match_result(0.9001, 20, 10), 0.90));
    }

    #[tokio::test]
    async fn accepts_matching_templates_sorted_by_confidence() {
        let screen = textured_frame(128, 400);
        let frame = Frame::new(png_bytes(&screen));

        let exact_a = image::imageops::crop_imm(&screen, 10, 50, 24, 24).to_image();
        let exact_b = image::imageops::crop_imm(&screen, 80, 300, 24, 24).to_image();
        // Invert every third pixel so the score lands well below the exact crops
        let mut noised = image::imageops::crop_imm(&screen, 40, 150, 24, 24).to_image();
        for (i, pixel) in noised.pixels_mut().enumerate() {
            if i % 3 == 0 {
                pixel.0[0] = 255 - pixel.0[0];
            }
        }

        let library = TemplateLibrary::from_templates(vec![
            Template::from_image("reward_claim", exact_a).unwrap(),
            Template::from_image("start_battle", exact_b).unwrap(),
            Template::from_image("stale_cue", noised).unwrap(),
        ])
        .unwrap();

        let candidates = find_candidates(&frame, &library, 0.99).await.unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(candidates.len(), 2, "got candidates: {names:?}");
        assert!(names.contains(&"reward_claim"));
        assert!(names.contains(&"start_battle"));
        assert!(
            candidates
                .windows(2)
                .all(|w| w[0].result.confidence >= w[1].result.confidence)
        );
    }

    #[tokio::test]
    async fn empty_capture_reports_source_unavailable() {
        let frame = Frame::new(Vec::new());
        let library = TemplateLibrary::from_templates(vec![
            Template::from_image("start_button", textured_frame(8, 8)).unwrap(),
        ])
        .unwrap();

        let result = find_candidates(&frame, &library, 0.90).await;
        assert!(matches!(result, Err(BotError::SourceUnavailable)));
    }

    #[tokio::test]
    async fn undecodable_capture_reports_invalid_image() {
        let frame = Frame::new(b"corrupted bytes".to_vec());
        let library = TemplateLibrary::from_templates(vec![
            Template::from_image("start_button", textured_frame(8, 8)).unwrap(),
        ])
        .unwrap();

        let result = find_candidates(&frame, &library, 0.90).await;
        assert!(matches!(result, Err(BotError::InvalidImage { .. })));
    }

    #[tokio::test]
    async fn oversized_templates_produce_no_candidates() {
        let screen = textured_frame(32, 32);
        let frame = Frame::new(png_bytes(&screen));
        let library = TemplateLibrary::from_templates(vec![
            Template::from_image("huge_banner", textured_frame(64, 64)).unwrap(),
        ])
        .unwrap();

        let candidates = find_candidates(&frame, &library, 0.90).await.unwrap();
        assert!(candidates.is_empty());
    }
}

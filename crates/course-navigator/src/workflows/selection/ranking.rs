use super::domain::{NormalizedMatch, RankedMatch};

/// Highest rating a search hit can receive.
pub const MAX_RATING: u8 = 10;

/// Convert raw relevance scores into 0–10 ratings relative to the best hit in the batch.
///
/// Ratings are not comparable across batches. Order is preserved.
pub fn normalize(matches: &[RankedMatch]) -> Vec<NormalizedMatch> {
    let max_score = matches
        .iter()
        .map(|hit| hit.raw_score)
        .fold(0.0_f64, f64::max);

    matches
        .iter()
        .cloned()
        .map(|ranked| {
            let rating = rating_for(ranked.raw_score, max_score);
            NormalizedMatch { ranked, rating }
        })
        .collect()
}

/// Round-half-up of `raw / max * 10`, or 0 when the batch has no positive score.
pub fn rating_for(raw_score: f64, max_score: f64) -> u8 {
    if max_score <= 0.0 || !max_score.is_finite() || !raw_score.is_finite() {
        return 0;
    }

    let scaled = (raw_score / max_score) * f64::from(MAX_RATING);
    let rounded = (scaled + 0.5).floor().clamp(0.0, f64::from(MAX_RATING));
    rounded as u8
}

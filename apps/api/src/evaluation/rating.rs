//! Banded answer rating and session-level aggregation.
//!
//! Each transcript pair is rated by every panel seat; responses are parsed
//! leniently (`Band:` line → band, `Feedback:` line → feedback, full raw
//! text as fallback). Aggregation averages band upper bounds, ignoring
//! unknown bands, and maps the average onto a fixed four-tier verdict.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::interview::generator::InterviewModel;
use crate::panel::{Persona, PANEL};

static BAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Band:\s*([0-9]{1,2}-[0-9]{1,3})").unwrap());
static FEEDBACK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Feedback:\s*(.*)").unwrap());

/// One main question/answer pair of the scored transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptPair {
    pub question: String,
    pub answer: String,
}

/// One panel seat's rating of one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelistRating {
    pub panelist: String,
    pub role: String,
    /// A discretized score range like "70-80". `None` when the response did
    /// not contain a recognizable band.
    pub band: Option<String>,
    pub feedback: String,
}

/// All ratings for one transcript pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRatings {
    pub question: String,
    pub answer: String,
    pub ratings: Vec<PanelistRating>,
}

/// Four-tier hiring verdict derived from the average band upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Outstanding,
    #[serde(rename = "Strong Candidate")]
    StrongCandidate,
    Average,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Verdict {
    /// Fixed thresholds: ≥80 Outstanding, ≥60 Strong Candidate, ≥40 Average.
    pub fn from_average(average: f64) -> Self {
        if average >= 80.0 {
            Verdict::Outstanding
        } else if average >= 60.0 {
            Verdict::StrongCandidate
        } else if average >= 40.0 {
            Verdict::Average
        } else {
            Verdict::NeedsImprovement
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Outstanding => "Outstanding",
            Verdict::StrongCandidate => "Strong Candidate",
            Verdict::Average => "Average",
            Verdict::NeedsImprovement => "Needs Improvement",
        };
        f.write_str(label)
    }
}

/// The full scored result of a session. Appended to the history store,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvaluation {
    pub question_ratings: Vec<QuestionRatings>,
    pub average_score: f64,
    pub verdict: Verdict,
}

/// Parses one rating response. Missing pieces degrade, they never fail:
/// no `Band:` line → band `None`; no `Feedback:` line → the whole raw
/// response becomes the feedback.
pub fn parse_rating(persona: &Persona, raw: &str) -> PanelistRating {
    let band = BAND_RE.captures(raw).map(|caps| caps[1].to_string());
    let feedback = FEEDBACK_RE
        .captures(raw)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| raw.to_string());

    PanelistRating {
        panelist: persona.name.to_string(),
        role: persona.role.to_string(),
        band,
        feedback,
    }
}

/// Upper bound of a band string ("70-80" → 80). `None` for anything that
/// does not parse.
pub fn band_upper_bound(band: &str) -> Option<f64> {
    band.split('-').nth(1)?.trim().parse::<f64>().ok()
}

/// Rates one question/answer pair across the whole panel. A failed call
/// becomes a band-less rating carrying the error text — one seat's outage
/// never sinks the evaluation.
pub async fn rate_answer(
    model: &dyn InterviewModel,
    question: &str,
    answer: &str,
) -> Vec<PanelistRating> {
    let mut ratings = Vec::with_capacity(PANEL.len());
    for persona in &PANEL {
        match model.rate(persona, question, answer).await {
            Ok(raw) => ratings.push(parse_rating(persona, &raw)),
            Err(e) => {
                warn!("Rating call failed for {}: {e}", persona.name);
                ratings.push(PanelistRating {
                    panelist: persona.name.to_string(),
                    role: persona.role.to_string(),
                    band: None,
                    feedback: format!("Error generating rating: {e}"),
                });
            }
        }
    }
    ratings
}

/// Averages band upper bounds across every persona/question rating,
/// ignoring unknown bands. Returns 0.0 when nothing was scorable.
pub fn aggregate(question_ratings: &[QuestionRatings]) -> (f64, Verdict) {
    let mut total = 0.0;
    let mut count = 0u32;

    for entry in question_ratings {
        for rating in &entry.ratings {
            if let Some(upper) = rating.band.as_deref().and_then(band_upper_bound) {
                total += upper;
                count += 1;
            }
        }
    }

    let average = if count > 0 { total / f64::from(count) } else { 0.0 };
    (average, Verdict::from_average(average))
}

/// Scores a full transcript: every pair rated by every panel seat, awaited
/// sequentially, then aggregated into the final verdict.
pub async fn evaluate_session(
    model: &dyn InterviewModel,
    transcript: &[TranscriptPair],
) -> SessionEvaluation {
    let mut question_ratings = Vec::with_capacity(transcript.len());
    for pair in transcript {
        let ratings = rate_answer(model, &pair.question, &pair.answer).await;
        question_ratings.push(QuestionRatings {
            question: pair.question.clone(),
            answer: pair.answer.clone(),
            ratings,
        });
    }

    let (average_score, verdict) = aggregate(&question_ratings);
    SessionEvaluation {
        question_ratings,
        average_score,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating_with_band(band: Option<&str>) -> PanelistRating {
        PanelistRating {
            panelist: "Dr. Arjun Sharma".to_string(),
            role: "Principal Software Architect".to_string(),
            band: band.map(str::to_string),
            feedback: "noted".to_string(),
        }
    }

    fn ratings_entry(bands: &[Option<&str>]) -> QuestionRatings {
        QuestionRatings {
            question: "Q?".to_string(),
            answer: "A.".to_string(),
            ratings: bands.iter().map(|b| rating_with_band(*b)).collect(),
        }
    }

    #[test]
    fn test_parse_rating_well_formed() {
        let raw = "Band: 70-80\nFeedback: Solid grasp of sharding trade-offs.";
        let rating = parse_rating(&PANEL[0], raw);
        assert_eq!(rating.band.as_deref(), Some("70-80"));
        assert_eq!(rating.feedback, "Solid grasp of sharding trade-offs.");
        assert_eq!(rating.panelist, PANEL[0].name);
    }

    #[test]
    fn test_parse_rating_missing_band_keeps_raw_text() {
        let raw = "The answer was decent but lacked depth on failure modes.";
        let rating = parse_rating(&PANEL[1], raw);
        assert_eq!(rating.band, None);
        assert_eq!(rating.feedback, raw);
    }

    #[test]
    fn test_parse_rating_missing_feedback_keeps_raw_text() {
        let raw = "Band: 40-50";
        let rating = parse_rating(&PANEL[2], raw);
        assert_eq!(rating.band.as_deref(), Some("40-50"));
        assert_eq!(rating.feedback, raw);
    }

    #[test]
    fn test_parse_rating_band_embedded_in_prose() {
        let raw = "Overall I'd say Band: 80-90 here.\nFeedback: Excellent depth.";
        let rating = parse_rating(&PANEL[3], raw);
        assert_eq!(rating.band.as_deref(), Some("80-90"));
        assert_eq!(rating.feedback, "Excellent depth.");
    }

    #[test]
    fn test_band_upper_bound() {
        assert_eq!(band_upper_bound("70-80"), Some(80.0));
        assert_eq!(band_upper_bound("0-10"), Some(10.0));
        assert_eq!(band_upper_bound("90-100"), Some(100.0));
        assert_eq!(band_upper_bound("not a band"), None);
        assert_eq!(band_upper_bound("80"), None);
    }

    #[test]
    fn test_aggregate_uses_upper_bounds() {
        // 10-20 and 90-100 → upper bounds 20 and 100 → average 60.
        let entries = vec![ratings_entry(&[Some("10-20"), Some("90-100")])];
        let (average, verdict) = aggregate(&entries);
        assert!((average - 60.0).abs() < f64::EPSILON);
        assert_eq!(verdict, Verdict::StrongCandidate);
    }

    #[test]
    fn test_aggregate_ignores_unknown_bands() {
        let entries = vec![ratings_entry(&[Some("70-80"), None, None])];
        let (average, verdict) = aggregate(&entries);
        assert!((average - 80.0).abs() < f64::EPSILON);
        assert_eq!(verdict, Verdict::Outstanding);
    }

    #[test]
    fn test_aggregate_empty_is_zero_needs_improvement() {
        let entries = vec![ratings_entry(&[None, None])];
        let (average, verdict) = aggregate(&entries);
        assert_eq!(average, 0.0);
        assert_eq!(verdict, Verdict::NeedsImprovement);
        assert_eq!(aggregate(&[]).0, 0.0);
    }

    #[test]
    fn test_verdict_thresholds_are_exact() {
        assert_eq!(Verdict::from_average(80.0), Verdict::Outstanding);
        assert_eq!(Verdict::from_average(79.9), Verdict::StrongCandidate);
        assert_eq!(Verdict::from_average(60.0), Verdict::StrongCandidate);
        assert_eq!(Verdict::from_average(59.9), Verdict::Average);
        assert_eq!(Verdict::from_average(40.0), Verdict::Average);
        assert_eq!(Verdict::from_average(39.9), Verdict::NeedsImprovement);
        assert_eq!(Verdict::from_average(0.0), Verdict::NeedsImprovement);
    }

    #[test]
    fn test_verdict_serializes_with_spaces() {
        let json = serde_json::to_string(&Verdict::StrongCandidate).unwrap();
        assert_eq!(json, "\"Strong Candidate\"");
        let json = serde_json::to_string(&Verdict::NeedsImprovement).unwrap();
        assert_eq!(json, "\"Needs Improvement\"");
    }
}

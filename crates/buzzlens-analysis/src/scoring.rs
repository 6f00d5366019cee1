// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The viral-potential rubric: dimension scores, weighted overall score,
//! rating bands, and view estimates.
//!
//! Dimension fields serialize in camelCase because that is the JSON shape the
//! system prompt demands from the model.

use buzzlens_core::BuzzlensError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Per-dimension scores (0-100) as returned by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    pub title_score: u8,
    pub hook_score: u8,
    pub structure_score: u8,
    pub readability_score: u8,
    pub emotional_score: u8,
    pub trend_score: u8,
    pub length_score: u8,
    pub visual_score: u8,
}

impl DimensionScores {
    /// Weighted overall score. Title and hook carry the most weight; length
    /// and visuals the least. Weights sum to 1.0, so the result stays in 0-100.
    pub fn viral_score(&self) -> u8 {
        let weighted = f64::from(self.title_score) * 0.20
            + f64::from(self.hook_score) * 0.20
            + f64::from(self.structure_score) * 0.10
            + f64::from(self.readability_score) * 0.10
            + f64::from(self.emotional_score) * 0.15
            + f64::from(self.trend_score) * 0.15
            + f64::from(self.length_score) * 0.05
            + f64::from(self.visual_score) * 0.05;
        weighted.round() as u8
    }
}

/// Priority of an improvement suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A single improvement suggestion from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Improvement {
    /// What part of the article the suggestion targets.
    pub category: String,
    pub priority: Priority,
    /// The suggestion itself.
    pub suggestion: String,
    /// Expected effect of applying it.
    pub impact: String,
    /// Concrete example, when the model offers one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// The raw JSON document the model returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelAssessment {
    pub scores: DimensionScores,
    pub improvements: Vec<Improvement>,
    pub strengths: Vec<String>,
}

/// Rating band derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Low,
    Medium,
    High,
    Viral,
}

impl Rating {
    /// Band thresholds: viral >= 85, high >= 70, medium >= 50, else low.
    pub fn from_score(score: u8) -> Self {
        match score {
            85..=u8::MAX => Rating::Viral,
            70..=84 => Rating::High,
            50..=69 => Rating::Medium,
            _ => Rating::Low,
        }
    }

    /// Estimated page-view range for this band.
    pub fn estimated_views(self) -> ViewRange {
        match self {
            Rating::Viral => ViewRange { min: 10_000, max: 100_000 },
            Rating::High => ViewRange { min: 1_000, max: 10_000 },
            Rating::Medium => ViewRange { min: 100, max: 1_000 },
            Rating::Low => ViewRange { min: 10, max: 100 },
        }
    }
}

/// Estimated page-view range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRange {
    pub min: u32,
    pub max: u32,
}

/// Complete analysis result handed to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Weighted overall score (0-100).
    pub viral_score: u8,
    pub rating: Rating,
    pub scores: DimensionScores,
    pub improvements: Vec<Improvement>,
    pub strengths: Vec<String>,
    pub estimated_views: ViewRange,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Derive the report from a parsed model assessment.
    pub fn from_assessment(assessment: ModelAssessment, analyzed_at: DateTime<Utc>) -> Self {
        let viral_score = assessment.scores.viral_score();
        let rating = Rating::from_score(viral_score);
        Self {
            viral_score,
            rating,
            scores: assessment.scores,
            improvements: assessment.improvements,
            strengths: assessment.strengths,
            estimated_views: rating.estimated_views(),
            analyzed_at,
        }
    }
}

/// Pull the JSON document out of the model's response text.
///
/// Models sometimes wrap the document in a Markdown code fence despite the
/// JSON-only instruction; strip one if present, otherwise take the outermost
/// object literal.
fn extract_json(text: &str) -> &str {
    if let Some(start) = text.find("```") {
        let inner = &text[start + 3..];
        let inner = inner.strip_prefix("json").unwrap_or(inner);
        if let Some(end) = inner.find("```") {
            return inner[..end].trim();
        }
    }
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
        && start < end
    {
        return text[start..=end].trim();
    }
    text.trim()
}

/// Parse the model's response text into an assessment.
pub fn parse_assessment(text: &str) -> Result<ModelAssessment, BuzzlensError> {
    serde_json::from_str(extract_json(text)).map_err(|e| BuzzlensError::Provider {
        message: "model returned an unparseable analysis".to_string(),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(value: u8) -> DimensionScores {
        DimensionScores {
            title_score: value,
            hook_score: value,
            structure_score: value,
            readability_score: value,
            emotional_score: value,
            trend_score: value,
            length_score: value,
            visual_score: value,
        }
    }

    const SAMPLE: &str = r#"{
        "scores": {
            "titleScore": 85, "hookScore": 75, "structureScore": 80,
            "readabilityScore": 82, "emotionalScore": 70, "trendScore": 88,
            "lengthScore": 65, "visualScore": 73
        },
        "improvements": [
            {
                "category": "Title",
                "priority": "high",
                "suggestion": "Add a number",
                "impact": "More clicks"
            }
        ],
        "strengths": ["Clear structure", "Good hook"]
    }"#;

    #[test]
    fn uniform_scores_give_that_score() {
        assert_eq!(scores(80).viral_score(), 80);
        assert_eq!(scores(0).viral_score(), 0);
        assert_eq!(scores(100).viral_score(), 100);
    }

    #[test]
    fn viral_score_weights_title_and_hook_highest() {
        let mut s = scores(0);
        s.title_score = 100;
        assert_eq!(s.viral_score(), 20);
        let mut s = scores(0);
        s.length_score = 100;
        assert_eq!(s.viral_score(), 5);
    }

    #[test]
    fn rating_bands() {
        assert_eq!(Rating::from_score(85), Rating::Viral);
        assert_eq!(Rating::from_score(84), Rating::High);
        assert_eq!(Rating::from_score(70), Rating::High);
        assert_eq!(Rating::from_score(69), Rating::Medium);
        assert_eq!(Rating::from_score(50), Rating::Medium);
        assert_eq!(Rating::from_score(49), Rating::Low);
        assert_eq!(Rating::from_score(0), Rating::Low);
    }

    #[test]
    fn view_ranges_follow_bands() {
        assert_eq!(Rating::Viral.estimated_views().max, 100_000);
        assert_eq!(Rating::Low.estimated_views().min, 10);
    }

    #[test]
    fn parses_bare_json() {
        let assessment = parse_assessment(SAMPLE).unwrap();
        assert_eq!(assessment.scores.title_score, 85);
        assert_eq!(assessment.improvements.len(), 1);
        assert_eq!(assessment.improvements[0].priority, Priority::High);
        assert_eq!(assessment.strengths.len(), 2);
    }

    #[test]
    fn parses_json_in_code_fence() {
        let fenced = format!("Here is the analysis:\n```json\n{SAMPLE}\n```\n");
        let assessment = parse_assessment(&fenced).unwrap();
        assert_eq!(assessment.scores.trend_score, 88);
    }

    #[test]
    fn parses_json_in_anonymous_fence() {
        let fenced = format!("```\n{SAMPLE}\n```");
        assert!(parse_assessment(&fenced).is_ok());
    }

    #[test]
    fn parses_json_with_surrounding_prose() {
        let wrapped = format!("Sure! {SAMPLE} Hope this helps.");
        assert!(parse_assessment(&wrapped).is_ok());
    }

    #[test]
    fn unparseable_text_is_a_provider_error() {
        let err = parse_assessment("I cannot analyze this article.").unwrap_err();
        assert!(matches!(err, BuzzlensError::Provider { .. }));
    }

    #[test]
    fn report_derives_score_rating_and_views() {
        let assessment = parse_assessment(SAMPLE).unwrap();
        let now = Utc::now();
        let report = AnalysisReport::from_assessment(assessment, now);
        // 85*.2 + 75*.2 + 80*.1 + 82*.1 + 70*.15 + 88*.15 + 65*.05 + 73*.05 = 78.8
        assert_eq!(report.viral_score, 79);
        assert_eq!(report.rating, Rating::High);
        assert_eq!(report.estimated_views, ViewRange { min: 1_000, max: 10_000 });
        assert_eq!(report.analyzed_at, now);
    }

    #[test]
    fn missing_example_field_is_accepted() {
        let assessment = parse_assessment(SAMPLE).unwrap();
        assert!(assessment.improvements[0].example.is_none());
    }
}

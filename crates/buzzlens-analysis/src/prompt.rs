// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt construction for article analysis.
//!
//! The system prompt is a fixed rubric suitable for provider-side prompt
//! caching; only the user prompt varies per article.

use serde::{Deserialize, Serialize};

/// An article submitted for analysis.
///
/// Length and content validation happen at the web boundary, outside this
/// crate; the service takes the input as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleInput {
    /// Article title.
    pub title: String,
    /// Article body.
    pub content: String,
    /// Optional category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// System prompt: the scoring rubric and the exact JSON shape the model must
/// return. Kept stable so providers can cache it.
pub const SYSTEM_PROMPT: &str = r#"You are an expert at predicting how likely a blog article is to go viral. Analyze the article and respond with JSON only.

# Dimensions (score each 0-100)

1. **titleScore** - Title appeal (catchiness, specificity, use of numbers)
2. **hookScore** - Opening pull (first three lines, clarity of the problem posed)
3. **structureScore** - Structural quality (logical flow, effective headings)
4. **readabilityScore** - Readability (plain language, rhythm)
5. **emotionalScore** - Emotional appeal (storytelling, relatability)
6. **trendScore** - Timeliness (topicality, trending keywords, buzz factors)
7. **lengthScore** - Length fit (length versus substance, information density)
8. **visualScore** - Visual expression (heading craft, use of bullet lists)

# Output format

Return only the following JSON shape (no prose):

{
  "scores": {
    "titleScore": 85,
    "hookScore": 75,
    "structureScore": 80,
    "readabilityScore": 82,
    "emotionalScore": 70,
    "trendScore": 88,
    "lengthScore": 65,
    "visualScore": 73
  },
  "improvements": [
    {
      "category": "Title",
      "priority": "high",
      "suggestion": "Adding a concrete number makes the title more persuasive",
      "impact": "Click-through rate could improve by 20-30%",
      "example": "Include a specific figure such as \"$1,000/month\""
    }
  ],
  "strengths": [
    "The title contains a concrete number, which adds credibility",
    "The article structure is well organized and easy to follow"
  ]
}

Important: list 3-5 improvements ordered by priority and 2-4 strengths. priority must be one of "high", "medium", "low"."#;

/// Build the per-article user prompt.
pub fn build_user_prompt(article: &ArticleInput) -> String {
    format!(
        "# Article under analysis\n\nTitle: {}\n\nBody:\n{}",
        article.title, article.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_contains_title_and_body() {
        let article = ArticleInput {
            title: "How I saved $1,000".to_string(),
            content: "It started with a spreadsheet.".to_string(),
            category: None,
        };
        let prompt = build_user_prompt(&article);
        assert!(prompt.contains("How I saved $1,000"));
        assert!(prompt.contains("It started with a spreadsheet."));
    }

    #[test]
    fn system_prompt_names_all_eight_dimensions() {
        for key in [
            "titleScore",
            "hookScore",
            "structureScore",
            "readabilityScore",
            "emotionalScore",
            "trendScore",
            "lengthScore",
            "visualScore",
        ] {
            assert!(SYSTEM_PROMPT.contains(key), "missing {key}");
        }
    }
}

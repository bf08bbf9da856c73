//! Relevance Analyzer — owns the prompt contract and the defensive parsing
//! of model replies.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::GeminiClient;
use crate::screening::models::{AnalysisVerdict, Classification};
use crate::screening::prompts::{ANALYSIS_EXAMPLE, ANALYSIS_PROMPT_TEMPLATE};

/// Produces one validated verdict per (job description, resume) pair.
///
/// Total contract: `analyze` never fails. Any model or parse failure degrades
/// to [`AnalysisVerdict::fallback`], so callers always receive a fully
/// populated verdict.
///
/// Carried in `AppState` as `Arc<dyn RelevanceAnalyzer>` so tests can swap in
/// a deterministic fake.
#[async_trait]
pub trait RelevanceAnalyzer: Send + Sync {
    async fn analyze(&self, jd_text: &str, resume_text: &str) -> AnalysisVerdict;
}

/// Gemini-backed analyzer used in production. Stateless across calls —
/// no caching, no retry.
pub struct GeminiAnalyzer {
    client: GeminiClient,
}

impl GeminiAnalyzer {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RelevanceAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, jd_text: &str, resume_text: &str) -> AnalysisVerdict {
        let prompt = ANALYSIS_PROMPT_TEMPLATE
            .replace("{example}", ANALYSIS_EXAMPLE)
            .replace("{jd_text}", jd_text)
            .replace("{resume_text}", resume_text);

        match self.client.generate(&prompt).await {
            Ok(reply) => parse_verdict(&reply).unwrap_or_else(|e| {
                warn!("Unusable LLM reply, substituting fallback verdict: {e}");
                AnalysisVerdict::fallback()
            }),
            Err(e) => {
                warn!("LLM call failed, substituting fallback verdict: {e}");
                AnalysisVerdict::fallback()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum VerdictError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("reasoning must contain at least one entry")]
    EmptyReasoning,
}

/// Reply shape before validation. `classification` stays a free string here
/// so an unexpected label still parses and routes to the default bucket.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    classification: String,
    score: i64,
    reasoning: Vec<String>,
}

/// Strips surrounding whitespace and markdown code fences (``` or ```json)
/// from a model reply, leaving the bare payload for strict parsing.
fn normalize_reply(text: &str) -> &str {
    let text = text.trim();
    for fence in ["```json", "```"] {
        if let Some(inner) = text.strip_prefix(fence) {
            let inner = inner.trim_start();
            return inner.strip_suffix("```").map(str::trim).unwrap_or(inner);
        }
    }
    text
}

/// Normalizes, strictly parses, and validates one model reply.
///
/// Scores outside [0, 100] are clamped into range; an empty reasoning list is
/// rejected so every verdict carries at least one reason.
pub fn parse_verdict(reply: &str) -> Result<AnalysisVerdict, VerdictError> {
    let raw: RawVerdict = serde_json::from_str(normalize_reply(reply))?;

    if raw.reasoning.is_empty() {
        return Err(VerdictError::EmptyReasoning);
    }

    Ok(AnalysisVerdict {
        classification: Classification::from_label(&raw.classification),
        score: raw.score.clamp(0, 100) as u8,
        reasoning: raw.reasoning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_reply_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(normalize_reply(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_normalize_reply_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(normalize_reply(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_normalize_reply_no_fences() {
        let input = "  {\"key\": \"value\"}  ";
        assert_eq!(normalize_reply(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_normalize_reply_unterminated_fence() {
        let input = "```json\n{\"key\": \"value\"}";
        assert_eq!(normalize_reply(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_verdict_valid_reply() {
        let reply = r#"{"classification": "Relevant", "score": 72, "reasoning": ["Good overlap.", "Right seniority."]}"#;
        let verdict = parse_verdict(reply).unwrap();
        assert_eq!(verdict.classification, Classification::Relevant);
        assert_eq!(verdict.score, 72);
        assert_eq!(verdict.reasoning.len(), 2);
    }

    #[test]
    fn test_parse_verdict_fenced_reply() {
        let reply = "```json\n{\"classification\": \"Irrelevant\", \"score\": 10, \"reasoning\": [\"No overlap.\"]}\n```";
        let verdict = parse_verdict(reply).unwrap();
        assert_eq!(verdict.classification, Classification::Irrelevant);
        assert_eq!(verdict.score, 10);
    }

    #[test]
    fn test_parse_verdict_clamps_score_into_range() {
        let high = r#"{"classification": "Relevant", "score": 150, "reasoning": ["x"]}"#;
        assert_eq!(parse_verdict(high).unwrap().score, 100);

        let low = r#"{"classification": "Irrelevant", "score": -5, "reasoning": ["x"]}"#;
        assert_eq!(parse_verdict(low).unwrap().score, 0);
    }

    #[test]
    fn test_parse_verdict_unknown_label_routes_to_irrelevant() {
        let reply = r#"{"classification": "Maybe", "score": 55, "reasoning": ["Partial match."]}"#;
        let verdict = parse_verdict(reply).unwrap();
        assert_eq!(verdict.classification, Classification::Irrelevant);
        // Parsed score survives — only the routing defaults.
        assert_eq!(verdict.score, 55);
    }

    #[test]
    fn test_parse_verdict_rejects_prose() {
        assert!(parse_verdict("I could not analyze this resume, sorry.").is_err());
    }

    #[test]
    fn test_parse_verdict_rejects_missing_keys() {
        assert!(parse_verdict(r#"{"classification": "Relevant", "score": 80}"#).is_err());
        assert!(parse_verdict(r#"{"score": 80, "reasoning": ["x"]}"#).is_err());
    }

    #[test]
    fn test_parse_verdict_rejects_empty_reasoning() {
        let reply = r#"{"classification": "Relevant", "score": 80, "reasoning": []}"#;
        assert!(matches!(
            parse_verdict(reply),
            Err(VerdictError::EmptyReasoning)
        ));
    }

    /// The worked example shipped in the prompt must survive a round trip
    /// through the parser unchanged.
    #[test]
    fn test_worked_example_round_trips() {
        let verdict = parse_verdict(ANALYSIS_EXAMPLE).unwrap();
        assert_eq!(verdict.classification, Classification::Relevant);
        assert_eq!(verdict.score, 85);
        assert_eq!(verdict.reasoning.len(), 3);
        assert!(verdict.reasoning[0].contains("Python and Flask"));
    }

    #[test]
    fn test_prompt_template_has_all_placeholders() {
        for placeholder in ["{example}", "{jd_text}", "{resume_text}"] {
            assert!(
                ANALYSIS_PROMPT_TEMPLATE.contains(placeholder),
                "missing {placeholder}"
            );
        }
    }
}

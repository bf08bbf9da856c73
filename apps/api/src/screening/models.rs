//! Data model for the screening pipeline.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Binary relevance label for one resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Classification {
    Relevant,
    #[default]
    Irrelevant,
}

impl Classification {
    /// Maps a model-supplied label onto the closed two-way partition.
    /// Only the literal "Relevant" routes to the relevant bucket; every other
    /// value — lowercase variants, "Maybe", garbage — lands in the default.
    pub fn from_label(label: &str) -> Self {
        if label == "Relevant" {
            Classification::Relevant
        } else {
            Classification::Irrelevant
        }
    }
}

/// One uploaded document: a client-supplied file name plus its raw bytes.
/// Lives only for the duration of a single screening call.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub bytes: Bytes,
}

/// Validated verdict for one resume. Every analysis produces exactly one —
/// failures degrade to [`AnalysisVerdict::fallback`] rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisVerdict {
    pub classification: Classification,
    pub score: u8,
    pub reasoning: Vec<String>,
}

impl AnalysisVerdict {
    /// Fixed verdict substituted when the model call fails or its reply
    /// cannot be used. Score and reasoning are always populated.
    pub fn fallback() -> Self {
        Self {
            classification: Classification::Irrelevant,
            score: 0,
            reasoning: vec!["Failed to analyze the resume due to a processing error.".to_string()],
        }
    }
}

/// Per-resume entry in the final report. Classification is consumed to pick
/// the partition and not retained here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeResult {
    pub name: String,
    pub score: u8,
    pub reasoning: Vec<String>,
}

/// Final partitioned report. Every input resume lands in exactly one bucket,
/// in input order within that bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub relevant: Vec<ResumeResult>,
    pub irrelevant: Vec<ResumeResult>,
}

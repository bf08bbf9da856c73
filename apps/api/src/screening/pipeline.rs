//! Batch Orchestrator — one sequential pass over the resume set with
//! per-item failure isolation.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::screening::analyzer::RelevanceAnalyzer;
use crate::screening::models::{
    AnalysisVerdict, Classification, Document, ResumeResult, ScreeningReport,
};
use crate::storage::UploadStore;

/// Screens a resume batch against one job description.
///
/// Each resume is fully processed (stage → extract → analyze → cleanup)
/// before the next begins; no state crosses iterations except the two result
/// accumulators. Because the extractor and the analyzer are total, no single
/// resume can abort the batch. Results keep input order within each bucket.
pub async fn screen(
    store: &UploadStore,
    analyzer: &dyn RelevanceAnalyzer,
    jd: Document,
    resumes: Vec<Document>,
) -> Result<ScreeningReport, AppError> {
    let staged_jd = store
        .stage(&jd.name, &jd.bytes)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to stage job description: {e}")))?;
    let jd_text = extract_text(staged_jd.path());

    info!("Screening {} resumes against '{}'", resumes.len(), jd.name);

    let mut report = ScreeningReport::default();

    for resume in resumes {
        let verdict = process_resume(store, analyzer, &jd_text, &resume).await;

        info!("Analyzed '{}': score {}%", resume.name, verdict.score);

        let result = ResumeResult {
            name: resume.name,
            score: verdict.score,
            reasoning: verdict.reasoning,
        };
        match verdict.classification {
            Classification::Relevant => report.relevant.push(result),
            Classification::Irrelevant => report.irrelevant.push(result),
        }
    }

    staged_jd.remove().await;

    Ok(report)
}

/// Runs one resume through the pipeline and releases its staged file before
/// returning. This is the per-item isolation boundary: staging, extraction,
/// and analysis failures all collapse into a verdict here.
async fn process_resume(
    store: &UploadStore,
    analyzer: &dyn RelevanceAnalyzer,
    jd_text: &str,
    resume: &Document,
) -> AnalysisVerdict {
    let staged = match store.stage(&resume.name, &resume.bytes).await {
        Ok(staged) => staged,
        Err(e) => {
            warn!(
                "Failed to stage '{}', substituting fallback verdict: {e}",
                resume.name
            );
            return AnalysisVerdict::fallback();
        }
    };

    let resume_text = extract_text(staged.path());
    let verdict = analyzer.analyze(jd_text, &resume_text).await;

    staged.remove().await;

    verdict
}

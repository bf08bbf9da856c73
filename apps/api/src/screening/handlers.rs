//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::screening::models::{Document, ScreeningReport};
use crate::screening::pipeline::screen;
use crate::state::AppState;

/// POST /api/screen
///
/// Accepts one `jd` file field and one-or-more `resumes` file fields as
/// multipart form data. All fields are read into memory before the
/// missing-input check, so a rejected call performs no staging and leaves no
/// files behind. Unknown fields are drained and ignored.
pub async fn handle_screen(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let mut jd: Option<Document> = None;
    let mut resumes: Vec<Document> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "jd" => {
                let name = field.file_name().unwrap_or("jd.pdf").to_string();
                jd = Some(Document {
                    name,
                    bytes: field.bytes().await?,
                });
            }
            "resumes" => {
                let name = field.file_name().unwrap_or("resume.pdf").to_string();
                resumes.push(Document {
                    name,
                    bytes: field.bytes().await?,
                });
            }
            _ => {
                let _ = field.bytes().await?;
            }
        }
    }

    let Some(jd) = jd else {
        return Err(AppError::Validation(
            "Job description or resumes not provided".to_string(),
        ));
    };
    if resumes.is_empty() {
        return Err(AppError::Validation(
            "Job description or resumes not provided".to_string(),
        ));
    }

    info!("Files received. Starting analysis of {} resumes", resumes.len());

    let report = screen(&state.store, state.analyzer.as_ref(), jd, resumes).await?;

    info!(
        "Analysis complete: {} relevant, {} irrelevant",
        report.relevant.len(),
        report.irrelevant.len()
    );

    Ok(Json(report))
}

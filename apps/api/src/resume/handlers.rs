//! Axum route handlers for the Resume API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::resume::ResumeResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResumeRequest {
    pub user_description: String,
}

/// POST /api/v1/resumes/generate
///
/// Always answers 200 with the `{ data, error }` shape once the prompt is loaded;
/// upstream failures are reported in `error`.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<ResumeResult>, AppError> {
    if request.user_description.trim().is_empty() {
        return Err(AppError::Validation(
            "userDescription cannot be empty".to_string(),
        ));
    }

    let result = state.resumes.generate_resume(&request.user_description).await?;
    Ok(Json(result))
}

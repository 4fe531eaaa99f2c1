//! Axum route handlers for the Resume Parsing API.

use anyhow::Context;
use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};

use crate::convert::{convert_to_text, FileType};
use crate::errors::AppError;
use crate::parser::record::ResumeRecord;
use crate::state::AppState;

const DOWNLOAD_FILE_NAME: &str = "parsed_resume.json";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub resume_text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub download: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/parse
///
/// Parses plain resume text (already decoded) into a `ResumeRecord`.
pub async fn handle_parse(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
    Json(request): Json<ParseRequest>,
) -> Result<Response, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let record = parse_with_policy(&state, &request.resume_text).await?;
    render_record(&record, query.download)
}

/// POST /api/v1/resumes/upload
///
/// Multipart upload: `file` (required) plus optional `file_type` overriding
/// the extension-derived type.
pub async fn handle_upload(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut type_override: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                upload = Some((file_name, data));
            }
            Some("file_type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file_type: {e}")))?;
                type_override = Some(value);
            }
            _ => {}
        }
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let file_type = match type_override.as_deref() {
        Some(value) => FileType::parse(value),
        None => FileType::from_file_name(&file_name),
    }
    .ok_or_else(|| {
        AppError::UnsupportedMediaType(format!(
            "Cannot determine a supported file type for '{file_name}' (expected pdf, docx, txt or md)"
        ))
    })?;

    info!(file_type = %file_type, bytes = data.len(), "Resume upload received");

    let text = convert_to_text(data.to_vec(), file_type).await?;
    let record = parse_with_policy(&state, &text).await?;
    render_record(&record, query.download)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Parses `text`, applying the configured policy for tagger failures.
async fn parse_with_policy(state: &AppState, text: &str) -> Result<ResumeRecord, AppError> {
    let record = match state.parser.parse(text).await {
        Ok(record) => record,
        Err(e) if state.config.allow_degraded_records => {
            warn!(error = %e, "Entity tagger failed; returning record without a name");
            state.parser.assemble(text, &[])
        }
        Err(e) => return Err(e.into()),
    };
    let summary = record.summary();
    info!(
        personal_fields = summary.personal_fields,
        skills = summary.skills,
        work_experience = summary.work_experience,
        education = summary.education,
        projects = summary.projects,
        certifications = summary.certifications,
        "Resume parsed"
    );
    Ok(record)
}

fn render_record(record: &ResumeRecord, download: bool) -> Result<Response, AppError> {
    if !download {
        return Ok(Json(record).into_response());
    }

    let body = serde_json::to_string_pretty(record).context("Failed to serialize record")?;
    let disposition = format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

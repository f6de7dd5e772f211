//! Video-analysis job endpoints: upload, start, sample run, status.

use std::path::{Path as FsPath, PathBuf};

use axum::Json;
use axum::extract::{Multipart, Path, State};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use fleetpulse_core::error::AppError;
use fleetpulse_entity::video::VideoJob;

use crate::dto::request::ProcessSampleRequest;
use crate::dto::response::{ProcessStartedResponse, UploadResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Bus attributed to uploads that carry no `busId` field.
const DEFAULT_BUS_ID: &str = "BUS-001";

/// POST /api/video/upload — multipart clip upload
///
/// Persists the clip under the configured upload directory and registers
/// a job in `Uploaded`; processing starts only on an explicit request.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut bus_id: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "busId" => {
                bus_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "video" => {
                file_name = field.file_name().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::validation("No video file provided"))?;
    let bus_id = bus_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_BUS_ID.to_string());

    let clip_path = clip_destination(&state.config.storage.upload_dir, file_name.as_deref());
    if let Some(parent) = clip_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create upload dir: {e}")))?;
    }
    tokio::fs::write(&clip_path, &data)
        .await
        .map_err(|e| AppError::storage(format!("Failed to persist clip: {e}")))?;

    let job = state.registry.create(&bus_id, clip_path);
    info!(job_id = %job.id, bus_id = %job.bus_id, bytes = data.len(), "Video clip uploaded");

    Ok(Json(UploadResponse {
        job_id: job.id,
        message: "Video uploaded successfully".to_string(),
        bus_id,
    }))
}

/// POST /api/video/process/{jobId}
pub async fn start_processing(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<ProcessStartedResponse>, ApiError> {
    let job = state.supervisor.start(&job_id)?;

    Ok(Json(ProcessStartedResponse {
        message: "Video processing started".to_string(),
        job_id: job.id,
    }))
}

/// POST /api/video/process-sample
///
/// Runs the bundled sample clip through the worker, so the dashboard can
/// be demonstrated without a camera upload.
pub async fn process_sample(
    State(state): State<AppState>,
    payload: Option<Json<ProcessSampleRequest>>,
) -> Result<Json<UploadResponse>, ApiError> {
    let bus_id = payload
        .and_then(|Json(p)| p.bus_id)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_BUS_ID.to_string());

    let sample_path = PathBuf::from(&state.config.storage.sample_clip);
    let exists = tokio::fs::try_exists(&sample_path)
        .await
        .map_err(|e| AppError::storage(format!("Failed to probe sample clip: {e}")))?;
    if !exists {
        return Err(AppError::not_found("Sample video not found").into());
    }

    let job = state.registry.create_sample(&bus_id, sample_path);
    let job = state.supervisor.start(&job.id)?;

    Ok(Json(UploadResponse {
        job_id: job.id,
        message: "Sample video processing started".to_string(),
        bus_id,
    }))
}

/// GET /api/video/status/{jobId}
pub async fn job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<VideoJob>, ApiError> {
    let job = state
        .registry
        .get(&job_id)
        .ok_or_else(|| AppError::not_found("Job not found"))?;
    Ok(Json(job))
}

/// Unique destination path for an uploaded clip, keeping the original
/// extension so the worker can sniff the container format.
fn clip_destination(upload_dir: &str, original_name: Option<&str>) -> PathBuf {
    let extension = original_name
        .and_then(|n| FsPath::new(n).extension())
        .and_then(|e| e.to_str())
        .unwrap_or("mp4");
    FsPath::new(upload_dir).join(format!("{}.{extension}", Uuid::new_v4()))
}

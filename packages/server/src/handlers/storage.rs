use std::collections::BTreeMap;

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, body::Body};
use chrono::{SecondsFormat, Utc};
use common::storage::key::generate_key;
use common::storage::{ObjectInfo, ObjectStore, PutOptions};
use sha2::{Digest, Sha256};
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::config::UploadConfig;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::storage::{
    DeleteRequest, DeleteResponse, HealthResponse, ImageDetailResponse, ImageListResponse,
    ImageSummary, UploadResponse,
};
use crate::state::AppState;
use crate::utils::filename::validate_folder;

const BYTES_PER_MB: u64 = 1024 * 1024;

pub fn upload_body_limit(upload: &UploadConfig) -> DefaultBodyLimit {
    DefaultBodyLimit::max(upload.body_limit)
}

/// `"File too large. Max size: 10MB"` for the configured limit.
pub fn too_large_message(max_file_size: u64) -> String {
    format!("File too large. Max size: {}MB", max_file_size / BYTES_PER_MB)
}

/// `"Invalid file type. Allowed: jpg, png, webp, gif"` for the configured types.
pub fn invalid_type_message(allowed_types: &[String]) -> String {
    let labels: Vec<&str> = allowed_types
        .iter()
        .map(|t| match t.rsplit_once('/').map_or(t.as_str(), |(_, sub)| sub) {
            "jpeg" => "jpg",
            sub => sub,
        })
        .collect();
    format!("Invalid file type. Allowed: {}", labels.join(", "))
}

/// A `file` part read off the multipart stream. Bytes past the size limit are
/// counted but not buffered.
struct IncomingFile {
    name: String,
    content_type: Option<String>,
    size: u64,
    data: Vec<u8>,
}

fn multipart_error(err: MultipartError, upload: &UploadConfig) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Validation(too_large_message(upload.max_file_size))
    } else {
        AppError::Validation(format!("Multipart error: {}", err.body_text()))
    }
}

async fn read_file_field(
    mut field: Field<'_>,
    upload: &UploadConfig,
) -> Result<IncomingFile, AppError> {
    let name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);

    let mut size: u64 = 0;
    let mut data = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, upload))?
    {
        size += chunk.len() as u64;
        if size <= upload.max_file_size {
            data.extend_from_slice(&chunk);
        }
    }

    Ok(IncomingFile {
        name,
        content_type,
        size,
        data,
    })
}

fn etag_for(info: &ObjectInfo) -> String {
    let digest = Sha256::digest(format!(
        "{}:{}:{}",
        info.key,
        info.size,
        info.uploaded.to_rfc3339()
    ));
    format!("\"{}\"", hex::encode(digest))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Storage",
    operation_id = "health",
    summary = "Health check",
    description = "Reports liveness and the bucket this server fronts. Accepts any method.",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        bucket: state.config.storage.bucket_name.clone(),
    })
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Storage",
    operation_id = "uploadImage",
    summary = "Upload an image",
    description = "Stores an image under a generated key `{folder}/{millis}-{suffix}.{ext}`. \
        The `file` multipart field is required; `folder` defaults to `artworks`. \
        Validation runs in order: presence, content type, size, folder.",
    request_body(content_type = "multipart/form-data", description = "Image file with optional folder"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Missing file, disallowed type, too large or invalid folder", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = &state.config.upload;
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Upload without a multipart body");
        AppError::Validation("No file provided".into())
    })?;

    let mut file: Option<IncomingFile> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, upload))?
    {
        match field.name() {
            Some("file") => file = Some(read_file_field(field, upload).await?),
            Some("folder") => {
                folder = Some(field.text().await.map_err(|e| multipart_error(e, upload))?);
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let file = file
        .filter(|f| !(f.name.is_empty() && f.size == 0))
        .ok_or_else(|| AppError::Validation("No file provided".into()))?;

    let content_type = file
        .content_type
        .as_deref()
        .and_then(|ct| {
            upload
                .allowed_types
                .iter()
                .find(|allowed| allowed.eq_ignore_ascii_case(ct))
        })
        .cloned()
        .ok_or_else(|| AppError::Validation(invalid_type_message(&upload.allowed_types)))?;

    if file.size > upload.max_file_size {
        return Err(AppError::Validation(too_large_message(upload.max_file_size)));
    }

    let folder = match folder.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        Some(requested) => validate_folder(requested)
            .map_err(|e| {
                tracing::warn!(folder = requested, reason = e.message(), "Rejected upload folder");
                AppError::Validation("Invalid folder".into())
            })?
            .to_string(),
        None => upload.default_folder.clone(),
    };

    let key = generate_key(&folder, &file.name);
    let custom_metadata = BTreeMap::from([
        ("originalName".to_string(), file.name.clone()),
        (
            "uploadedAt".to_string(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
    ]);

    let info = state
        .store
        .put(
            &key,
            file.data,
            PutOptions {
                content_type: Some(content_type.clone()),
                custom_metadata,
            },
        )
        .await?;

    tracing::info!(key = %info.key, size = info.size, "Image uploaded");

    Ok(Json(UploadResponse {
        success: true,
        url: state.config.storage.public_url_for(&info.key),
        filename: info.key,
        size: info.size,
        content_type,
    }))
}

#[utoipa::path(
    delete,
    path = "/delete",
    tag = "Storage",
    operation_id = "deleteImage",
    summary = "Delete an image",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Image deleted", body = DeleteResponse),
        (status = 400, description = "Missing filename or malformed body", body = ErrorBody),
        (status = 404, description = "File not found", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn delete(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DeleteRequest>,
) -> Result<Json<DeleteResponse>, AppError> {
    let filename = payload
        .filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Validation("No filename provided".into()))?;

    if !state.store.exists(&filename).await? {
        return Err(AppError::NotFound("File not found".into()));
    }

    state.store.delete(&filename).await?;
    tracing::info!(key = %filename, "Image deleted");

    Ok(Json(DeleteResponse {
        success: true,
        deleted: filename,
    }))
}

#[utoipa::path(
    get,
    path = "/list",
    tag = "Storage",
    operation_id = "listImages",
    summary = "List gallery images",
    description = "Returns every object under the gallery prefix, ordered by key. Not paginated.",
    responses(
        (status = 200, description = "Images under the gallery prefix", body = ImageListResponse),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ImageListResponse>, AppError> {
    let objects = state.store.list(&state.config.upload.list_prefix).await?;
    let images: Vec<ImageSummary> = objects
        .into_iter()
        .map(|info| {
            let url = state.config.storage.public_url_for(&info.key);
            ImageSummary::from_info(info, url)
        })
        .collect();

    Ok(Json(ImageListResponse {
        count: images.len(),
        images,
    }))
}

#[utoipa::path(
    get,
    path = "/image/{filename}",
    tag = "Storage",
    operation_id = "getImage",
    summary = "Get image metadata",
    params(("filename" = String, Path, description = "Object key; may contain '/'")),
    responses(
        (status = 200, description = "Object metadata", body = ImageDetailResponse),
        (status = 404, description = "Image not found", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<ImageDetailResponse>, AppError> {
    let info = state
        .store
        .head(&filename)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))?;

    let url = state.config.storage.public_url_for(&info.key);
    Ok(Json(ImageDetailResponse::from_info(info, url)))
}

#[utoipa::path(
    get,
    path = "/files/{key}",
    tag = "Storage",
    operation_id = "serveImage",
    summary = "Serve image bytes",
    description = "Streams the stored object. Keys are immutable, so responses are cacheable \
        indefinitely and conditional requests with `If-None-Match` are honoured.",
    params(("key" = String, Path, description = "Object key; may contain '/'")),
    responses(
        (status = 200, description = "Object bytes"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "Image not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn serve_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(info) = state.store.head(&key).await? else {
        return Err(AppError::NotFound("Image not found".into()));
    };

    let etag_value = etag_for(&info);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let (info, reader) = state
        .store
        .get_stream(&key)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let content_type = info
        .http_metadata
        .content_type
        .clone()
        .unwrap_or_else(|| mime_guess::from_path(&key).first_or_octet_stream().to_string());

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, info.size.to_string())
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

/// Fallback for unmatched paths and methods.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

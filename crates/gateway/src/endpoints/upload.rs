//! # POST /api/upload
//!
//! multipartの `video` フィールドで受け取った動画を `videos/<ファイル名>` に保存する。

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use vidstore_types::*;

use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::validation::validate_video_file_name;

/// multipartから取り出したアップロードファイル。
/// リクエスト処理中のみメモリに保持する。
#[derive(Debug)]
pub struct UploadedFile {
    /// Content-Dispositionのfilename
    pub file_name: String,
    /// 宣言されたContent-Type
    pub content_type: String,
    /// multipartから読み取ったバッファをそのまま保持する
    pub data: Bytes,
}

/// POST /api/upload — 動画アップロード。
///
/// 検証順序: ファイルの有無 → ファイル名形式。
/// どちらかに失敗した場合、ストレージは呼び出さない。
/// 同じファイル名での再アップロードは上書きになる。
pub async fn handle_upload(
    State(state): State<Arc<GatewayState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, GatewayError> {
    // multipart以外のボディはファイルなしとして扱う
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "multipartとして解釈できないリクエスト");
        GatewayError::MissingFile
    })?;

    let file = extract_video_file(multipart)
        .await?
        .ok_or(GatewayError::MissingFile)?;

    validate_video_file_name(&file.file_name)?;

    let key = video_object_key(&file.file_name);
    let url = state
        .storage
        .put_object(&key, &file.data, &file.content_type)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, key = %key, "S3へのアップロードに失敗");
            GatewayError::StorageWrite
        })?;

    tracing::info!(
        key = %key,
        size = file.data.len(),
        content_type = %file.content_type,
        "動画をアップロードしました"
    );

    Ok(Json(UploadResponse {
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        url,
    }))
}

/// multipartから `video` ファイルを1つ取り出す。
///
/// - filenameを持たない `video` フィールドはテキストフィールドとみなして無視する
/// - 空のファイルはファイルなしとして扱う
/// - `video` 以外のフィールドは無視する
/// - `video` ファイルが複数ある場合はBadRequest
pub async fn extract_video_file(
    mut multipart: Multipart,
) -> Result<Option<UploadedFile>, GatewayError> {
    let mut found: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() != Some(VIDEO_FIELD_NAME) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if found.is_some() {
            return Err(GatewayError::BadRequest(format!(
                "Only one file is allowed in the '{VIDEO_FIELD_NAME}' field"
            )));
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await.map_err(read_error)?;

        found = Some(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }

    Ok(found.filter(|file| !file.data.is_empty()))
}

fn read_error(e: axum::extract::multipart::MultipartError) -> GatewayError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge
    } else {
        GatewayError::BadRequest(format!("Failed to read multipart: {}", e.body_text()))
    }
}

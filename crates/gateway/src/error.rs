//! # Gateway エラー型
//!
//! 全エンドポイントで共通のエラー型。
//! レスポンスボディには固定メッセージのみを載せ、ストレージの詳細は含めない。

use axum::http::StatusCode;
use axum::Json;
use vidstore_types::ErrorResponse;

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// `video` フィールドにファイルが含まれていない
    #[error("No file uploaded")]
    MissingFile,
    /// ファイル名が `<14桁>-<14桁>.mp4` 形式でない
    #[error("Invalid file name format. Use format DDMMYYYYHHMMSS-DDMMYYYYHHMMSS.mp4")]
    InvalidFileName,
    /// 不正なリクエスト（multipartのパース失敗等）
    #[error("{0}")]
    BadRequest(String),
    /// リクエストボディが上限を超えた
    #[error("File too large")]
    PayloadTooLarge,
    /// 未定義のパス
    #[error("Not found")]
    NotFound,
    /// パスに対して許可されていないメソッド
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// ストレージへの書き込みに失敗
    #[error("Failed to upload to AWS S3")]
    StorageWrite,
    /// ストレージの一覧取得に失敗
    #[error("Failed to fetch videos from AWS S3")]
    StorageList,
}

impl GatewayError {
    /// エラーに対応するHTTPステータス。
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingFile
            | GatewayError::InvalidFileName
            | GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::StorageWrite | GatewayError::StorageList => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

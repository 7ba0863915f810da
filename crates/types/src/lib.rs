//! # Vidstore 共有型定義
//!
//! GatewayのHTTP APIでやり取りするJSONボディをRust構造体として提供する。
//!
//! ## 規則
//! - 成功・失敗ともにレスポンスは常にJSON
//! - 失敗時のボディは `ErrorResponse`（`message` のみ）

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 定数
// ---------------------------------------------------------------------------

/// 動画オブジェクトを格納するキーのプレフィックス。
pub const VIDEO_KEY_PREFIX: &str = "videos/";

/// アップロード時にファイルを受け取るmultipartフィールド名。
pub const VIDEO_FIELD_NAME: &str = "video";

/// アップロード成功時のメッセージ。
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Uploaded successfully to AWS";

/// ファイル名からストレージキーを組み立てる。
pub fn video_object_key(file_name: &str) -> String {
    format!("{VIDEO_KEY_PREFIX}{file_name}")
}

// ---------------------------------------------------------------------------
// POST /api/upload
// ---------------------------------------------------------------------------

/// アップロード成功レスポンス。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// 結果メッセージ
    pub message: String,
    /// 保存先オブジェクトの公開URL
    pub url: String,
}

// ---------------------------------------------------------------------------
// GET /api/videos
// ---------------------------------------------------------------------------

/// 保存済み動画の一覧要素。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    /// オブジェクトキー（例: `videos/20240101120000-20240101130000.mp4`）
    pub name: String,
    /// 公開URL
    pub url: String,
}

/// 動画一覧レスポンス。
/// 要素の順序はストレージのリスト順のまま。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoListResponse {
    pub videos: Vec<VideoEntry>,
}

// ---------------------------------------------------------------------------
// エラー
// ---------------------------------------------------------------------------

/// 全エンドポイント共通のエラーレスポンス。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

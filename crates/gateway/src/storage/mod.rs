//! # 動画ストレージ
//!
//! エンドポイントとオブジェクトストレージの間の抽象インターフェース。
//! S3互換ストレージ実装は `s3` サブモジュールを参照。

pub mod s3;

pub use s3::{S3StorageConfig, S3VideoStorage};

/// ストレージ操作のエラー。
/// どの種類もエンドポイント側では同一の失敗として扱われる。
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// リクエスト送信・レスポンス読み取りの失敗
    #[error("ストレージへのリクエストに失敗: {0}")]
    Request(String),
    /// ストレージが成功以外のHTTPステータスを返した
    #[error("ストレージがエラーを返しました: HTTP {status}")]
    Status { status: u16 },
}

/// 一覧取得結果。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectListing {
    /// オブジェクトキー（ストレージの返却順）
    pub keys: Vec<String>,
    /// ストレージ側で結果が打ち切られているか
    pub truncated: bool,
}

/// 動画ストレージの抽象インターフェース。
///
/// 実装はAWS S3やMinIO等のS3互換ストレージを想定する。
/// リトライは行わず、失敗はそのまま呼び出し元に返す。
#[async_trait::async_trait]
pub trait VideoStorage: Send + Sync {
    /// オブジェクトを書き込み、公開URLを返す。
    /// 同一キーへの書き込みは上書きになる。
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// バケット全体のオブジェクトを1ページ分取得する。
    async fn list_objects(&self) -> Result<ObjectListing, StorageError>;

    /// キーから公開URLを組み立てる。
    fn public_url(&self, key: &str) -> String;
}

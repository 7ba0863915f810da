//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。

use std::path::PathBuf;

use crate::identity::IdentityPlatform;
use crate::storage::{S3StorageConfig, VideoStorage};

/// デフォルトの待ち受けポート
pub const DEFAULT_PORT: u16 = 5000;

/// デフォルトのアップロード最大サイズ（2GB）
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024 * 1024;

/// デフォルトのサービスアカウント記述子パス
pub const DEFAULT_SERVICE_ACCOUNT_PATH: &str = "config/service-account-key.json";

/// 起動時に一度だけ読み込むGateway設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// 待ち受けポート（`PORT`）
    pub port: u16,
    /// リクエストボディの上限（`MAX_UPLOAD_BYTES`）
    pub max_upload_bytes: usize,
    /// S3接続設定（`AWS_*`）
    pub storage: S3StorageConfig,
    /// サービスアカウント記述子のパス（`FIREBASE_SERVICE_ACCOUNT`）
    pub service_account_path: PathBuf,
    /// 認証基盤のストレージバケットID（`FIREBASE_STORAGE_BUCKET`）
    pub identity_storage_bucket: String,
}

impl GatewayConfig {
    /// プロセスの環境変数から構築する。
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の変数ソースから構築する。
    /// 空文字列の変数は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &str| {
            get(name).ok_or_else(|| anyhow::anyhow!("{name}が設定されていません"))
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORTが不正です ({raw}): {e}"))?,
            None => DEFAULT_PORT,
        };

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| anyhow::anyhow!("MAX_UPLOAD_BYTESが不正です ({raw}): {e}"))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let storage = S3StorageConfig {
            bucket_name: require("AWS_BUCKET_NAME")?,
            region: require("AWS_REGION")?,
            access_key: get("AWS_ACCESS_KEY_ID"),
            secret_key: get("AWS_SECRET_ACCESS_KEY"),
            endpoint: get("AWS_ENDPOINT_URL"),
        };

        let service_account_path = get("FIREBASE_SERVICE_ACCOUNT")
            .unwrap_or_else(|| DEFAULT_SERVICE_ACCOUNT_PATH.to_string())
            .into();

        Ok(Self {
            port,
            max_upload_bytes,
            storage,
            service_account_path,
            identity_storage_bucket: require("FIREBASE_STORAGE_BUCKET")?,
        })
    }
}

/// Gatewayの共有状態。
/// 起動時に構築し、各ハンドラに `State` として渡す。
pub struct GatewayState {
    /// 動画ストレージ（S3互換等、トレイトで抽象化）
    pub storage: Box<dyn VideoStorage>,
    /// 認証基盤ハンドル（起動時に初期化のみ）
    pub identity: IdentityPlatform,
}

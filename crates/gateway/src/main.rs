//! # Vidstore Gateway
//!
//! 動画ファイルのアップロードを受け付けてS3に保存し、保存済み動画の一覧を返すGateway。
//!
//! ## 役割
//! - ファイル名形式（`<14桁>-<14桁>.mp4`）の検証
//! - S3互換ストレージへの書き込みと一覧取得
//! - 起動時の認証基盤（サービスアカウント）初期化
//!
//! ## API エンドポイント
//! - `POST /api/upload` — multipartの `video` フィールドで動画をアップロード
//! - `GET /api/videos` — 保存済み動画の一覧
//!
//! ## モジュール構成
//! - `config` — 環境変数からの設定読み込み・共有状態
//! - `error` — エラー型
//! - `identity` — 認証基盤の初期化
//! - `storage` — 動画ストレージトレイトとS3実装
//! - `validation` — ファイル名検証
//! - `endpoints` — 各エンドポイントのハンドラ

mod config;
mod endpoints;
mod error;
mod identity;
mod storage;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::{GatewayConfig, GatewayState};
use endpoints::*;
use error::GatewayError;
use identity::IdentityPlatform;
use storage::S3VideoStorage;

/// ルーターを構築する。
/// 全オリジンからのクロスオリジンリクエストを許可する。
pub(crate) fn build_router(state: Arc<GatewayState>, max_upload_bytes: usize) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    axum::Router::new()
        .route(
            "/api/upload",
            axum::routing::post(handle_upload).fallback(method_not_allowed),
        )
        .route(
            "/api/videos",
            axum::routing::get(handle_list_videos).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> GatewayError {
    GatewayError::NotFound
}

async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .envは任意
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), ".envを読み込みました");
    }

    let config = GatewayConfig::from_env()?;

    // 認証基盤（起動時に初期化のみ）
    let identity =
        IdentityPlatform::initialize(&config.service_account_path, &config.identity_storage_bucket)?;

    // 動画ストレージ（S3互換）
    let storage = S3VideoStorage::new(config.storage.clone())?;
    tracing::info!(
        bucket = %config.storage.bucket_name,
        region = %config.storage.region,
        endpoint = config.storage.endpoint.as_deref().unwrap_or("aws"),
        "S3ストレージを設定"
    );

    let state = Arc::new(GatewayState {
        storage: Box::new(storage),
        identity,
    });
    tracing::info!(
        project_id = %state.identity.project_id(),
        client_email = %state.identity.client_email(),
        storage_bucket = %state.identity.storage_bucket(),
        "認証基盤を初期化しました"
    );

    let app = build_router(state, config.max_upload_bytes);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Gatewayを {} で起動します", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------

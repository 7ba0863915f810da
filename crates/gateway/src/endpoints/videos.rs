//! # GET /api/videos
//!
//! バケット内のオブジェクト一覧を `{name, url}` の配列として返す。

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use vidstore_types::*;

use crate::config::GatewayState;
use crate::error::GatewayError;

/// GET /api/videos — 動画一覧。
///
/// 並び順はストレージの返却順のまま。ページングは行わず、
/// ストレージが結果を打ち切った場合もその分だけを返す。
pub async fn handle_list_videos(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<VideoListResponse>, GatewayError> {
    let listing = state.storage.list_objects().await.map_err(|e| {
        tracing::error!(error = %e, "S3からの一覧取得に失敗");
        GatewayError::StorageList
    })?;

    if listing.truncated {
        tracing::warn!(
            returned = listing.keys.len(),
            "一覧がストレージ側で打ち切られています。続きは返却されません"
        );
    }

    let videos = listing
        .keys
        .into_iter()
        .map(|key| VideoEntry {
            url: state.storage.public_url(&key),
            name: key,
        })
        .collect();

    Ok(Json(VideoListResponse { videos }))
}

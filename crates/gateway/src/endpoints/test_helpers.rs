//! # エンドポイントテスト用共通ヘルパー
//!
//! upload, videosテストで共有するモックストレージとGateway起動処理。

use std::sync::{Arc, Mutex};

use crate::config::GatewayState;
use crate::identity::{test_descriptor, IdentityPlatform};
use crate::storage::{ObjectListing, S3StorageConfig, StorageError, VideoStorage};

/// モックに保存されたオブジェクト。
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
struct MockInner {
    /// 挿入順を保持する
    objects: Vec<StoredObject>,
    put_calls: usize,
    fail_put: bool,
    fail_list: bool,
    truncated: bool,
}

/// テスト用のインメモリ動画ストレージ。
/// S3への接続なしで書き込み・一覧を再現し、呼び出し回数を記録する。
#[derive(Clone)]
pub struct MockStorage {
    inner: Arc<Mutex<MockInner>>,
    urls: S3StorageConfig,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            inner: Arc::default(),
            urls: S3StorageConfig {
                bucket_name: "test-bucket".to_string(),
                region: "ap-south-1".to_string(),
                access_key: None,
                secret_key: None,
                endpoint: None,
            },
        }
    }

    pub fn insert(&self, key: &str, data: &[u8]) {
        self.inner.lock().unwrap().objects.push(StoredObject {
            key: key.to_string(),
            data: data.to_vec(),
            content_type: "video/mp4".to_string(),
        });
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        let inner = self.inner.lock().unwrap();
        inner.objects.iter().find(|o| o.key == key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().objects.len()
    }

    pub fn put_calls(&self) -> usize {
        self.inner.lock().unwrap().put_calls
    }

    pub fn fail_put(&self, fail: bool) {
        self.inner.lock().unwrap().fail_put = fail;
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn set_truncated(&self, truncated: bool) {
        self.inner.lock().unwrap().truncated = truncated;
    }
}

#[async_trait::async_trait]
impl VideoStorage for MockStorage {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let mut inner = self.inner.lock().unwrap();
        inner.put_calls += 1;
        if inner.fail_put {
            return Err(StorageError::Request("mock: connection refused".to_string()));
        }

        let object = StoredObject {
            key: key.to_string(),
            data: data.to_vec(),
            content_type: content_type.to_string(),
        };
        match inner.objects.iter_mut().find(|o| o.key == key) {
            Some(existing) => *existing = object,
            None => inner.objects.push(object),
        }
        Ok(self.public_url(key))
    }

    async fn list_objects(&self) -> Result<ObjectListing, StorageError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_list {
            return Err(StorageError::Status { status: 403 });
        }
        Ok(ObjectListing {
            keys: inner.objects.iter().map(|o| o.key.clone()).collect(),
            truncated: inner.truncated,
        })
    }

    fn public_url(&self, key: &str) -> String {
        self.urls.object_url(key)
    }
}

/// テスト用GatewayStateを構築するヘルパー
pub fn test_state(storage: MockStorage) -> Arc<GatewayState> {
    Arc::new(GatewayState {
        storage: Box::new(storage),
        identity: IdentityPlatform::from_json(&test_descriptor(), "skoegle-iot.appspot.com")
            .unwrap(),
    })
}

/// Gatewayをランダムポートで起動し、ベースURLを返す。
pub async fn start_gateway(storage: MockStorage) -> String {
    start_gateway_with_limit(storage, 16 * 1024 * 1024).await
}

/// ボディ上限を指定してGatewayを起動する。
pub async fn start_gateway_with_limit(storage: MockStorage, max_upload_bytes: usize) -> String {
    let app = crate::build_router(test_state(storage), max_upload_bytes);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    format!("http://127.0.0.1:{port}")
}

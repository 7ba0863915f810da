//! # S3互換 動画ストレージ実装
//!
//! AWS S3, MinIO 等のS3互換APIを使用する動画ストレージ実装。

use super::{ObjectListing, StorageError, VideoStorage};

/// S3接続設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3StorageConfig {
    /// バケット名
    pub bucket_name: String,
    /// リージョン（例: `ap-northeast-1`）
    pub region: String,
    /// アクセスキーID。未設定ならデフォルトの認証情報チェーンを使う。
    pub access_key: Option<String>,
    /// シークレットアクセスキー
    pub secret_key: Option<String>,
    /// S3互換エンドポイント（MinIO等）。Noneの場合はAWS S3。
    pub endpoint: Option<String>,
}

impl S3StorageConfig {
    /// キーから公開URLを組み立てる。
    ///
    /// - AWS: `https://<bucket>.s3.<region>.amazonaws.com/<key>`
    /// - S3互換エンドポイント: `<endpoint>/<bucket>/<key>`（パススタイル）
    pub fn object_url(&self, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!(
                "{}/{}/{}",
                endpoint.trim_end_matches('/'),
                self.bucket_name,
                key
            ),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket_name, self.region, key
            ),
        }
    }
}

/// S3互換ストレージによる動画ストレージ実装。
pub struct S3VideoStorage {
    bucket: s3::Bucket,
    config: S3StorageConfig,
}

impl S3VideoStorage {
    /// 設定からバケットハンドルを初期化する。
    /// ネットワークアクセスは発生しない。
    pub fn new(config: S3StorageConfig) -> anyhow::Result<Self> {
        let bucket = Self::init_bucket(&config)?;
        Ok(Self { bucket, config })
    }

    fn init_bucket(config: &S3StorageConfig) -> anyhow::Result<s3::Bucket> {
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", config.region));
        let region = s3::Region::Custom {
            region: config.region.clone(),
            endpoint,
        };

        let credentials = match (&config.access_key, &config.secret_key) {
            (Some(access_key), Some(secret_key)) => s3::creds::Credentials::new(
                Some(access_key.as_str()),
                Some(secret_key.as_str()),
                None,
                None,
                None,
            )?,
            _ => {
                tracing::info!("静的な認証情報が未設定です。デフォルトの認証情報チェーンを使用します");
                s3::creds::Credentials::default()?
            }
        };

        let bucket = s3::Bucket::new(&config.bucket_name, region, credentials)?;
        // カスタムエンドポイントはバケット名のサブドメインを解決できないことが多い
        let bucket = if config.endpoint.is_some() {
            bucket.with_path_style()
        } else {
            bucket
        };

        Ok(*bucket)
    }
}

fn check_status(status: u16) -> Result<(), StorageError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(StorageError::Status { status })
    }
}

#[async_trait::async_trait]
impl VideoStorage for S3VideoStorage {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let response = self
            .bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        check_status(response.status_code())?;

        Ok(self.public_url(key))
    }

    async fn list_objects(&self) -> Result<ObjectListing, StorageError> {
        // 継続トークンは辿らない。1ページ目のみを返す。
        let (page, status) = self
            .bucket
            .list_page(String::new(), None, None, None, None)
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        check_status(status)?;

        Ok(ObjectListing {
            keys: page.contents.into_iter().map(|object| object.key).collect(),
            truncated: page.is_truncated,
        })
    }

    fn public_url(&self, key: &str) -> String {
        self.config.object_url(key)
    }
}

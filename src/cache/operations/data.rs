use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::Mutex;

use crate::cache::models::data::{CacheEntry, DataItem, DataPayload};
use crate::error::StoreError;
use crate::utils::random_value;

const ITEM_COUNT: u32 = 5;
const VALUE_LEN: usize = 6;

/// `/data` 数据缓存接口
#[async_trait]
pub trait DataCache: Send + Sync {
    /// 缓存未过期时原样返回，否则重新生成并覆盖
    async fn get_data(&self) -> Result<DataPayload, StoreError>;
}

/// 单条目文件缓存
pub struct FileDataCache {
    path: PathBuf,
    ttl: Duration,
    // 串行化读-生成-写，避免并发写出半个文件
    lock: Mutex<()>,
}

impl FileDataCache {
    /// 创建缓存，缓存目录不存在时自动创建
    pub async fn new(path: impl Into<PathBuf>, ttl: Duration) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }

        Ok(Self {
            path,
            ttl,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 以给定时间判断新鲜度
    pub async fn get_data_at(&self, now: DateTime<Utc>) -> Result<DataPayload, StoreError> {
        let _guard = self.lock.lock().await;
        let now_ms = now.timestamp_millis();

        if let Some(entry) = self.read_entry().await? {
            let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
            if now_ms.saturating_sub(entry.timestamp) < ttl_ms {
                tracing::debug!("Serving cached data from {}", entry.timestamp);
                return Ok(entry.data);
            }
        }

        let entry = CacheEntry {
            timestamp: now_ms,
            data: generate_payload(now),
        };
        let json = serde_json::to_vec(&entry)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!("Regenerated data cache at {}", now_ms);

        Ok(entry.data)
    }

    async fn read_entry(&self) -> Result<Option<CacheEntry>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl DataCache for FileDataCache {
    async fn get_data(&self) -> Result<DataPayload, StoreError> {
        self.get_data_at(Utc::now()).await
    }
}

fn generate_payload(now: DateTime<Utc>) -> DataPayload {
    DataPayload {
        items: (1..=ITEM_COUNT)
            .map(|id| DataItem {
                id,
                value: random_value(VALUE_LEN),
            })
            .collect(),
        generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINUTE: Duration = Duration::from_secs(60);

    async fn cache_in(dir: &TempDir) -> FileDataCache {
        FileDataCache::new(dir.path().join("cache").join("data.json"), MINUTE)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn creates_cache_directory() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir).await;
        assert!(cache.path().parent().unwrap().is_dir());
    }

    #[tokio::test]
    async fn generates_five_numbered_items() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir).await;

        let payload = cache.get_data().await.unwrap();
        let ids: Vec<u32> = payload.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(payload.items.iter().all(|item| !item.value.is_empty()));
        assert!(payload.generated_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn fresh_entry_is_served_verbatim() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir).await;
        let start = Utc::now();

        let first = cache.get_data_at(start).await.unwrap();
        let second = cache
            .get_data_at(start + chrono::Duration::seconds(59))
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn entry_exactly_at_window_is_regenerated() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir).await;
        let start = Utc::now();

        let first = cache.get_data_at(start).await.unwrap();
        let boundary = start + chrono::Duration::milliseconds(60_000);
        let second = cache.get_data_at(boundary).await.unwrap();
        assert_ne!(first.generated_at, second.generated_at);

        let stored: CacheEntry =
            serde_json::from_slice(&std::fs::read(cache.path()).unwrap()).unwrap();
        assert_eq!(stored.timestamp, boundary.timestamp_millis());
    }

    #[tokio::test]
    async fn stale_entry_is_regenerated_and_persisted() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir).await;
        let start = Utc::now();

        let first = cache.get_data_at(start).await.unwrap();
        let later = start + chrono::Duration::seconds(61);
        let second = cache.get_data_at(later).await.unwrap();
        assert!(second.generated_at > first.generated_at);

        let stored: CacheEntry =
            serde_json::from_slice(&std::fs::read(cache.path()).unwrap()).unwrap();
        assert_eq!(stored.timestamp, later.timestamp_millis());
        assert_eq!(stored.data, second);
    }

    #[tokio::test]
    async fn corrupt_cache_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir).await;
        std::fs::write(cache.path(), b"not json").unwrap();

        let err = cache.get_data().await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn reads_entry_written_by_previous_process() {
        let dir = TempDir::new().unwrap();
        let now = Utc::now();
        let entry = serde_json::json!({
            "timestamp": now.timestamp_millis(),
            "data": {
                "items": [{ "id": 1, "value": "abc" }],
                "generatedAt": "2024-01-01T00:00:00.000Z"
            }
        });
        let cache = cache_in(&dir).await;
        std::fs::write(cache.path(), entry.to_string()).unwrap();

        let payload = cache.get_data_at(now).await.unwrap();
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].value, "abc");
        assert_eq!(payload.generated_at, "2024-01-01T00:00:00.000Z");
    }
}

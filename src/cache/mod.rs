// 缓存模块
// 包含会话存储和 /data 数据缓存

pub mod models;
pub mod operations;

pub use models::{CacheEntry, CachedSession, DataItem, DataPayload};
pub use operations::{DataCache, FileDataCache, MemorySessionStore, SessionStore};

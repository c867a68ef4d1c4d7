/// 缓存数据模型
pub mod data;
pub mod session;

pub use data::{CacheEntry, DataItem, DataPayload};
pub use session::CachedSession;

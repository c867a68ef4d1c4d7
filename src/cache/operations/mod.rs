/// 缓存操作
pub mod data;
pub mod session;

pub use data::{DataCache, FileDataCache};
pub use session::{MemorySessionStore, SessionStore, spawn_session_sweeper};

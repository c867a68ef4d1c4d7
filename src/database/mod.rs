// 用户存储模块
// 包含用户实体定义和存储接口

pub mod models;
pub mod repositories;

pub use models::user::UserEntity;
pub use repositories::user::{MemoryUserRepository, UserRepository};

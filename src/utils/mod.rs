use axum_extra::extract::cookie::Key;
use bcrypt::{hash, verify};
use rand::Rng;
use sha2::{Digest, Sha512};
use uuid::Uuid;

const VALUE_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

/// 生成不透明的会话ID
pub fn generate_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// 生成随机的短字符串（小写字母和数字）
pub fn random_value(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| VALUE_CHARSET[rng.gen_range(0..VALUE_CHARSET.len())] as char)
        .collect()
}

/// 由会话密钥派生 cookie 签名密钥，Key 需要 64 字节
pub fn cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

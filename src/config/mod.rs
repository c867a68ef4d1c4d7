use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub session_secret: String,
    pub session_cookie_name: String,
    pub session_ttl_secs: u64,
    pub session_sweep_interval_secs: u64,
    pub client_origin: String,
    pub cache_file: String,
    pub cache_ttl_ms: u64,
    pub bcrypt_cost: u32,
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "0.0.0.0".into(),
            server_port: 3001,
            session_secret: "your-secret-key".into(),
            session_cookie_name: "connect.sid".into(),
            session_ttl_secs: 24 * 3600,
            session_sweep_interval_secs: 60,
            client_origin: "http://localhost:3000".into(),
            cache_file: "cache/data.json".into(),
            cache_ttl_ms: 60_000,
            bcrypt_cost: 10,
            static_dir: "client".into(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置，缺省值与旧服务保持一致
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Config::default();

        let session_ttl_secs = match env::var("SESSION_TTL") {
            Ok(raw) => parse_ttl(&raw).unwrap_or_else(|| {
                tracing::warn!("Invalid SESSION_TTL {:?}, using default", raw);
                defaults.session_ttl_secs
            }),
            Err(_) => defaults.session_ttl_secs,
        };

        Config {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            session_secret: env::var("SESSION_SECRET").unwrap_or(defaults.session_secret),
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or(defaults.session_cookie_name),
            session_ttl_secs,
            session_sweep_interval_secs: non_zero_or_default(
                "SESSION_SWEEP_INTERVAL_SECS",
                parse_var(
                    "SESSION_SWEEP_INTERVAL_SECS",
                    defaults.session_sweep_interval_secs,
                ),
                defaults.session_sweep_interval_secs,
            ),
            client_origin: env::var("CLIENT_ORIGIN").unwrap_or(defaults.client_origin),
            cache_file: env::var("CACHE_FILE").unwrap_or(defaults.cache_file),
            cache_ttl_ms: parse_var("CACHE_TTL_MS", defaults.cache_ttl_ms),
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost),
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

// tokio 的 interval 不接受 0
fn non_zero_or_default(key: &str, value: u64, default: u64) -> u64 {
    if value == 0 {
        tracing::warn!("{} must be positive, using default", key);
        default
    } else {
        value
    }
}

// "24h" 按小时解析，纯数字按秒；超出 i64 秒数视为无效
fn parse_ttl(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let secs = match raw.strip_suffix('h') {
        Some(hours) => hours.parse::<u64>().ok()?.checked_mul(3600)?,
        None => raw.parse().ok()?,
    };
    i64::try_from(secs).is_ok().then_some(secs)
}

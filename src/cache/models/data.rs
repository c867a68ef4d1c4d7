use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DataItem {
    pub id: u32,
    pub value: String,
}

/// `/data` 返回的数据
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DataPayload {
    pub items: Vec<DataItem>,
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
}

/// 缓存文件内容：生成时间（毫秒）与数据
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheEntry {
    pub timestamp: i64,
    pub data: DataPayload,
}

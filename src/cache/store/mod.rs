//! 键值存储抽象
//!
//! 计数器只依赖按键读写和按前缀分页列出键这三种操作，
//! 支持原子自增的后端可以覆盖 [`KvStore::increment`]。

use async_trait::async_trait;

mod memory;
mod redis_store;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("value under {0} is not a counter")]
    NotACounter(String),
    #[error("invalid list cursor {0:?}")]
    InvalidCursor(String),
}

/// 一页键列表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPage {
    pub keys: Vec<String>,
    /// 继续列出下一页时传回的游标
    pub cursor: Option<String>,
    pub list_complete: bool,
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// 列出以 `prefix` 开头的键，`cursor` 为 `None` 时从头开始
    async fn list(
        &self,
        prefix: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<KeyPage, StoreError>;

    /// 计数加一并返回新值，缺失的键视为 0。
    ///
    /// 默认实现是先读后写，并发请求同一个键时可能丢失更新。
    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        let current = match self.get(key).await? {
            Some(raw) => parse_count(key, &raw)?,
            None => 0,
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::NotACounter(key.to_string()))?;
        self.put(key, &next.to_string()).await?;
        Ok(next)
    }
}

pub fn parse_count(key: &str, raw: &str) -> Result<i64, StoreError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| StoreError::NotACounter(key.to_string()))
}

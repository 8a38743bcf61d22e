use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient, aio::MultiplexedConnection};

use super::{KeyPage, KvStore, StoreError};

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Redis 存储，列键使用 `SCAN MATCH`，计数使用原子的 `INCR`。
///
/// 每次操作都从客户端取新连接，Redis 重启后无需重启服务。
#[derive(Clone)]
pub struct RedisStore {
    client: Arc<RedisClient>,
}

impl RedisStore {
    /// 解析连接地址，不建立连接
    pub fn open(redis_url: &str) -> Result<Self, StoreError> {
        let client = RedisClient::open(redis_url)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// 解析地址并确认 Redis 可达
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let store = Self::open(redis_url)?;
        store.connection().await?;
        Ok(store)
    }

    async fn connection(&self) -> Result<MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn list(
        &self,
        prefix: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<KeyPage, StoreError> {
        let cursor = match cursor {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| StoreError::InvalidCursor(raw.to_string()))?,
            None => 0,
        };

        let mut conn = self.connection().await?;
        let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .cursor_arg(cursor)
            .arg("MATCH")
            .arg(match_pattern(prefix))
            .arg("COUNT")
            .arg(limit.max(1))
            .query_async(&mut conn)
            .await?;

        // SCAN 返回游标 0 表示遍历结束
        Ok(KeyPage {
            keys,
            cursor: (next != 0).then(|| next.to_string()),
            list_complete: next == 0,
        })
    }

    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.connection().await?;
        let count: Result<i64, redis::RedisError> = conn.incr(key, 1).await;
        match count {
            Ok(count) => Ok(count),
            // 键存在但不是整数
            Err(e) if e.kind() == redis::ErrorKind::ResponseError => {
                Err(StoreError::NotACounter(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// 转义前缀中的 glob 元字符，再匹配任意后缀
fn match_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

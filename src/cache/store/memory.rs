use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{KeyPage, KvStore, StoreError};

/// 进程内存储，键有序，游标为上一页最后一个键。
///
/// 用于本地运行和测试，进程退出后数据丢失。
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, String>>, StoreError> {
        self.entries
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, String>>, StoreError> {
        self.entries
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read()?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.write()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn list(
        &self,
        prefix: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<KeyPage, StoreError> {
        let entries = self.read()?;
        let start = match cursor {
            Some(cursor) => Bound::Excluded(cursor.to_string()),
            None => Bound::Included(prefix.to_string()),
        };

        let mut matching = entries
            .range::<String, _>((start, Bound::Unbounded))
            .map(|(key, _)| key)
            .skip_while(|key| key.as_str() < prefix)
            .take_while(|key| key.starts_with(prefix));
        let keys: Vec<String> = matching.by_ref().take(limit.max(1)).cloned().collect();
        let list_complete = matching.next().is_none();
        let cursor = if list_complete {
            None
        } else {
            keys.last().cloned()
        };

        Ok(KeyPage {
            keys,
            cursor,
            list_complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(keys: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for key in keys {
            store.put(key, "1").await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn increment_starts_from_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.increment("k").await.unwrap(), 1);
        assert_eq!(store.increment("k").await.unwrap(), 2);
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn increment_rejects_non_numeric_value() {
        let store = MemoryStore::new();
        store.put("k", "many").await.unwrap();
        assert!(matches!(
            store.increment("k").await,
            Err(StoreError::NotACounter(key)) if key == "k"
        ));
    }

    #[tokio::test]
    async fn increment_at_max_is_rejected_without_overwriting() {
        let store = MemoryStore::new();
        let max = i64::MAX.to_string();
        store.put("k", &max).await.unwrap();
        assert!(matches!(
            store.increment("k").await,
            Err(StoreError::NotACounter(key)) if key == "k"
        ));
        assert_eq!(store.get("k").await.unwrap(), Some(max));
    }

    #[tokio::test]
    async fn list_pages_through_prefix_only() {
        let store = seeded(&["a:1", "a:2", "a:3", "b:1", "0"]).await;

        let first = store.list("a:", None, 2).await.unwrap();
        assert_eq!(first.keys, vec!["a:1", "a:2"]);
        assert!(!first.list_complete);

        let second = store
            .list("a:", first.cursor.as_deref(), 2)
            .await
            .unwrap();
        assert_eq!(second.keys, vec!["a:3"]);
        assert!(second.list_complete);
        assert_eq!(second.cursor, None);
    }

    #[tokio::test]
    async fn list_exact_page_reports_completion() {
        let store = seeded(&["a:1", "a:2"]).await;
        let page = store.list("a:", None, 2).await.unwrap();
        assert_eq!(page.keys.len(), 2);
        assert!(page.list_complete);
    }

    #[tokio::test]
    async fn list_empty_store() {
        let page = MemoryStore::new().list("a:", None, 10).await.unwrap();
        assert_eq!(
            page,
            KeyPage {
                keys: vec![],
                cursor: None,
                list_complete: true,
            }
        );
    }
}

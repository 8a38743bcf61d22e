use std::sync::Arc;

use crate::cache::keys::stats_keys;
use crate::cache::store::{KvStore, StoreError, parse_count};
use crate::models::ParameterSet;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode stats key: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("malformed stats entry {key}: {reason}")]
    Decode { key: String, reason: String },
}

/// 请求次数最多的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MostFrequent {
    pub params: ParameterSet,
    pub hits: i64,
}

/// 请求参数计数器
///
/// 每组参数在存储中对应一个计数键，不做进程内缓存。
#[derive(Clone)]
pub struct FrequencyTracker {
    store: Arc<dyn KvStore>,
    namespace: String,
    page_size: usize,
}

impl FrequencyTracker {
    pub fn new(store: Arc<dyn KvStore>, namespace: impl Into<String>, page_size: usize) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            page_size: page_size.max(1),
        }
    }

    /// 记录一次请求，返回新的计数
    pub async fn record_hit(&self, params: &ParameterSet) -> Result<i64, StatsError> {
        let key = stats_keys::stats_key(&self.namespace, params)?;
        let hits = self.store.increment(&key).await?;
        tracing::debug!("Recorded hit #{} for {}", hits, key);
        Ok(hits)
    }

    /// 查询某组参数的计数
    pub async fn hits(&self, params: &ParameterSet) -> Result<i64, StatsError> {
        let key = stats_keys::stats_key(&self.namespace, params)?;
        match self.store.get(&key).await? {
            Some(raw) => Ok(parse_count(&key, &raw)?),
            None => Ok(0),
        }
    }

    /// 遍历全部计数键，返回计数最大的参数。
    ///
    /// 计数相同时取编码后字典序最小的键。没有任何计数时返回 `None`。
    pub async fn most_frequent(&self) -> Result<Option<MostFrequent>, StatsError> {
        let prefix = stats_keys::stats_prefix(&self.namespace);
        let mut best: Option<(String, i64)> = None;
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .store
                .list(&prefix, cursor.as_deref(), self.page_size)
                .await?;

            for key in page.keys {
                // 列出后被删除的键直接跳过
                let Some(raw) = self.store.get(&key).await? else {
                    continue;
                };
                let hits = parse_count(&key, &raw).map_err(|_| StatsError::Decode {
                    key: key.clone(),
                    reason: format!("count {:?} is not an integer", raw),
                })?;

                let better = match &best {
                    None => hits > 0,
                    Some((best_key, best_hits)) => {
                        hits > *best_hits || (hits == *best_hits && key < *best_key)
                    }
                };
                if better {
                    best = Some((key, hits));
                }
            }

            if page.list_complete {
                break;
            }
            match page.cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        let Some((key, hits)) = best else {
            return Ok(None);
        };
        let params = stats_keys::parse_stats_key(&self.namespace, &key)
            .map_err(|reason| StatsError::Decode { key, reason })?;
        Ok(Some(MostFrequent { params, hits }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::MemoryStore;

    fn tracker_with(store: Arc<MemoryStore>, page_size: usize) -> FrequencyTracker {
        FrequencyTracker::new(store, "STATS", page_size)
    }

    fn params(limit: i64) -> ParameterSet {
        ParameterSet::new(3, 5, limit, "Fizz", "Buzz").unwrap()
    }

    #[tokio::test]
    async fn empty_store_has_no_most_frequent() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()), 10);
        assert_eq!(tracker.most_frequent().await.unwrap(), None);
    }

    #[tokio::test]
    async fn single_hit_is_most_frequent() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()), 10);
        assert_eq!(tracker.record_hit(&params(15)).await.unwrap(), 1);
        assert_eq!(
            tracker.most_frequent().await.unwrap(),
            Some(MostFrequent {
                params: params(15),
                hits: 1,
            })
        );
    }

    #[tokio::test]
    async fn repeated_hits_accumulate() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()), 10);
        tracker.record_hit(&params(15)).await.unwrap();
        tracker.record_hit(&params(15)).await.unwrap();
        assert_eq!(tracker.hits(&params(15)).await.unwrap(), 2);
        assert_eq!(tracker.hits(&params(16)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn highest_count_wins_across_pages() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()), 1);
        for (limit, times) in [(10, 2), (20, 5), (30, 3), (40, 1)] {
            for _ in 0..times {
                tracker.record_hit(&params(limit)).await.unwrap();
            }
        }
        let best = tracker.most_frequent().await.unwrap().unwrap();
        assert_eq!(best.params, params(20));
        assert_eq!(best.hits, 5);
    }

    #[tokio::test]
    async fn saturated_counter_fails_without_panicking() {
        let store = Arc::new(MemoryStore::new());
        let key = stats_keys::stats_key("STATS", &params(15)).unwrap();
        store.put(&key, &i64::MAX.to_string()).await.unwrap();
        let tracker = tracker_with(store, 10);
        assert!(matches!(
            tracker.record_hit(&params(15)).await,
            Err(StatsError::Store(StoreError::NotACounter(_)))
        ));
        assert_eq!(tracker.hits(&params(15)).await.unwrap(), i64::MAX);
    }

    #[tokio::test]
    async fn ties_pick_smallest_key() {
        let tracker = tracker_with(Arc::new(MemoryStore::new()), 10);
        let b = ParameterSet::new(2, 3, 10, "b", "b").unwrap();
        let a = ParameterSet::new(2, 3, 10, "a", "a").unwrap();
        tracker.record_hit(&b).await.unwrap();
        tracker.record_hit(&a).await.unwrap();
        assert_eq!(tracker.most_frequent().await.unwrap().unwrap().params, a);
    }

    #[tokio::test]
    async fn ignores_keys_outside_namespace() {
        let store = Arc::new(MemoryStore::new());
        store.put("OTHER:x", "99").await.unwrap();
        let tracker = tracker_with(store, 10);
        tracker.record_hit(&params(15)).await.unwrap();
        assert_eq!(tracker.most_frequent().await.unwrap().unwrap().hits, 1);
    }

    #[tokio::test]
    async fn undecodable_winner_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store.put("STATS:garbage", "7").await.unwrap();
        let tracker = tracker_with(store, 10);
        assert!(matches!(
            tracker.most_frequent().await,
            Err(StatsError::Decode { key, .. }) if key == "STATS:garbage"
        ));
    }

    #[tokio::test]
    async fn non_numeric_count_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store.put("STATS:x", "lots").await.unwrap();
        let tracker = tracker_with(store, 10);
        assert!(matches!(
            tracker.most_frequent().await,
            Err(StatsError::Decode { .. })
        ));
    }
}

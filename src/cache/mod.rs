// 缓存模块
// 包含存储抽象、缓存键和计数操作

pub mod keys;
pub mod operations;
pub mod store;

// 重新导出常用类型，方便其他模块使用
pub use operations::{FrequencyTracker, MostFrequent, StatsError};
pub use store::{KeyPage, KvStore, MemoryStore, RedisStore, StoreError};

/// 缓存操作
/// 提供计数缓存的读写逻辑

// 请求统计
pub mod stats;

pub use stats::{FrequencyTracker, MostFrequent, StatsError};

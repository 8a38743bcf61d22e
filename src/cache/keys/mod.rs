/// 统计计数键
pub mod stats_keys;

pub use stats_keys::{parse_stats_key, stats_key, stats_prefix};

use crate::models::ParameterSet;

/// 统计计数键前缀
pub fn stats_prefix(namespace: &str) -> String {
    format!("{}:", namespace)
}

/// 生成请求参数对应的计数键
pub fn stats_key(namespace: &str, params: &ParameterSet) -> Result<String, serde_json::Error> {
    let encoded = serde_json::to_string(params)?;
    Ok(format!("{}{}", stats_prefix(namespace), encoded))
}

/// 从计数键还原请求参数
pub fn parse_stats_key(namespace: &str, key: &str) -> Result<ParameterSet, String> {
    let encoded = key
        .strip_prefix(&stats_prefix(namespace))
        .ok_or_else(|| format!("key is outside namespace {:?}", namespace))?;
    serde_json::from_str(encoded).map_err(|e| e.to_string())
}

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use super::generate;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidParameters {
    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),
    #[error("limit must not exceed {0}")]
    LimitTooLarge(u64),
}

/// 一次 FizzBuzz 计算的参数，同时也是计数器的身份。
///
/// serde 按字段声明顺序序列化，因此 JSON 形式是规范的，可直接作为存储键使用。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterSet {
    divisor1: NonZeroU64,
    divisor2: NonZeroU64,
    limit: NonZeroU64,
    label1: String,
    label2: String,
}

impl ParameterSet {
    pub fn new(
        divisor1: i64,
        divisor2: i64,
        limit: i64,
        label1: impl Into<String>,
        label2: impl Into<String>,
    ) -> Result<Self, InvalidParameters> {
        Ok(ParameterSet {
            divisor1: positive("divisor1", divisor1)?,
            divisor2: positive("divisor2", divisor2)?,
            limit: positive("limit", limit)?,
            label1: label1.into(),
            label2: label2.into(),
        })
    }

    /// 拒绝超过 `max_limit` 的序列长度
    pub fn within_limit(self, max_limit: u64) -> Result<Self, InvalidParameters> {
        if self.limit.get() > max_limit {
            return Err(InvalidParameters::LimitTooLarge(max_limit));
        }
        Ok(self)
    }

    pub fn divisor1(&self) -> u64 {
        self.divisor1.get()
    }

    pub fn divisor2(&self) -> u64 {
        self.divisor2.get()
    }

    pub fn limit(&self) -> u64 {
        self.limit.get()
    }

    pub fn label1(&self) -> &str {
        &self.label1
    }

    pub fn label2(&self) -> &str {
        &self.label2
    }

    pub fn sequence(&self) -> Vec<String> {
        generate(
            self.divisor1(),
            self.divisor2(),
            self.limit(),
            &self.label1,
            &self.label2,
        )
    }
}

fn positive(field: &'static str, value: i64) -> Result<NonZeroU64, InvalidParameters> {
    u64::try_from(value)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or(InvalidParameters::NotPositive(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_fields() {
        assert_eq!(
            ParameterSet::new(0, 5, 15, "a", "b"),
            Err(InvalidParameters::NotPositive("divisor1"))
        );
        assert_eq!(
            ParameterSet::new(3, -5, 15, "a", "b"),
            Err(InvalidParameters::NotPositive("divisor2"))
        );
        assert_eq!(
            ParameterSet::new(3, 5, i64::MIN, "a", "b"),
            Err(InvalidParameters::NotPositive("limit"))
        );
    }

    #[test]
    fn enforces_max_limit() {
        let params = ParameterSet::new(3, 5, 101, "a", "b").unwrap();
        assert_eq!(
            params.clone().within_limit(100),
            Err(InvalidParameters::LimitTooLarge(100))
        );
        assert!(params.within_limit(101).is_ok());
    }

    #[test]
    fn serializes_in_declaration_order() {
        let params = ParameterSet::new(3, 5, 15, "Fizz", "Buzz").unwrap();
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"divisor1":3,"divisor2":5,"limit":15,"label1":"Fizz","label2":"Buzz"}"#
        );
    }

    #[test]
    fn deserializing_zero_divisor_fails() {
        let raw = r#"{"divisor1":0,"divisor2":5,"limit":15,"label1":"a","label2":"b"}"#;
        assert!(serde_json::from_str::<ParameterSet>(raw).is_err());
    }
}

use serde::{Deserialize, Serialize};

use crate::models::{InvalidParameters, ParameterSet};

/// 生成请求，兼容旧字段名 `int1`/`int2`/`str1`/`str2`
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(alias = "int1")]
    pub divisor1: i64,
    #[serde(alias = "int2")]
    pub divisor2: i64,
    pub limit: i64,
    #[serde(alias = "str1")]
    pub label1: String,
    #[serde(alias = "str2")]
    pub label2: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub result: Vec<String>,
}

impl TryFrom<GenerateRequest> for ParameterSet {
    type Error = InvalidParameters;

    fn try_from(req: GenerateRequest) -> Result<Self, Self::Error> {
        ParameterSet::new(req.divisor1, req.divisor2, req.limit, req.label1, req.label2)
    }
}

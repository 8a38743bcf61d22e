use serde::{Deserialize, Serialize};

use crate::cache::MostFrequent;
use crate::models::ParameterSet;

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub most_frequent_request: ParameterSet,
    pub hits: i64,
}

impl From<MostFrequent> for StatsResponse {
    fn from(most: MostFrequent) -> Self {
        StatsResponse {
            most_frequent_request: most.params,
            hits: most.hits,
        }
    }
}

mod handler;
mod model;

pub use handler::stats;
pub use model::StatsResponse;

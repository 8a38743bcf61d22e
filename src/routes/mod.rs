pub mod fizzbuzz;
pub mod stats;

mod parameter_set;
mod sequence;

pub use parameter_set::{InvalidParameters, ParameterSet};
pub use sequence::generate;

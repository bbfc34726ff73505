mod recommend;
mod stats;

pub use recommend::*;
pub use stats::*;

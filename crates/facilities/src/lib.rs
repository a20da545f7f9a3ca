pub mod category;
pub mod dataset;

pub use category::*;
pub use dataset::*;

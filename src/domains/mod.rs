pub mod escape_planning;
pub mod logger;

pub use escape_planning::*;
pub use logger::*;

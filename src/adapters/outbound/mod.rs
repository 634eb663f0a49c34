pub mod buffered_logger;
pub mod console_logger;
pub mod console_renderer;
pub mod file_logger;
pub mod scenario_data;

pub use buffered_logger::*;
pub use console_logger::*;
pub use console_renderer::*;
pub use file_logger::*;
pub use scenario_data::*;

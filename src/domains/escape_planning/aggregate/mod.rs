pub mod grid;
pub mod session;
pub mod types;

// Re-export all public types for convenience
pub use grid::*;
pub use session::*;
pub use types::*;

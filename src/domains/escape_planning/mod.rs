pub mod actors;
pub mod aggregate;
pub mod events;
pub mod planning;
pub mod playback;
pub mod ports;
pub mod projections;
pub mod scenario;

pub use actors::*;
pub use aggregate::*;
pub use events::*;
pub use planning::*;
pub use playback::*;
pub use ports::*;
pub use projections::*;
pub use scenario::*;

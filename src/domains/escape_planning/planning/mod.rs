pub mod goal;
pub mod movement;
pub mod pursuit;
pub mod search;

pub use goal::*;
pub use movement::*;
pub use pursuit::*;
pub use search::*;

pub mod artifact;
pub mod generation;
pub mod placement;

pub use artifact::*;
pub use generation::*;
pub use placement::*;

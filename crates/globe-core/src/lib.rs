pub mod constants;
pub mod error;
pub mod facts;
pub mod geo;
pub mod gesture;
pub mod globe;
pub mod landmarks;
pub mod pinch;
pub mod pipeline;
pub mod pointer;
pub mod rotation;
pub mod scheduler;
pub mod smoothing;

pub use constants::*;
pub use error::*;
pub use facts::*;
pub use geo::*;
pub use gesture::*;
pub use globe::*;
pub use landmarks::*;
pub use pinch::*;
pub use pipeline::*;
pub use pointer::*;
pub use rotation::*;
pub use scheduler::*;
pub use smoothing::*;

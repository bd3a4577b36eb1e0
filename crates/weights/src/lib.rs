pub mod engine;
pub mod gestures;
pub mod probabilities;

pub use engine::*;
pub use gestures::*;
pub use probabilities::*;

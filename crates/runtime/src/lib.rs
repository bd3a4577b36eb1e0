pub mod event_bus;
pub mod frame;
pub mod repeat;

pub use event_bus::*;
pub use frame::*;
pub use repeat::*;

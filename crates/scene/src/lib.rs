pub mod depth;
pub mod picking;
pub mod projection;
pub mod render;
pub mod viewport;
pub mod visibility;

pub use depth::*;
pub use picking::*;
pub use projection::*;
pub use render::*;
pub use viewport::*;
pub use visibility::*;

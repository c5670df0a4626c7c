//! Screen-space types shared by the scene and the render step.

mod viewport;

pub use viewport::Viewport;

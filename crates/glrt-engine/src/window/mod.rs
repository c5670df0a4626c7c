//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop, the window and its GL context, and drives the
//! bootstrap and the draw step.

mod runtime;

pub use runtime::Runtime;

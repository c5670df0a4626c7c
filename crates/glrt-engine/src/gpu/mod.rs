//! GPU API boundary.
//!
//! The engine is written against the [`Gl`] trait; [`GlowBackend`] maps it
//! onto a real OpenGL context.

mod api;
mod glow_backend;
#[cfg(test)]
mod recording;

pub use api::{Capability, Gl};
pub use glow_backend::GlowBackend;
#[cfg(test)]
pub(crate) use recording::RecordingGl;

//! Per-frame drawing: one full-screen quad, shaded entirely by the fragment
//! stage.

mod quad;

pub use quad::{FullscreenQuad, prepare_state};

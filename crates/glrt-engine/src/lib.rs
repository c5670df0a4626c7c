//! GLSL ray tracer engine.
//!
//! Compiles and links the ray-tracing shader pair, resolves every uniform the
//! fragment stage declares for its fixed-size object array, uploads a scene
//! description into them and draws one full-screen quad per frame.

pub mod config;
pub mod coords;
pub mod error;
pub mod gpu;
pub mod logging;
pub mod program;
pub mod render;
pub mod scene;
pub mod shader;
pub mod uniforms;
pub mod window;

pub use config::{BootstrapConfig, RuntimeConfig};
pub use error::StartupError;
pub use program::{RayTraceProgram, bootstrap};
pub use scene::{ObjectType, SceneDescription, SceneObjectRecord};
pub use window::Runtime;

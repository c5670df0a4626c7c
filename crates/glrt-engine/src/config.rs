//! Startup configuration.

use std::path::PathBuf;

use winit::dpi::LogicalSize;

use crate::shader::{AttributeBinding, default_attribute_bindings};

/// Overrides the directory holding `vs.glsl` and `fs.glsl`.
pub const SHADER_DIR_ENV: &str = "GLRT_SHADER_DIR";

/// Stage files shipped with the engine crate.
pub const BUNDLED_SHADER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders");

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL Ray Tracer".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Inputs of the shader bootstrap.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    /// Applied in order before linking.
    pub attribute_bindings: Vec<AttributeBinding>,
}

impl BootstrapConfig {
    /// Expects `vs.glsl` and `fs.glsl` inside `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            vertex_shader: dir.join("vs.glsl"),
            fragment_shader: dir.join("fs.glsl"),
            attribute_bindings: default_attribute_bindings(),
        }
    }

    /// Bundled shaders, unless `GLRT_SHADER_DIR` names another directory.
    pub fn from_env() -> Self {
        match std::env::var_os(SHADER_DIR_ENV) {
            Some(dir) if !dir.is_empty() => {
                log::info!("loading shaders from {SHADER_DIR_ENV}={}", dir.to_string_lossy());
                Self::from_dir(dir)
            }
            _ => Self::default(),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::from_dir(BUNDLED_SHADER_DIR)
    }
}

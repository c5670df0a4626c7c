//! The ray-tracing program: compile → link → resolve → upload.

use std::fmt;

use crate::config::BootstrapConfig;
use crate::error::{ResolutionError, StartupError, UploadError};
use crate::gpu::Gl;
use crate::scene::{SceneDescription, upload};
use crate::shader::{AttributeBinding, LinkedProgram, ShaderSource, ShaderStage, compile, link};
use crate::uniforms::{UniformHandleTable, resolve};

/// The linked program plus, once resolved, its uniform table.
pub struct RayTraceProgram<G: Gl> {
    program: LinkedProgram<G::Program>,
    uniforms: Option<UniformHandleTable<G::UniformLocation>>,
}

impl<G: Gl> fmt::Debug for RayTraceProgram<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RayTraceProgram")
            .field("program", &self.program)
            .field("uniforms", &self.uniforms)
            .finish()
    }
}

impl<G: Gl> RayTraceProgram<G> {
    /// Compiles both stages and links them. Uniforms are not resolved yet.
    pub fn from_sources(
        gl: &G,
        vertex: ShaderSource,
        fragment: ShaderSource,
        bindings: &[AttributeBinding],
    ) -> Result<Self, StartupError> {
        let vertex = compile(gl, vertex)?;
        let fragment = match compile(gl, fragment) {
            Ok(stage) => stage,
            Err(err) => {
                gl.delete_shader(vertex.handle());
                return Err(err.into());
            }
        };
        let program = link(gl, vertex, fragment, bindings)?;

        Ok(Self {
            program,
            uniforms: None,
        })
    }

    /// Reads both stage files named by `config`, then as [`from_sources`](Self::from_sources).
    pub fn load(gl: &G, config: &BootstrapConfig) -> Result<Self, StartupError> {
        let vertex = ShaderSource::read(ShaderStage::Vertex, &config.vertex_shader)?;
        let fragment = ShaderSource::read(ShaderStage::Fragment, &config.fragment_shader)?;
        Self::from_sources(gl, vertex, fragment, &config.attribute_bindings)
    }

    /// One-shot resolution of every uniform location. On failure no table is
    /// kept.
    pub fn resolve_uniforms(
        &mut self,
        gl: &G,
    ) -> Result<&UniformHandleTable<G::UniformLocation>, ResolutionError> {
        self.uniforms = None;
        let table = resolve(gl, &self.program)?;
        Ok(self.uniforms.insert(table))
    }

    pub fn uniforms(&self) -> Option<&UniformHandleTable<G::UniformLocation>> {
        self.uniforms.as_ref()
    }

    /// Writes `scene` through the resolved table.
    pub fn upload_scene(&self, gl: &G, scene: &SceneDescription) -> Result<(), UploadError> {
        let Some(table) = self.uniforms.as_ref() else {
            log::error!("scene upload attempted before uniform resolution");
            return Err(UploadError::Unresolved);
        };
        upload(gl, table, scene)
    }

    pub fn program(&self) -> &LinkedProgram<G::Program> {
        &self.program
    }

    /// Releases the program; its uniform table goes with it.
    pub fn destroy(self, gl: &G) {
        self.program.destroy(gl);
    }
}

/// Full startup sequence. Any failure is returned as-is for the caller to
/// report and terminate on; nothing is retried.
pub fn bootstrap<G: Gl>(
    gl: &G,
    config: &BootstrapConfig,
    scene: &SceneDescription,
) -> Result<RayTraceProgram<G>, StartupError> {
    log::info!(
        "bootstrapping shaders: vertex '{}', fragment '{}'",
        config.vertex_shader.display(),
        config.fragment_shader.display()
    );

    let mut program = RayTraceProgram::load(gl, config)?;

    if let Err(err) = program.resolve_uniforms(gl) {
        program.destroy(gl);
        return Err(err.into());
    }
    if let Err(err) = program.upload_scene(gl, scene) {
        program.destroy(gl);
        return Err(err.into());
    }

    Ok(program)
}

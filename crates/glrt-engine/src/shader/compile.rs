use super::{ShaderSource, ShaderStage};
use crate::error::CompileError;
use crate::gpu::Gl;

/// A successfully compiled stage, not yet attached to a program.
#[derive(Debug)]
pub struct CompiledStage<S> {
    pub(crate) handle: S,
    pub(crate) stage: ShaderStage,
}

impl<S: Copy> CompiledStage<S> {
    pub fn handle(&self) -> S {
        self.handle
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

/// Compiles one stage.
///
/// On failure the driver log is returned verbatim and the stage object is
/// deleted. On success the caller owns the stage until it is handed to
/// [`link`](super::link).
pub fn compile<G: Gl>(
    gl: &G,
    source: ShaderSource,
) -> Result<CompiledStage<G::Shader>, CompileError> {
    let stage = source.stage();

    if source.text().trim().is_empty() {
        return Err(CompileError {
            stage,
            log: "shader source is empty".to_string(),
        });
    }

    let handle = gl
        .create_shader(stage)
        .map_err(|log| CompileError { stage, log })?;

    gl.shader_source(handle, source.text());
    drop(source);
    gl.compile_shader(handle);

    if !gl.shader_compile_status(handle) {
        let mut log = gl.shader_info_log(handle);
        if log.trim().is_empty() {
            log = "no diagnostic reported by driver".to_string();
        }
        gl.delete_shader(handle);
        log::error!("error compiling {stage} shader:\n{log}");
        return Err(CompileError { stage, log });
    }

    log::info!("compiled {stage} shader");
    Ok(CompiledStage { handle, stage })
}

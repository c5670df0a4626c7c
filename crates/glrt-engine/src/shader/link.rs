use super::{CompiledStage, ShaderStage};
use crate::error::LinkError;
use crate::gpu::Gl;

/// Fixed vertex-attribute slot applied before linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBinding {
    pub index: u32,
    pub name: String,
}

impl AttributeBinding {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// The vertex position attribute of the fullscreen quad.
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Bindings used by the stock shaders.
pub fn default_attribute_bindings() -> Vec<AttributeBinding> {
    vec![AttributeBinding::new(POSITION_ATTRIBUTE, "in_position")]
}

/// A linked program, made current by [`link`].
///
/// Uniform locations derived from it are invalid once [`destroy`](Self::destroy)
/// has been called.
#[derive(Debug)]
pub struct LinkedProgram<P> {
    handle: P,
}

impl<P: Copy> LinkedProgram<P> {
    pub fn handle(&self) -> P {
        self.handle
    }

    pub fn destroy<G: Gl<Program = P>>(self, gl: &G) {
        gl.use_program(None);
        gl.delete_program(self.handle);
    }
}

/// Attaches both stages, binds attribute slots, links, and makes the
/// program current.
///
/// Both stage objects are consumed: they are deleted whether linking succeeds
/// or not. A failed program is deleted as well.
pub fn link<G: Gl>(
    gl: &G,
    vertex: CompiledStage<G::Shader>,
    fragment: CompiledStage<G::Shader>,
    bindings: &[AttributeBinding],
) -> Result<LinkedProgram<G::Program>, LinkError> {
    let release = |gl: &G| {
        gl.delete_shader(vertex.handle);
        gl.delete_shader(fragment.handle);
    };

    for (stage, expected) in [(&vertex, ShaderStage::Vertex), (&fragment, ShaderStage::Fragment)] {
        if stage.stage != expected {
            release(gl);
            return Err(LinkError {
                log: format!("expected a {expected} stage, got a {} stage", stage.stage),
            });
        }
    }

    let program = match gl.create_program() {
        Ok(p) => p,
        Err(log) => {
            release(gl);
            return Err(LinkError { log });
        }
    };

    gl.attach_shader(program, vertex.handle);
    gl.attach_shader(program, fragment.handle);

    // Attribute locations only take effect at link time.
    for binding in bindings {
        gl.bind_attrib_location(program, binding.index, &binding.name);
    }

    gl.link_program(program);

    if !gl.program_link_status(program) {
        let mut log = gl.program_info_log(program);
        if log.trim().is_empty() {
            log = "no diagnostic reported by driver".to_string();
        }
        gl.detach_shader(program, vertex.handle);
        gl.detach_shader(program, fragment.handle);
        gl.delete_program(program);
        release(gl);
        log::error!("error linking shader program:\n{log}");
        return Err(LinkError { log });
    }

    gl.detach_shader(program, vertex.handle);
    gl.detach_shader(program, fragment.handle);
    release(gl);

    gl.use_program(Some(program));
    log::info!("linked shader program {program:?}");

    Ok(LinkedProgram { handle: program })
}

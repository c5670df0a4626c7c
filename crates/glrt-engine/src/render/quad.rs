use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::error::RenderError;
use crate::gpu::{Capability, Gl};
use crate::shader::POSITION_ATTRIBUTE;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2],
}

/// Two triangles covering clip space.
const QUAD_VERTICES: [QuadVertex; 6] = [
    QuadVertex { pos: [-1.0, -1.0] },
    QuadVertex { pos: [1.0, -1.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [-1.0, 1.0] },
    QuadVertex { pos: [-1.0, -1.0] },
];

/// Fixed-function state the ray tracer needs off: every pixel is produced by
/// exactly one fragment invocation.
pub fn prepare_state<G: Gl>(gl: &G) {
    gl.disable(Capability::Multisample);
    gl.disable(Capability::Blend);
    gl.disable(Capability::CullFace);
}

/// Vertex buffer for the full-screen quad the fragment shader runs over.
pub struct FullscreenQuad<B> {
    vbo: B,
}

impl<B: Copy> FullscreenQuad<B> {
    pub fn new<G: Gl<Buffer = B>>(gl: &G) -> Result<Self, RenderError> {
        let vbo = gl.create_buffer().map_err(RenderError::Allocation)?;
        gl.bind_array_buffer(Some(vbo));
        gl.array_buffer_data(bytemuck::cast_slice(&QUAD_VERTICES));

        log::debug!("fullscreen quad uploaded ({} vertices)", QUAD_VERTICES.len());
        Ok(Self { vbo })
    }

    /// Draws one frame with the currently bound program.
    pub fn draw<G: Gl<Buffer = B>>(&self, gl: &G, viewport: Viewport) -> Result<(), RenderError> {
        let (width, height) = viewport.pixels();
        gl.viewport(0, 0, width, height);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear_color_buffer();

        gl.bind_array_buffer(Some(self.vbo));
        gl.vertex_attrib_pointer_f32(POSITION_ATTRIBUTE, 2);
        gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);
        gl.draw_triangles(0, QUAD_VERTICES.len() as i32);

        match gl.error() {
            0 => Ok(()),
            code => {
                log::error!("GPU error 0x{code:04x} after draw");
                Err(RenderError::Gpu { code })
            }
        }
    }

    pub fn destroy<G: Gl<Buffer = B>>(self, gl: &G) {
        gl.bind_array_buffer(None);
        gl.delete_buffer(self.vbo);
    }
}

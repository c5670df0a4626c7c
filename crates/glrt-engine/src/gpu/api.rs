use std::fmt::Debug;

use crate::shader::ShaderStage;

/// Capabilities the render step switches off before drawing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Capability {
    Multisample,
    Blend,
    CullFace,
}

/// The GPU API surface consumed by the engine.
///
/// Handles are opaque associated types; the engine never inspects them beyond
/// equality/debug output. All calls run on the thread owning the GL context.
///
/// Implementations:
/// - [`GlowBackend`](super::GlowBackend) for a live OpenGL context
/// - an in-memory recorder used by the unit tests
pub trait Gl {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type Buffer: Copy + Debug;
    type UniformLocation: Clone + Debug;

    // ── shader stages ─────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn bind_attrib_location(&self, program: Self::Program, index: u32, name: &str);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    // ── uniforms ──────────────────────────────────────────────────────────

    /// Returns `None` when `name` is not an active uniform of `program`.
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;
    fn uniform_1_i32(&self, location: &Self::UniformLocation, x: i32);
    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32);
    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32);
    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32);

    // ── fixed-function state + drawing ────────────────────────────────────

    fn disable(&self, capability: Capability);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    /// Fills the bound array buffer with static data.
    fn array_buffer_data(&self, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// Tightly packed float attribute sourced from the bound array buffer.
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn draw_triangles(&self, first: i32, count: i32);

    /// Reads and clears the error flag. Zero means no error.
    fn error(&self) -> u32;
}

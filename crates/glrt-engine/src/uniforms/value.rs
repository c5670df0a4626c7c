use super::ObjectFieldKind;
use crate::gpu::Gl;

/// A value bound for one uniform write.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
}

impl UniformValue {
    pub fn arity(self) -> usize {
        match self {
            Self::Int(_) | Self::Float(_) => 1,
            Self::Vec2(_) => 2,
            Self::Vec3(_) => 3,
        }
    }

    /// Whether this value can be written to `field` as-is.
    pub fn fits(self, field: ObjectFieldKind) -> bool {
        match self {
            Self::Int(_) => field.is_integer(),
            _ => !field.is_integer() && self.arity() == field.arity(),
        }
    }

    /// Issues the matching `uniform*` call.
    pub(crate) fn write<G: Gl>(self, gl: &G, location: &G::UniformLocation) {
        match self {
            Self::Int(x) => gl.uniform_1_i32(location, x),
            Self::Float(x) => gl.uniform_1_f32(location, x),
            Self::Vec2([x, y]) => gl.uniform_2_f32(location, x, y),
            Self::Vec3([x, y, z]) => gl.uniform_3_f32(location, x, y, z),
        }
    }
}

impl From<i32> for UniformValue {
    fn from(x: i32) -> Self {
        Self::Int(x)
    }
}

impl From<f32> for UniformValue {
    fn from(x: f32) -> Self {
        Self::Float(x)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        Self::Vec2(v)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        Self::Vec3(v)
    }
}

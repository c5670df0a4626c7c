//! Uniform naming and location resolution for the scene-object array.
//!
//! The fragment shader declares
//!
//! ```glsl
//! struct Object { int type; vec3 position; float radius;
//!                 vec3 colour; float attenuation; vec3 normal; };
//! uniform Object objects[10];
//! uniform vec2 windowDimensions;
//! ```
//!
//! and the engine addresses each member through a [`UniformHandleTable`].

mod field;
mod names;
mod table;
mod value;

pub use field::ObjectFieldKind;
pub use names::{
    OBJECT_CAPACITY, OBJECTS_UNIFORM, VIEWPORT_UNIFORM, object_uniform_name, uniform_names,
};
pub use table::{UniformHandleTable, resolve};
pub use value::UniformValue;

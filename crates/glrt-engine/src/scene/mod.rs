//! In-memory scene description and its upload into shader uniforms.

mod description;
mod object;
pub mod presets;
mod upload;

pub use description::SceneDescription;
pub use object::{ObjectType, SceneObjectRecord};
pub use upload::upload;

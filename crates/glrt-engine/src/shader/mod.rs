//! Shader stage compilation and program linking.
//!
//! Flow: [`ShaderSource`] → [`compile`] → [`CompiledStage`] (×2) → [`link`]
//! → [`LinkedProgram`]. Every failure carries the driver log verbatim.

mod compile;
mod link;
mod source;

pub use compile::{CompiledStage, compile};
pub use link::{
    AttributeBinding, LinkedProgram, POSITION_ATTRIBUTE, default_attribute_bindings, link,
};
pub use source::{ShaderSource, ShaderStage};

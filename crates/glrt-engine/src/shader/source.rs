use std::fmt;
use std::path::Path;

use crate::error::FileAccessError;

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw GLSL text for one stage.
///
/// Consumed by [`compile`](super::compile); the text is dropped once the
/// driver has a copy, whatever the compile outcome.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    stage: ShaderStage,
    text: String,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }

    /// Reads a whole stage file into memory.
    ///
    /// Missing, unreadable, non-UTF-8 and empty files are all rejected.
    pub fn read(stage: ShaderStage, path: impl AsRef<Path>) -> Result<Self, FileAccessError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| FileAccessError::new(path, err.to_string()))?;

        if text.trim().is_empty() {
            return Err(FileAccessError::new(path, "file is empty"));
        }

        log::debug!("read {stage} shader '{}' ({} bytes)", path.display(), text.len());

        Ok(Self { stage, text })
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

//! Startup error taxonomy.
//!
//! Each bootstrap phase has its own error type. None of them is recovered
//! locally; they fold into [`StartupError`] and travel up to the caller that
//! decides to terminate.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::shader::ShaderStage;
use crate::uniforms::ObjectFieldKind;

/// A shader stage file could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAccessError {
    path: PathBuf,
    reason: String,
}

impl FileAccessError {
    pub(crate) fn new(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for FileAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot read shader '{}': {}", self.path.display(), self.reason)
    }
}

impl std::error::Error for FileAccessError {}

/// A stage failed to compile. `log` is the driver diagnostic, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub stage: ShaderStage,
    pub log: String,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error compiling {} shader:\n{}", self.stage, self.log)
    }
}

impl std::error::Error for CompileError {}

/// The program failed to link. `log` is the driver diagnostic, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkError {
    pub log: String,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error linking shader program:\n{}", self.log)
    }
}

impl std::error::Error for LinkError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No active uniform with this name.
    Missing { name: String },
    /// The shader declares more object slots than the engine addresses.
    CapacityMismatch { expected: usize, probe: String },
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name } => write!(f, "uniform '{name}' not found in program"),
            Self::CapacityMismatch { expected, probe } => write!(
                f,
                "shader object array is larger than {expected} slots ('{probe}' is active)"
            ),
        }
    }
}

impl std::error::Error for ResolutionError {}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    /// Upload attempted before uniform locations were resolved.
    Unresolved,
    /// The viewport has no area; the shader divides by its height.
    InvalidViewport { width: f32, height: f32 },
    /// A record carries a value whose arity does not match its field.
    ArityMismatch {
        slot: usize,
        field: ObjectFieldKind,
        expected: usize,
        found: usize,
    },
    /// The GPU error flag was set after the upload.
    Gpu { code: u32 },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => f.write_str("scene upload attempted before uniform resolution"),
            Self::InvalidViewport { width, height } => {
                write!(f, "viewport {width}x{height} has no drawable area")
            }
            Self::ArityMismatch {
                slot,
                field,
                expected,
                found,
            } => write!(
                f,
                "objects[{slot}].{field} expects {expected} component(s), record supplies {found}"
            ),
            Self::Gpu { code } => write!(f, "GPU error 0x{code:04x} after scene upload"),
        }
    }
}

impl std::error::Error for UploadError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// More records than object slots.
    CapacityExceeded { capacity: usize },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { capacity } => {
                write!(f, "scene holds at most {capacity} objects")
            }
        }
    }
}

impl std::error::Error for SceneError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A GPU object could not be created.
    Allocation(String),
    /// The GPU error flag was set after drawing.
    Gpu { code: u32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(msg) => write!(f, "GPU allocation failed: {msg}"),
            Self::Gpu { code } => write!(f, "GPU error 0x{code:04x} after draw"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Any failure of the bootstrap sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum StartupError {
    FileAccess(FileAccessError),
    Compile(CompileError),
    Link(LinkError),
    Resolution(ResolutionError),
    Upload(UploadError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileAccess(e) => e.fmt(f),
            Self::Compile(e) => e.fmt(f),
            Self::Link(e) => e.fmt(f),
            Self::Resolution(e) => e.fmt(f),
            Self::Upload(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<FileAccessError> for StartupError {
    fn from(e: FileAccessError) -> Self {
        Self::FileAccess(e)
    }
}

impl From<CompileError> for StartupError {
    fn from(e: CompileError) -> Self {
        Self::Compile(e)
    }
}

impl From<LinkError> for StartupError {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

impl From<ResolutionError> for StartupError {
    fn from(e: ResolutionError) -> Self {
        Self::Resolution(e)
    }
}

impl From<UploadError> for StartupError {
    fn from(e: UploadError) -> Self {
        Self::Upload(e)
    }
}

use std::fmt;

/// One member of the shader's per-object struct.
///
/// The declaration order here is the order of the struct members and of the
/// handle table; do not reorder.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ObjectFieldKind {
    Type,
    Position,
    Radius,
    Colour,
    Attenuation,
    Normal,
}

impl ObjectFieldKind {
    pub const COUNT: usize = 6;

    pub const ALL: [ObjectFieldKind; Self::COUNT] = [
        Self::Type,
        Self::Position,
        Self::Radius,
        Self::Colour,
        Self::Attenuation,
        Self::Normal,
    ];

    /// Member name as spelled in GLSL.
    pub fn name(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Position => "position",
            Self::Radius => "radius",
            Self::Colour => "colour",
            Self::Attenuation => "attenuation",
            Self::Normal => "normal",
        }
    }

    /// Number of components written for this member.
    pub fn arity(self) -> usize {
        match self {
            Self::Type | Self::Radius | Self::Attenuation => 1,
            Self::Position | Self::Colour | Self::Normal => 3,
        }
    }

    /// `Type` is the only integer member.
    pub fn is_integer(self) -> bool {
        self == Self::Type
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ObjectFieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use crate::uniforms::{ObjectFieldKind, UniformValue};

/// Primitive tag written to `objects[i].type`.
///
/// `Empty` (zero) is also what an unwritten slot holds, and the fragment
/// shader skips any slot carrying it. Keep the values in sync with the
/// `TYPE_*` defines in `fs.glsl`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum ObjectType {
    Empty = 0,
    Sphere = 1,
    PointLight = 2,
    /// Bounded plane: position, normal, and radius of the disc.
    Disc = 3,
}

impl ObjectType {
    #[inline]
    pub fn tag(self) -> i32 {
        self as i32
    }

    pub fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(Self::Empty),
            1 => Some(Self::Sphere),
            2 => Some(Self::PointLight),
            3 => Some(Self::Disc),
            _ => None,
        }
    }
}

/// Content of one object slot.
///
/// Only the fields a record sets are uploaded; the rest keep whatever the
/// uniform storage already holds (zero after linking). `type` is always set.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObjectRecord {
    kind: ObjectType,
    fields: [Option<UniformValue>; ObjectFieldKind::COUNT],
}

impl SceneObjectRecord {
    pub fn new(kind: ObjectType) -> Self {
        let mut fields = [None; ObjectFieldKind::COUNT];
        fields[ObjectFieldKind::Type.index()] = Some(UniformValue::Int(kind.tag()));
        Self { kind, fields }
    }

    pub fn sphere(position: [f32; 3], radius: f32, colour: [f32; 3]) -> Self {
        Self::new(ObjectType::Sphere)
            .with_position(position)
            .with_radius(radius)
            .with_colour(colour)
    }

    /// `radius` is the distance at which the attenuation term reaches 1.
    pub fn point_light(
        position: [f32; 3],
        radius: f32,
        colour: [f32; 3],
        attenuation: f32,
    ) -> Self {
        Self::new(ObjectType::PointLight)
            .with_position(position)
            .with_radius(radius)
            .with_colour(colour)
            .with_attenuation(attenuation)
    }

    pub fn disc(position: [f32; 3], radius: f32, colour: [f32; 3], normal: [f32; 3]) -> Self {
        Self::new(ObjectType::Disc)
            .with_position(position)
            .with_radius(radius)
            .with_colour(colour)
            .with_normal(normal)
    }

    pub fn with_position(self, position: [f32; 3]) -> Self {
        self.with(ObjectFieldKind::Position, position)
    }

    pub fn with_radius(self, radius: f32) -> Self {
        self.with(ObjectFieldKind::Radius, radius)
    }

    pub fn with_colour(self, colour: [f32; 3]) -> Self {
        self.with(ObjectFieldKind::Colour, colour)
    }

    pub fn with_attenuation(self, attenuation: f32) -> Self {
        self.with(ObjectFieldKind::Attenuation, attenuation)
    }

    pub fn with_normal(self, normal: [f32; 3]) -> Self {
        self.with(ObjectFieldKind::Normal, normal)
    }

    /// Sets a field without checking the value's arity; the uploader rejects
    /// mismatches.
    ///
    /// An integer `type` retags the record so [`kind`](Self::kind) follows it;
    /// an integer that names no [`ObjectType`] is ignored.
    pub fn with(mut self, field: ObjectFieldKind, value: impl Into<UniformValue>) -> Self {
        let value = value.into();
        if let (ObjectFieldKind::Type, UniformValue::Int(tag)) = (field, value) {
            match ObjectType::from_tag(tag) {
                Some(kind) => self.kind = kind,
                None => {
                    log::warn!("ignoring unknown object type tag {tag}");
                    return self;
                }
            }
        }
        self.fields[field.index()] = Some(value);
        self
    }

    pub fn kind(&self) -> ObjectType {
        self.kind
    }

    pub fn value(&self, field: ObjectFieldKind) -> Option<UniformValue> {
        self.fields[field.index()]
    }

    /// Set fields in declaration order, `type` first.
    pub fn values(&self) -> impl Iterator<Item = (ObjectFieldKind, UniformValue)> + '_ {
        ObjectFieldKind::ALL
            .into_iter()
            .filter_map(|field| self.value(field).map(|v| (field, v)))
    }
}

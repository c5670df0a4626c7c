use super::ObjectFieldKind;

/// Number of object slots. Must equal the length of the shader's
/// `objects[]` array.
pub const OBJECT_CAPACITY: usize = 10;

/// Name of the object array uniform.
pub const OBJECTS_UNIFORM: &str = "objects";

/// Name of the viewport-size (`vec2`) uniform.
pub const VIEWPORT_UNIFORM: &str = "windowDimensions";

/// `objects[<slot>].<field>`
pub fn object_uniform_name(slot: usize, field: ObjectFieldKind) -> String {
    format!("{OBJECTS_UNIFORM}[{slot}].{field}")
}

/// Lazily yields every `(slot, field, name)` for `capacity` slots, slot-major
/// in field declaration order.
pub fn uniform_names(
    capacity: usize,
) -> impl Iterator<Item = (usize, ObjectFieldKind, String)> {
    (0..capacity).flat_map(|slot| {
        ObjectFieldKind::ALL
            .into_iter()
            .map(move |field| (slot, field, object_uniform_name(slot, field)))
    })
}

use super::names::{OBJECT_CAPACITY, VIEWPORT_UNIFORM, object_uniform_name, uniform_names};
use super::ObjectFieldKind;
use crate::error::ResolutionError;
use crate::gpu::Gl;
use crate::shader::LinkedProgram;

/// Resolved uniform locations, addressed by `(slot, field)`, plus the
/// viewport-size location.
///
/// Only [`resolve`] builds one, and only when every location was found, so
/// a table in hand is always complete. Locations are invalid once the program
/// they came from is destroyed.
#[derive(Debug, Clone)]
pub struct UniformHandleTable<L> {
    // Flat, slot-major: index = slot * ObjectFieldKind::COUNT + field.
    objects: Vec<L>,
    viewport: L,
}

impl<L> UniformHandleTable<L> {
    /// Number of object slots covered.
    pub fn capacity(&self) -> usize {
        self.objects.len() / ObjectFieldKind::COUNT
    }

    /// Total number of locations, viewport included.
    pub fn len(&self) -> usize {
        self.objects.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Location of `field` in `slot`; `None` when `slot` is out of range.
    pub fn object(&self, slot: usize, field: ObjectFieldKind) -> Option<&L> {
        if slot >= self.capacity() {
            return None;
        }
        self.objects.get(slot * ObjectFieldKind::COUNT + field.index())
    }

    pub fn viewport(&self) -> &L {
        &self.viewport
    }

    /// Every object location with its address.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ObjectFieldKind, &L)> {
        self.objects.iter().enumerate().map(|(i, location)| {
            (
                i / ObjectFieldKind::COUNT,
                ObjectFieldKind::ALL[i % ObjectFieldKind::COUNT],
                location,
            )
        })
    }
}

/// Looks up every `objects[i].<field>` location and the viewport location.
///
/// All-or-nothing: the first name the program does not expose aborts with
/// [`ResolutionError::Missing`]. A shader whose array is longer than
/// [`OBJECT_CAPACITY`] is rejected with [`ResolutionError::CapacityMismatch`].
pub fn resolve<G: Gl>(
    gl: &G,
    program: &LinkedProgram<G::Program>,
) -> Result<UniformHandleTable<G::UniformLocation>, ResolutionError> {
    let handle = program.handle();
    let lookup = |name: &str| {
        let location = gl.uniform_location(handle, name);
        log::debug!("uniform '{name}' -> {location:?}");
        location
    };

    let mut objects = Vec::with_capacity(OBJECT_CAPACITY * ObjectFieldKind::COUNT);
    for (_, _, name) in uniform_names(OBJECT_CAPACITY) {
        match lookup(&name) {
            Some(location) => objects.push(location),
            None => {
                log::error!("uniform '{name}' not found in program");
                return Err(ResolutionError::Missing { name });
            }
        }
    }

    let viewport = lookup(VIEWPORT_UNIFORM).ok_or_else(|| ResolutionError::Missing {
        name: VIEWPORT_UNIFORM.to_string(),
    })?;

    let probe = object_uniform_name(OBJECT_CAPACITY, ObjectFieldKind::Type);
    if lookup(&probe).is_some() {
        return Err(ResolutionError::CapacityMismatch {
            expected: OBJECT_CAPACITY,
            probe,
        });
    }

    log::info!("resolved {} uniform locations", objects.len() + 1);
    Ok(UniformHandleTable { objects, viewport })
}

use super::SceneObjectRecord;
use crate::coords::Viewport;
use crate::error::SceneError;
use crate::uniforms::OBJECT_CAPACITY;

/// Up to [`OBJECT_CAPACITY`] records, occupying slots `0..len` in order,
/// plus the viewport size. Slots past `len` stay empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    viewport: Viewport,
    objects: Vec<SceneObjectRecord>,
}

impl SceneDescription {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            objects: Vec::with_capacity(OBJECT_CAPACITY),
        }
    }

    /// Appends a record and returns the slot it occupies.
    pub fn push(&mut self, record: SceneObjectRecord) -> Result<usize, SceneError> {
        if self.objects.len() >= OBJECT_CAPACITY {
            return Err(SceneError::CapacityExceeded {
                capacity: OBJECT_CAPACITY,
            });
        }
        self.objects.push(record);
        Ok(self.objects.len() - 1)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replaces the viewport size, e.g. with the drawable size the window
    /// actually got.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn objects(&self) -> &[SceneObjectRecord] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

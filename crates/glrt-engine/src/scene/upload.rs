use super::SceneDescription;
use crate::error::UploadError;
use crate::gpu::Gl;
use crate::uniforms::{UniformHandleTable, UniformValue};

/// Writes `scene` into the uniforms addressed by `table`.
///
/// The viewport size is always written and must have a positive, finite
/// area. Each record writes `type` plus the fields it sets; unset fields and
/// unpopulated slots are not touched.
/// Records are checked for arity mismatches before anything is written, so a
/// rejected scene leaves uniform state unchanged. The owning program must be
/// current.
pub fn upload<G: Gl>(
    gl: &G,
    table: &UniformHandleTable<G::UniformLocation>,
    scene: &SceneDescription,
) -> Result<(), UploadError> {
    let viewport = scene.viewport();
    if !viewport.is_valid() {
        log::error!("refusing to upload {}x{} viewport", viewport.width, viewport.height);
        return Err(UploadError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    for (slot, record) in scene.objects().iter().enumerate() {
        for (field, value) in record.values() {
            if !value.fits(field) {
                return Err(UploadError::ArityMismatch {
                    slot,
                    field,
                    expected: field.arity(),
                    found: value.arity(),
                });
            }
        }
    }

    UniformValue::Vec2(viewport.as_array()).write(gl, table.viewport());

    let mut writes = 1;
    // SceneDescription never holds more records than the table has slots.
    for (slot, record) in scene.objects().iter().enumerate().take(table.capacity()) {
        for (field, value) in record.values() {
            if let Some(location) = table.object(slot, field) {
                value.write(gl, location);
                writes += 1;
            }
        }
        log::debug!("uploaded objects[{slot}] ({:?})", record.kind());
    }

    let code = gl.error();
    if code != 0 {
        log::error!("GPU error 0x{code:04x} after scene upload");
        return Err(UploadError::Gpu { code });
    }

    log::info!(
        "uploaded scene: {} object(s), {writes} uniform write(s)",
        scene.len()
    );
    Ok(())
}

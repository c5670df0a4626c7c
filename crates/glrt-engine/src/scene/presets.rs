use super::{SceneDescription, SceneObjectRecord};
use crate::coords::Viewport;
use crate::error::SceneError;

pub const DEMO_VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

/// The stock startup scene: a cyan sphere over a grey ground disc, lit by a
/// single point light, with a handful of small spheres around it. Occupies
/// slots 0..8; slots 8 and 9 stay empty.
pub fn demo_scene() -> Result<SceneDescription, SceneError> {
    let mut scene = SceneDescription::new(DEMO_VIEWPORT);

    scene.push(SceneObjectRecord::sphere([0.0, 0.0, -10.0], 3.0, [0.0, 1.0, 1.0]))?;
    scene.push(SceneObjectRecord::point_light(
        [0.0, 3.0, 0.0],
        4.0,
        [10.0, 10.0, 10.0],
        1.0,
    ))?;
    scene.push(SceneObjectRecord::disc(
        [0.0, -3.0, 0.0],
        20.0,
        [0.5, 0.5, 0.5],
        [0.0, 1.0, 0.0],
    ))?;
    scene.push(SceneObjectRecord::sphere([0.0, 1.3, -5.0], 0.1, [1.0, 0.0, 0.0]))?;
    scene.push(SceneObjectRecord::sphere([0.5, -0.5, -2.0], 0.5, [1.0, 1.0, 0.0]))?;
    scene.push(SceneObjectRecord::sphere([-1.0, -0.5, -5.0], 0.05, [1.0, 1.0, 0.0]))?;
    scene.push(SceneObjectRecord::sphere([0.0, -0.13, -0.11], 0.1, [1.0, 1.0, 1.0]))?;
    scene.push(SceneObjectRecord::sphere([10.0, 5.0, -30.0], 1.0, [1.0, 1.0, 1.0]))?;

    Ok(scene)
}

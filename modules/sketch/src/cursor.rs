use airsketch_world::errors::Result;
use airsketch_world::prelude::{Entity, Scene, Transform};

/// Places a transform `distance` units in front of `camera`, keeping the camera's
/// orientation.
#[inline]
pub fn cursor_transform(camera: Transform, distance: f32) -> Transform {
    let mut transform = camera;
    transform.position += camera.forward() * distance;
    transform
}

/// Moves `cursor` in front of `camera`, in world space.
pub fn position_cursor(
    scene: &mut Scene,
    cursor: Entity,
    camera: Transform,
    distance: f32,
) -> Result<Transform> {
    let transform = cursor_transform(camera, distance);
    scene.set_transform(cursor, transform)?;
    Ok(transform)
}

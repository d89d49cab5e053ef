//! Hit testing of screen points against the scene.

use airsketch::math::prelude::{Ray, Vector2};
use airsketch_world::prelude::{Entity, Scene};

pub trait HitTest {
    /// Returns the topmost node under `point`, in screen space.
    fn hit_test(&self, scene: &Scene, point: Vector2<f32>) -> Option<Entity>;
}

impl<F> HitTest for F
where
    F: Fn(&Scene, Vector2<f32>) -> Option<Entity>,
{
    fn hit_test(&self, scene: &Scene, point: Vector2<f32>) -> Option<Entity> {
        self(scene, point)
    }
}

/// Casts the ray of a screen point into the scene, and returns the nearest shape
/// it hits.
pub struct RayHitTest<P> {
    project: P,
}

impl<P> RayHitTest<P>
where
    P: Fn(Vector2<f32>) -> Option<Ray>,
{
    /// `project` turns a screen point into a world space ray.
    pub fn new(project: P) -> Self {
        RayHitTest { project }
    }
}

impl<P> HitTest for RayHitTest<P>
where
    P: Fn(Vector2<f32>) -> Option<Ray>,
{
    fn hit_test(&self, scene: &Scene, point: Vector2<f32>) -> Option<Entity> {
        (self.project)(point).and_then(|ray| scene.raycast(&ray))
    }
}

use cgmath::prelude::*;
use cgmath::Vector3;

/// A half-line in world space, used for picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f32>,
    /// Always normalized.
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Creates a ray, normalizing `direction`. Returns `None` for a zero direction.
    pub fn new<T1, T2>(origin: T1, direction: T2) -> Option<Self>
    where
        T1: Into<Vector3<f32>>,
        T2: Into<Vector3<f32>>,
    {
        let direction = direction.into();
        if direction.magnitude2() <= ::std::f32::EPSILON {
            return None;
        }

        Some(Ray {
            origin: origin.into(),
            direction: direction.normalize(),
        })
    }

    /// Returns the point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Returns the distance to the nearest intersection with a sphere in front of
    /// the origin. A ray starting inside the sphere hits its far side.
    pub fn intersect_sphere<T>(&self, center: T, radius: f32) -> Option<f32>
    where
        T: Into<Vector3<f32>>,
    {
        let oc = self.origin - center.into();
        let b = oc.dot(self.direction);
        let c = oc.magnitude2() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sq = discriminant.sqrt();
        let near = -b - sq;
        let far = -b + sq;

        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

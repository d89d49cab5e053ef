//! This module contains the math utils that mainly comes from `cgmath`.

pub use cgmath::*;

pub mod ray;

pub mod prelude {
    pub use super::ray::Ray;
    // cgmath's `Transform` traits are left out, the scene graph has its own `Transform`.
    pub use cgmath::prelude::{
        Angle, Array, ElementWise, EuclideanSpace, InnerSpace, Matrix, MetricSpace, One,
        Rotation, Rotation3, SquareMatrix, VectorSpace, Zero,
    };
    pub use cgmath::{Deg, Euler, Matrix3, Matrix4, Quaternion, Rad, Vector2, Vector3, Vector4};
}

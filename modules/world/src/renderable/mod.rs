//! Shapes attached to entities, and the traversal that submits them to a `Renderer`.

pub mod headless;

pub mod prelude {
    pub use super::headless::HeadlessRenderer;
    pub use super::{Renderable, Renderer, Shape, ShapeRenderer};
}

use airsketch::utils::prelude::Color;
use serde::{Deserialize, Serialize};

use crate::spatial::prelude::{SceneGraph, Transform};
use crate::utils::Component;
use crate::Entity;

/// The geometry of a renderable entity, in its local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { radius: f32 },
}

impl Shape {
    #[inline]
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere { radius }
    }

    /// Radius of the smallest sphere that contains this shape.
    #[inline]
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Sphere { radius } => radius,
        }
    }
}

/// A shape with its material, and the world transform it was submitted with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeRenderer {
    pub shape: Shape,
    pub color: Color,
    pub visible: bool,

    pub(crate) transform: Transform,
    pub(crate) ent: Option<Entity>,
}

impl ShapeRenderer {
    pub fn new(shape: Shape, color: Color) -> Self {
        ShapeRenderer {
            shape,
            color,
            visible: true,
            transform: Transform::default(),
            ent: None,
        }
    }

    /// The world transform at the time of submission.
    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The owner entity, set during traversal.
    #[inline]
    pub fn ent(&self) -> Option<Entity> {
        self.ent
    }
}

impl From<Shape> for ShapeRenderer {
    fn from(shape: Shape) -> Self {
        ShapeRenderer::new(shape, Color::white())
    }
}

pub trait Renderer {
    /// Receives every visible shape of one traversal.
    fn submit(&mut self, shapes: &[ShapeRenderer]);
}

pub struct Renderable {
    shapes: Component<ShapeRenderer>,
}

impl Default for Renderable {
    fn default() -> Self {
        Renderable::new()
    }
}

impl Renderable {
    pub fn new() -> Self {
        Renderable {
            shapes: Component::new(),
        }
    }

    #[inline]
    pub fn add_shape<T: Into<ShapeRenderer>>(&mut self, ent: Entity, shape: T) {
        let mut shape = shape.into();
        shape.ent = Some(ent);
        self.shapes.add(ent, shape);
    }

    #[inline]
    pub fn shape(&self, ent: Entity) -> Option<&ShapeRenderer> {
        self.shapes.get(ent)
    }

    #[inline]
    pub fn shape_mut(&mut self, ent: Entity) -> Option<&mut ShapeRenderer> {
        self.shapes.get_mut(ent)
    }

    #[inline]
    pub fn remove_shape(&mut self, ent: Entity) {
        self.shapes.remove(ent);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[inline]
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (Entity, &'a ShapeRenderer)> + 'a {
        self.shapes.iter()
    }
}

impl Renderable {
    /// Walks every visible shape, resolves its world transform and submits the batch.
    pub fn draw<R: Renderer>(&self, renderer: &mut R, sg: &SceneGraph) {
        let batch: Vec<_> = self
            .shapes
            .iter()
            .filter(|(_, v)| v.visible)
            .filter_map(|(ent, v)| {
                sg.transform(ent).map(|transform| ShapeRenderer {
                    transform,
                    ent: Some(ent),
                    ..*v
                })
            })
            .collect();

        renderer.submit(&batch);
    }
}

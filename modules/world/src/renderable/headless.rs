use crate::Entity;

use super::prelude::{Renderer, ShapeRenderer};

/// A renderer that keeps the last submitted batch around for inspection.
#[derive(Default)]
pub struct HeadlessRenderer {
    frames: usize,
    shapes: Vec<ShapeRenderer>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        HeadlessRenderer::default()
    }

    /// Number of traversals received so far.
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Shapes of the last traversal.
    #[inline]
    pub fn shapes(&self) -> &[ShapeRenderer] {
        &self.shapes
    }

    pub fn find(&self, ent: Entity) -> Option<&ShapeRenderer> {
        self.shapes.iter().find(|v| v.ent() == Some(ent))
    }
}

impl Renderer for HeadlessRenderer {
    fn submit(&mut self, shapes: &[ShapeRenderer]) {
        self.frames += 1;
        self.shapes.clear();
        self.shapes.extend_from_slice(shapes);
    }
}

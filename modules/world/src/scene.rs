//! Scenes own every entity of a session, together with their hierarchy, names and shapes.

use airsketch::math::prelude::{Quaternion, Ray, Vector3};
use airsketch::utils::prelude::HandlePool;

use crate::errors::Result;
use crate::renderable::prelude::{Renderable, Renderer, ShapeRenderer};
use crate::spatial::prelude::{SceneGraph, Transform};
use crate::tags::Tags;
use crate::Entity;

/// A `Scene` is the single tree of entities that the user edits. Every entity has a
/// node in the scene graph and a name; some of them also carry a shape that gets
/// submitted to the renderer when the scene is drawn.
pub struct Scene {
    entities: HandlePool<Entity>,
    tags: Tags,

    pub nodes: SceneGraph,
    pub renderables: Renderable,
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Scene {
            entities: HandlePool::new(),
            tags: Tags::new(),
            nodes: SceneGraph::new(),
            renderables: Renderable::new(),
        }
    }

    /// Get the length of entitis in this Scene.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Checks if specified `Entity` was created by this scene, and has not been
    /// deleted yet.
    #[inline]
    pub fn contains(&self, ent: Entity) -> bool {
        self.entities.contains(ent)
    }

    /// Create a new Entity as a root.
    #[inline]
    pub fn create<T: AsRef<str>>(&mut self, name: T) -> Entity {
        let e = self.entities.create();
        self.nodes.add(e);
        self.tags.add(e, name.as_ref());
        e
    }

    /// Get the name of this Entity.
    #[inline]
    pub fn name(&self, ent: Entity) -> Option<&str> {
        self.tags.name(ent)
    }

    /// Set the name of this Entity.
    #[inline]
    pub fn set_name<T: AsRef<str>>(&mut self, ent: Entity, name: T) {
        if self.contains(ent) {
            self.tags.add(ent, name.as_ref());
        }
    }

    /// Removes a Entity and all of its descendants from this scene.
    pub fn delete(&mut self, ent: Entity) -> Option<Vec<Entity>> {
        let deletions = self.nodes.remove(ent)?;

        for &v in &deletions {
            self.entities.free(v);
            self.tags.remove(v);
            self.renderables.remove_shape(v);
        }

        Some(deletions)
    }

    /// Finds a Entity by name and returns it.
    ///
    /// If no Entity with name can be found, None is returned. If name contains a '/' character,
    /// it traverses the hierarchy like a path name.
    pub fn find<N: AsRef<str>>(&self, name: N) -> Option<Entity> {
        let path = name.as_ref().trim_start_matches('/');
        let (first, rest) = match path.find('/') {
            Some(i) => (&path[..i], &path[i + 1..]),
            None => (path, ""),
        };

        self.nodes
            .roots()
            .filter(|&v| self.tags.name(v) == Some(first))
            .filter_map(|v| self.find_from(v, rest))
            .next()
    }

    /// Finds a Entity from specified searching root and returns it.
    ///
    /// If no Entity with name can be found, None is returned. If name contains a '/' character,
    /// it traverses the hierarchy like a path name.
    pub fn find_from<N: AsRef<str>>(&self, root: Entity, name: N) -> Option<Entity> {
        let mut iter = root;

        for component in name.as_ref().split('/').filter(|v| !v.is_empty()) {
            iter = self
                .nodes
                .children(iter)
                .find(|&child| self.tags.name(child) == Some(component))?;
        }

        Some(iter)
    }

    /// Draw current scene. The traversal only borrows the scene, so no structural change
    /// can happen before it returns.
    #[inline]
    pub fn draw<R: Renderer>(&self, renderer: &mut R) {
        self.renderables.draw(renderer, &self.nodes);
    }

    /// Returns the nearest entity whose shape is hit by `ray`, in world space.
    pub fn raycast(&self, ray: &Ray) -> Option<Entity> {
        let mut nearest: Option<(Entity, f32)> = None;

        for (ent, v) in self.renderables.iter() {
            if !v.visible {
                continue;
            }

            let transform = match self.nodes.transform(ent) {
                Some(transform) => transform,
                None => continue,
            };

            let radius = v.shape.bounding_radius() * transform.scale.abs();
            if let Some(t) = ray.intersect_sphere(transform.position, radius) {
                if nearest.map(|(_, n)| t < n).unwrap_or(true) {
                    nearest = Some((ent, t));
                }
            }
        }

        nearest.map(|(ent, _)| ent)
    }
}

impl Scene {
    /// Add shape component to this Entity.
    #[inline]
    pub fn add_shape<T: Into<ShapeRenderer>>(&mut self, ent: Entity, shape: T) {
        if self.contains(ent) {
            self.renderables.add_shape(ent, shape);
        }
    }

    #[inline]
    pub fn shape(&self, ent: Entity) -> Option<&ShapeRenderer> {
        self.renderables.shape(ent)
    }

    #[inline]
    pub fn shape_mut(&mut self, ent: Entity) -> Option<&mut ShapeRenderer> {
        self.renderables.shape_mut(ent)
    }

    /// Remove shape component from this Entity.
    #[inline]
    pub fn remove_shape(&mut self, ent: Entity) {
        self.renderables.remove_shape(ent);
    }
}

impl Scene {
    /// Gets the parent node.
    #[inline]
    pub fn parent(&self, ent: Entity) -> Option<Entity> {
        self.nodes.parent(ent)
    }

    /// Returns ture if this is the leaf of a hierarchy, aka. has no child.
    #[inline]
    pub fn is_leaf(&self, ent: Entity) -> bool {
        self.nodes.is_leaf(ent)
    }

    /// Returns ture if this is the root of a hierarchy, aka. has no parent.
    #[inline]
    pub fn is_root(&self, ent: Entity) -> bool {
        self.nodes.is_root(ent)
    }

    /// Attachs a new child to parent transform, after existing children.
    #[inline]
    pub fn set_parent<T>(&mut self, child: Entity, parent: T, keep_world_pose: bool) -> Result<()>
    where
        T: Into<Option<Entity>>,
    {
        self.nodes.set_parent(child, parent, keep_world_pose)
    }

    /// Detach a transform from its parent and siblings. Children are not affected.
    #[inline]
    pub fn remove_from_parent(&mut self, child: Entity, keep_world_pose: bool) -> Result<()> {
        self.nodes.remove_from_parent(child, keep_world_pose)
    }

    /// Puts `new` at the place of `old` among its siblings, and detachs `old`.
    #[inline]
    pub fn replace(&mut self, old: Entity, new: Entity) -> Result<()> {
        self.nodes.replace(old, new)
    }

    /// Returns an iterator of references to its ancestors.
    #[inline]
    pub fn ancestors<'a>(&'a self, ent: Entity) -> impl Iterator<Item = Entity> + 'a {
        self.nodes.ancestors(ent)
    }

    /// Return true if rhs is one of the ancestor of this `Node`.
    #[inline]
    pub fn is_ancestor(&self, lhs: Entity, rhs: Entity) -> bool {
        self.nodes.is_ancestor(lhs, rhs)
    }

    /// Returns an iterator of references to this transform's children.
    #[inline]
    pub fn children<'a>(&'a self, ent: Entity) -> impl Iterator<Item = Entity> + 'a {
        self.nodes.children(ent)
    }

    /// Returns an iterator of references to this transform's descendants in tree order.
    #[inline]
    pub fn descendants<'a>(&'a self, ent: Entity) -> impl Iterator<Item = Entity> + 'a {
        self.nodes.descendants(ent)
    }

    /// Arithmetic mean of the world positions of `ents`.
    #[inline]
    pub fn centroid(&self, ents: &[Entity]) -> Result<Vector3<f32>> {
        self.nodes.centroid(ents)
    }
}

impl Scene {
    /// Gets the transform in world space.
    #[inline]
    pub fn transform(&self, ent: Entity) -> Option<Transform> {
        self.nodes.transform(ent)
    }

    /// Sets the transform in world space.
    #[inline]
    pub fn set_transform(&mut self, ent: Entity, transform: Transform) -> Result<()> {
        self.nodes.set_transform(ent, transform)
    }

    /// Gets the transform in local space.
    #[inline]
    pub fn local_transform(&self, ent: Entity) -> Option<Transform> {
        self.nodes.local_transform(ent)
    }

    /// Sets the transform in local space.
    #[inline]
    pub fn set_local_transform(&mut self, ent: Entity, transform: Transform) {
        self.nodes.set_local_transform(ent, transform);
    }

    /// Moves the transform in the direction and distance of translation.
    #[inline]
    pub fn translate<T>(&mut self, ent: Entity, translation: T)
    where
        T: Into<Vector3<f32>>,
    {
        self.nodes.translate(ent, translation);
    }

    /// Gets position of the transform in world space.
    #[inline]
    pub fn position(&self, ent: Entity) -> Option<Vector3<f32>> {
        self.nodes.position(ent)
    }

    /// Sets position of the transform in world space.
    #[inline]
    pub fn set_position<T>(&mut self, ent: Entity, position: T)
    where
        T: Into<Vector3<f32>>,
    {
        self.nodes.set_position(ent, position);
    }

    /// Gets position of the transform in local space.
    #[inline]
    pub fn local_position(&self, ent: Entity) -> Option<Vector3<f32>> {
        self.nodes.local_position(ent)
    }

    /// Sets position of the transform in local space.
    #[inline]
    pub fn set_local_position<T>(&mut self, ent: Entity, position: T)
    where
        T: Into<Vector3<f32>>,
    {
        self.nodes.set_local_position(ent, position);
    }

    /// Gets rotation of the transform in world space.
    #[inline]
    pub fn rotation(&self, ent: Entity) -> Option<Quaternion<f32>> {
        self.nodes.rotation(ent)
    }

    /// Sets rotation of the transform in world space.
    #[inline]
    pub fn set_rotation<T>(&mut self, ent: Entity, rotation: T)
    where
        T: Into<Quaternion<f32>>,
    {
        self.nodes.set_rotation(ent, rotation);
    }

    /// Gets rotation of the transform in local space.
    #[inline]
    pub fn local_rotation(&self, ent: Entity) -> Option<Quaternion<f32>> {
        self.nodes.local_rotation(ent)
    }

    /// Sets rotation of the transform in local space.
    #[inline]
    pub fn set_local_rotation<T>(&mut self, ent: Entity, rotation: T)
    where
        T: Into<Quaternion<f32>>,
    {
        self.nodes.set_local_rotation(ent, rotation);
    }

    /// Gets scale of the transform in world space.
    #[inline]
    pub fn scale(&self, ent: Entity) -> Option<f32> {
        self.nodes.scale(ent)
    }

    /// Sets scale of the transform in world space.
    #[inline]
    pub fn set_scale(&mut self, ent: Entity, scale: f32) {
        self.nodes.set_scale(ent, scale);
    }

    /// Gets scale of the transform in local space.
    #[inline]
    pub fn local_scale(&self, ent: Entity) -> Option<f32> {
        self.nodes.local_scale(ent)
    }

    /// Sets scale of the transform in local space.
    #[inline]
    pub fn set_local_scale(&mut self, ent: Entity, scale: f32) {
        self.nodes.set_local_scale(ent, scale);
    }
}

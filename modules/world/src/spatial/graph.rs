use std::iter;

use airsketch::math::prelude::*;
use airsketch::utils::prelude::{FastHashMap, FastHashSet};

use super::node::Node;
use super::transform::Transform;
use crate::errors::{Error, Result};
use crate::Entity;

/// A simple scene graph that used to store and manipulate the postiion, rotation and scale
/// of the object. We do also keeps a tree relationships betweens object in scene graph, so
/// you can access properties of transformation in both local and world space.
///
/// The hierarchy is kept acyclic: attaching a node to itself or to one of its
/// descendants is rejected and leaves the graph untouched.
pub struct SceneGraph {
    remap: FastHashMap<Entity, usize>,
    entities: Vec<Entity>,
    nodes: Vec<Node>,
    local_transforms: Vec<Transform>,

    pub(crate) roots: FastHashSet<Entity>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        SceneGraph::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        SceneGraph {
            remap: FastHashMap::default(),
            entities: Vec::new(),
            nodes: Vec::new(),
            local_transforms: Vec::new(),
            roots: FastHashSet::default(),
        }
    }

    /// Adds a node as a new root.
    pub(crate) fn add(&mut self, ent: Entity) {
        assert!(
            !self.remap.contains_key(&ent),
            "Ent already has components in SceneGraph."
        );

        self.remap.insert(ent, self.entities.len());
        self.entities.push(ent);
        self.nodes.push(Node::default());
        self.local_transforms.push(Transform::default());
        self.roots.insert(ent);
    }

    /// Removes a node and all of its descendants from SceneGraph.
    pub(crate) fn remove(&mut self, ent: Entity) -> Option<Vec<Entity>> {
        if !self.remap.contains_key(&ent) {
            return None;
        }

        self.unlink(ent);
        self.roots.remove(&ent);

        let removes: Vec<_> = iter::once(ent).chain(self.descendants(ent)).collect();
        for w in &removes {
            let index = self.remap.remove(w)?;
            self.entities.swap_remove(index);
            self.nodes.swap_remove(index);
            self.local_transforms.swap_remove(index);

            if index < self.entities.len() {
                self.remap.insert(self.entities[index], index);
            }
        }

        Some(removes)
    }

    /// Returns true if `ent` has a node in this graph.
    #[inline]
    pub fn contains(&self, ent: Entity) -> bool {
        self.remap.contains_key(&ent)
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns an iterator over the nodes without parent.
    #[inline]
    pub fn roots<'a>(&'a self) -> impl Iterator<Item = Entity> + 'a {
        self.roots.iter().cloned()
    }

    #[inline]
    fn index(&self, ent: Entity) -> Result<usize> {
        self.remap
            .get(&ent)
            .cloned()
            .ok_or_else(|| Error::NonNodeFound(ent))
    }

    /// Index of a node that is known to be alive, e.g. reached through links.
    #[inline]
    fn slot(&self, ent: Entity) -> usize {
        self.remap[&ent]
    }
}

impl SceneGraph {
    /// Gets the parent node.
    #[inline]
    pub fn parent(&self, ent: Entity) -> Option<Entity> {
        self.remap.get(&ent).and_then(|v| self.nodes[*v].parent)
    }

    /// Returns ture if this is the leaf of a hierarchy, aka. has no child.
    #[inline]
    pub fn is_leaf(&self, ent: Entity) -> bool {
        self.remap
            .get(&ent)
            .map(|v| self.nodes[*v].first_child.is_none())
            .unwrap_or(false)
    }

    /// Returns ture if this is the root of a hierarchy, aka. has no parent.
    #[inline]
    pub fn is_root(&self, ent: Entity) -> bool {
        self.remap
            .get(&ent)
            .map(|v| self.nodes[*v].parent.is_none())
            .unwrap_or(false)
    }

    /// Attachs `child` to `parent` after its existing children, or makes it a root if
    /// `parent` is `None`.
    ///
    /// If `keep_world_pose` is true, the local transform of `child` is recomputed in
    /// the space of its new parent, so its world transform stays the same.
    pub fn set_parent<T>(&mut self, child: Entity, parent: T, keep_world_pose: bool) -> Result<()>
    where
        T: Into<Option<Entity>>,
    {
        let child_index = self.index(child)?;
        let parent = parent.into();

        if let Some(parent) = parent {
            self.index(parent)?;

            if parent == child {
                return Err(Error::CanNotAttachSelfAsParent);
            }

            if self.is_ancestor(parent, child) {
                return Err(Error::CanNotAttachToDescendant(child, parent));
            }
        }

        // Everything that may fail is computed before the links are touched.
        let local = if keep_world_pose {
            let world = self.world_transform_at(child_index);
            let space = parent
                .map(|v| self.world_transform_at(self.slot(v)))
                .unwrap_or_default();

            let local = world
                .relative_to(space)
                .ok_or_else(|| Error::CanNotInverseTransform(parent.unwrap_or(child)))?;

            Some(local)
        } else {
            None
        };

        self.unlink(child);

        if let Some(parent) = parent {
            self.link_last(child, parent);
        }

        if let Some(local) = local {
            self.local_transforms[child_index] = local;
        }

        Ok(())
    }

    /// Detach a transform from its parent and siblings. Children are not affected.
    #[inline]
    pub fn remove_from_parent(&mut self, child: Entity, keep_world_pose: bool) -> Result<()> {
        self.set_parent(child, None, keep_world_pose)
    }

    /// Puts `new` at the place of `old` in the children of `old`'s parent, then detachs
    /// `old` as a root. Local transforms are left as they are.
    pub fn replace(&mut self, old: Entity, new: Entity) -> Result<()> {
        let old_index = self.index(old)?;
        self.index(new)?;

        if old == new {
            return Err(Error::CanNotAttachSelfAsParent);
        }

        let parent = self.nodes[old_index].parent;
        if let Some(parent) = parent {
            if parent == new || self.is_ancestor(parent, new) {
                return Err(Error::CanNotAttachToDescendant(new, parent));
            }
        }

        self.unlink(new);

        if parent.is_some() {
            self.link_before(new, old);
        }

        self.unlink(old);
        Ok(())
    }

    fn unlink(&mut self, child: Entity) {
        let child_index = self.slot(child);
        let (parent, next_sib, prev_sib) = {
            let node = &mut self.nodes[child_index];
            (
                node.parent.take(),
                node.next_sib.take(),
                node.prev_sib.take(),
            )
        };

        if let Some(next_sib) = next_sib {
            let nsi = self.slot(next_sib);
            self.nodes[nsi].prev_sib = prev_sib;
        } else if let Some(parent) = parent {
            let pi = self.slot(parent);
            self.nodes[pi].last_child = prev_sib;
        }

        if let Some(prev_sib) = prev_sib {
            let psi = self.slot(prev_sib);
            self.nodes[psi].next_sib = next_sib;
        } else if let Some(parent) = parent {
            let pi = self.slot(parent);
            self.nodes[pi].first_child = next_sib;
        }

        self.roots.insert(child);
    }

    /// Links a detached `child` as the last child of `parent`.
    fn link_last(&mut self, child: Entity, parent: Entity) {
        let pi = self.slot(parent);
        let last = ::std::mem::replace(&mut self.nodes[pi].last_child, Some(child));

        match last {
            Some(last) => {
                let li = self.slot(last);
                self.nodes[li].next_sib = Some(child);
            }
            None => self.nodes[pi].first_child = Some(child),
        }

        let ci = self.slot(child);
        self.nodes[ci].parent = Some(parent);
        self.nodes[ci].prev_sib = last;
        self.roots.remove(&child);
    }

    /// Links a detached `child` right before `sibling`, which must have a parent.
    fn link_before(&mut self, child: Entity, sibling: Entity) {
        let si = self.slot(sibling);
        let parent = self.nodes[si].parent;
        let prev_sib = ::std::mem::replace(&mut self.nodes[si].prev_sib, Some(child));

        match (prev_sib, parent) {
            (Some(prev_sib), _) => {
                let psi = self.slot(prev_sib);
                self.nodes[psi].next_sib = Some(child);
            }
            (None, Some(parent)) => {
                let pi = self.slot(parent);
                self.nodes[pi].first_child = Some(child);
            }
            (None, None) => {}
        }

        let ci = self.slot(child);
        self.nodes[ci].parent = parent;
        self.nodes[ci].prev_sib = prev_sib;
        self.nodes[ci].next_sib = Some(sibling);
        self.roots.remove(&child);
    }

    /// Returns an iterator of references to its ancestors.
    #[inline]
    pub fn ancestors(&self, ent: Entity) -> Ancestors {
        Ancestors {
            cursor: self.parent(ent),
            scene: self,
        }
    }

    /// Return true if rhs is one of the ancestor of this `Node`.
    #[inline]
    pub fn is_ancestor(&self, lhs: Entity, rhs: Entity) -> bool {
        self.ancestors(lhs).any(|v| v == rhs)
    }

    /// Returns an iterator of references to this transform's children.
    #[inline]
    pub fn children(&self, ent: Entity) -> Children {
        let first_child = self
            .remap
            .get(&ent)
            .and_then(|v| self.nodes[*v].first_child);

        Children {
            cursor: first_child,
            scene: self,
        }
    }

    /// Returns an iterator of references to this transform's descendants in tree order.
    #[inline]
    pub fn descendants(&self, ent: Entity) -> Descendants {
        let first_child = self
            .remap
            .get(&ent)
            .and_then(|v| self.nodes[*v].first_child);

        Descendants {
            root: ent,
            cursor: first_child,
            scene: self,
        }
    }
}

/// An iterator of references to its ancestors.
pub struct Ancestors<'a> {
    scene: &'a SceneGraph,
    cursor: Option<Entity>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let ent = self.cursor?;
        let index = self.scene.slot(ent);
        ::std::mem::replace(&mut self.cursor, self.scene.nodes[index].parent)
    }
}

/// An iterator of references to its children.
pub struct Children<'a> {
    scene: &'a SceneGraph,
    cursor: Option<Entity>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let ent = self.cursor?;
        let index = self.scene.slot(ent);
        ::std::mem::replace(&mut self.cursor, self.scene.nodes[index].next_sib)
    }
}

/// An iterator of references to its descendants, in tree order.
pub struct Descendants<'a> {
    scene: &'a SceneGraph,
    root: Entity,
    cursor: Option<Entity>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let ent = self.cursor?;
        let mut v = self.scene.nodes[self.scene.slot(ent)];

        // Deep first search when iterating children recursively.
        if v.first_child.is_some() {
            return ::std::mem::replace(&mut self.cursor, v.first_child);
        }

        if v.next_sib.is_some() {
            return ::std::mem::replace(&mut self.cursor, v.next_sib);
        }

        // Travel back when we reach leaf-node.
        while let Some(parent) = v.parent {
            if parent == self.root {
                break;
            }

            v = self.scene.nodes[self.scene.slot(parent)];
            if v.next_sib.is_some() {
                return ::std::mem::replace(&mut self.cursor, v.next_sib);
            }
        }

        self.cursor.take()
    }
}

impl SceneGraph {
    fn world_transform_at(&self, index: usize) -> Transform {
        let ent = self.entities[index];
        self.ancestors(ent)
            .map(|v| self.slot(v))
            .fold(self.local_transforms[index], |acc, rhs| {
                self.local_transforms[rhs] * acc
            })
    }

    /// Gets the transform in world space.
    #[inline]
    pub fn transform(&self, ent: Entity) -> Option<Transform> {
        self.remap
            .get(&ent)
            .map(|&index| self.world_transform_at(index))
    }

    /// Sets the transform in world space.
    pub fn set_transform(&mut self, ent: Entity, transform: Transform) -> Result<()> {
        let index = self.index(ent)?;
        let space = self
            .parent(ent)
            .map(|v| self.world_transform_at(self.slot(v)))
            .unwrap_or_default();

        let parent = self.parent(ent).unwrap_or(ent);
        self.local_transforms[index] = transform
            .relative_to(space)
            .ok_or_else(|| Error::CanNotInverseTransform(parent))?;

        Ok(())
    }

    /// Gets the transform in local space.
    #[inline]
    pub fn local_transform(&self, ent: Entity) -> Option<Transform> {
        self.remap
            .get(&ent)
            .map(|&index| self.local_transforms[index])
    }

    /// Sets the transform in local space.
    #[inline]
    pub fn set_local_transform(&mut self, ent: Entity, transform: Transform) {
        if let Some(&index) = self.remap.get(&ent) {
            self.local_transforms[index] = transform;
        }
    }

    /// Computes the arithmetic mean of the world positions of `ents`.
    pub fn centroid(&self, ents: &[Entity]) -> Result<Vector3<f32>> {
        if ents.is_empty() {
            return Err(Error::EmptyCentroidGroup);
        }

        let mut sum = Vector3::zero();
        for &v in ents {
            let index = self.index(v)?;
            sum += self.world_transform_at(index).position;
        }

        Ok(sum / ents.len() as f32)
    }
}

impl SceneGraph {
    /// Moves the transform in the direction and distance of translation.
    #[inline]
    pub fn translate<T>(&mut self, ent: Entity, translation: T)
    where
        T: Into<Vector3<f32>>,
    {
        if let Some(&index) = self.remap.get(&ent) {
            self.local_transforms[index].position += translation.into();
        }
    }

    /// Gets position of the transform in world space.
    #[inline]
    pub fn position(&self, ent: Entity) -> Option<Vector3<f32>> {
        self.transform(ent).map(|transform| transform.position)
    }

    /// Sets position of the transform in world space.
    pub fn set_position<T>(&mut self, ent: Entity, position: T)
    where
        T: Into<Vector3<f32>>,
    {
        if let Some(&index) = self.remap.get(&ent) {
            let t = self
                .parent(ent)
                .map(|v| self.world_transform_at(self.slot(v)))
                .unwrap_or_default();

            if let Some(inverse) = t.inverse() {
                self.local_transforms[index].position = inverse.transform_point(position);
            }
        }
    }

    /// Gets position of the transform in local space.
    #[inline]
    pub fn local_position(&self, ent: Entity) -> Option<Vector3<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| self.local_transforms[index].position)
    }

    /// Sets position of the transform in local space.
    #[inline]
    pub fn set_local_position<T>(&mut self, ent: Entity, position: T)
    where
        T: Into<Vector3<f32>>,
    {
        if let Some(&index) = self.remap.get(&ent) {
            self.local_transforms[index].position = position.into();
        }
    }
}

impl SceneGraph {
    fn ancestor_rotation(&self, ent: Entity) -> Quaternion<f32> {
        self.ancestors(ent)
            .map(|v| self.slot(v))
            .fold(Quaternion::one(), |acc, rhs| {
                self.local_transforms[rhs].rotation * acc
            })
    }

    /// Get rotation of the transform in world space.
    #[inline]
    pub fn rotation(&self, ent: Entity) -> Option<Quaternion<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| self.ancestor_rotation(ent) * self.local_transforms[index].rotation)
    }

    /// Sets rotation of the transform in world space.
    pub fn set_rotation<T>(&mut self, ent: Entity, rotation: T)
    where
        T: Into<Quaternion<f32>>,
    {
        if let Some(&index) = self.remap.get(&ent) {
            let ancestor_rotation = self.ancestor_rotation(ent);
            self.local_transforms[index].rotation = ancestor_rotation.invert() * rotation.into();
        }
    }

    /// Gets rotation of the transform in local space.
    #[inline]
    pub fn local_rotation(&self, ent: Entity) -> Option<Quaternion<f32>> {
        self.remap
            .get(&ent)
            .map(|&index| self.local_transforms[index].rotation)
    }

    /// Sets rotation of the transform in local space.
    #[inline]
    pub fn set_local_rotation<T>(&mut self, ent: Entity, rotation: T)
    where
        T: Into<Quaternion<f32>>,
    {
        if let Some(&index) = self.remap.get(&ent) {
            self.local_transforms[index].rotation = rotation.into();
        }
    }
}

impl SceneGraph {
    fn ancestor_scale(&self, ent: Entity) -> f32 {
        self.ancestors(ent)
            .map(|v| self.slot(v))
            .fold(1.0, |acc, rhs| self.local_transforms[rhs].scale * acc)
    }

    /// Get scale of the transform in world space.
    #[inline]
    pub fn scale(&self, ent: Entity) -> Option<f32> {
        self.remap
            .get(&ent)
            .map(|&index| self.ancestor_scale(ent) * self.local_transforms[index].scale)
    }

    /// Sets scale of the transform in world space.
    pub fn set_scale(&mut self, ent: Entity, scale: f32) {
        if let Some(&index) = self.remap.get(&ent) {
            let ancestor_scale = self.ancestor_scale(ent);

            if ancestor_scale.abs() > ::std::f32::EPSILON {
                self.local_transforms[index].scale = scale / ancestor_scale;
            } else {
                self.local_transforms[index].scale = scale;
            }
        }
    }

    /// Gets scale of the transform in local space.
    #[inline]
    pub fn local_scale(&self, ent: Entity) -> Option<f32> {
        self.remap
            .get(&ent)
            .map(|&index| self.local_transforms[index].scale)
    }

    /// Sets scale of the transform in local space.
    #[inline]
    pub fn set_local_scale(&mut self, ent: Entity, scale: f32) {
        if let Some(&index) = self.remap.get(&ent) {
            self.local_transforms[index].scale = scale;
        }
    }
}

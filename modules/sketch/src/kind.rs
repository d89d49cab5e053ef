use airsketch::utils::prelude::FastHashMap;
use airsketch_world::Entity;

/// The role a node plays in a sketch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Cursor,
    /// The throwaway parent of points drawn by an ongoing gesture.
    Scratch,
    Point,
    /// A committed group of points, anchored at their centroid.
    Structure,
    /// The temporary parent of everything grabbed by an ongoing move gesture.
    Holder,
}

#[derive(Debug, Default)]
pub struct NodeKinds {
    kinds: FastHashMap<Entity, NodeKind>,
}

impl NodeKinds {
    pub fn new() -> Self {
        NodeKinds::default()
    }

    #[inline]
    pub fn insert(&mut self, ent: Entity, kind: NodeKind) {
        self.kinds.insert(ent, kind);
    }

    #[inline]
    pub fn get(&self, ent: Entity) -> Option<NodeKind> {
        self.kinds.get(&ent).cloned()
    }

    #[inline]
    pub fn is(&self, ent: Entity, kind: NodeKind) -> bool {
        self.get(ent) == Some(kind)
    }

    #[inline]
    pub fn remove(&mut self, ent: Entity) -> Option<NodeKind> {
        self.kinds.remove(&ent)
    }

    /// Number of tracked nodes of `kind`.
    pub fn count(&self, kind: NodeKind) -> usize {
        self.kinds.values().filter(|&&v| v == kind).count()
    }
}

use airsketch::utils::hash::FastBuildHasher;
use airsketch_world::Entity;
use indexmap::IndexSet;

/// The set of selected nodes. Membership is toggled by the user, and nodes are kept
/// in the order they were selected.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    nodes: IndexSet<Entity, FastBuildHasher>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Adds `ent` if it is absent, removes it otherwise. Returns true if `ent` is
    /// selected afterwards.
    pub fn toggle(&mut self, ent: Entity) -> bool {
        if self.nodes.shift_remove(&ent) {
            false
        } else {
            self.nodes.insert(ent);
            true
        }
    }

    /// Returns true if `ent` was not selected.
    #[inline]
    pub fn insert(&mut self, ent: Entity) -> bool {
        self.nodes.insert(ent)
    }

    /// Returns true if `ent` was selected.
    #[inline]
    pub fn remove(&mut self, ent: Entity) -> bool {
        self.nodes.shift_remove(&ent)
    }

    #[inline]
    pub fn contains(&self, ent: Entity) -> bool {
        self.nodes.contains(&ent)
    }

    #[inline]
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = Entity> + 'a {
        self.nodes.iter().cloned()
    }

    /// Snapshot of the members, which stays valid while the selection changes.
    #[inline]
    pub fn to_vec(&self) -> Vec<Entity> {
        self.iter().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

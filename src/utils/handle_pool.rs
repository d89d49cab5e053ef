use std::cmp::{Ordering, Reverse};
use std::collections::binary_heap::BinaryHeap;
use std::marker::PhantomData;

use super::handle::{HandleIndex, HandleLike};

#[derive(PartialEq, Eq)]
struct FreeIndex(Reverse<HandleIndex>);

impl PartialOrd for FreeIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FreeIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// `HandlePool` manages the manipulations of a `Handle` collection, which are
/// created with a continuous `index` field. It also have the ability to find
/// out the current status of a specified `Handle`.
///
/// A slot is alive while its version is odd. Freed indices are recycled lowest
/// first, with a bumped version so stale handles never alias new ones.
pub struct HandlePool<H: HandleLike> {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<FreeIndex>,
    _phantom: PhantomData<H>,
}

impl<H: HandleLike> Default for HandlePool<H> {
    fn default() -> Self {
        HandlePool::new()
    }
}

impl<H: HandleLike> HandlePool<H> {
    /// Constructs a new, empty `HandlePool`.
    pub fn new() -> Self {
        HandlePool {
            versions: Vec::new(),
            frees: BinaryHeap::new(),
            _phantom: PhantomData,
        }
    }

    /// Creates a unused `Handle`.
    pub fn create(&mut self) -> H {
        if let Some(FreeIndex(Reverse(index))) = self.frees.pop() {
            let version = &mut self.versions[index as usize];
            *version += 1;
            H::new(index, *version)
        } else {
            self.versions.push(1);
            H::new(self.versions.len() as HandleIndex - 1, 1)
        }
    }

    /// Returns true if this `Handle` was created by `HandlePool`, and has not been
    /// freed yet.
    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        let index = handle.index() as usize;
        self.is_alive_at(index) && self.versions[index] == handle.version()
    }

    #[inline]
    fn is_alive_at(&self, index: usize) -> bool {
        index < self.versions.len() && (self.versions[index] & 0x1) == 1
    }

    /// Recycles the `Handle` index, and mark its version as dead.
    pub fn free(&mut self, handle: H) -> bool {
        if !self.contains(handle) {
            return false;
        }

        self.versions[handle.index() as usize] += 1;
        self.frees.push(FreeIndex(Reverse(handle.index())));
        true
    }

    /// Returns the total number of alive handle in this `HandlePool`.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    /// Returns true if there is no alive handle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the alive handles, in index order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = H> + 'a {
        self.versions
            .iter()
            .enumerate()
            .filter(|(_, v)| *v & 0x1 == 1)
            .map(|(i, v)| H::new(i as HandleIndex, *v))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::handle::Handle;

    #[test]
    fn basic() {
        let mut set = HandlePool::<Handle>::new();
        let e1 = set.create();
        assert!(set.contains(e1));
        assert_eq!(set.len(), 1);

        let mut e2 = e1;
        assert!(set.contains(e2));
        assert_eq!(set.len(), 1);

        assert!(set.free(e1));
        assert!(!set.contains(e1));
        assert!(!set.contains(e2));
        assert_eq!(set.len(), 0);
        assert!(!set.free(e2));

        e2 = set.create();
        assert_eq!(e2.index(), e1.index());
        assert!(e2.version() > e1.version());
        assert!(!set.contains(e1));
    }

    #[test]
    fn recycles_lowest_index_first() {
        let mut set = HandlePool::<Handle>::new();
        let v: Vec<_> = (0..4).map(|_| set.create()).collect();

        set.free(v[3]);
        set.free(v[1]);
        assert_eq!(set.create().index(), 1);
        assert_eq!(set.create().index(), 3);
        assert_eq!(set.create().index(), 4);
    }

    #[test]
    fn iter() {
        let mut set = HandlePool::<Handle>::new();
        let v: Vec<_> = (0..5).map(|_| set.create()).collect();
        set.free(v[0]);
        set.free(v[3]);

        let alive: Vec<_> = set.iter().collect();
        assert_eq!(alive, vec![v[1], v[2], v[4]]);
    }
}

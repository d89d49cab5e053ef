use airsketch::utils::prelude::FastHashMap;

use crate::Entity;

/// Dense storage of one kind of component, indexed by `Entity`.
pub struct Component<T> {
    remap: FastHashMap<Entity, usize>,
    entities: Vec<Entity>,
    data: Vec<T>,
}

impl<T> Default for Component<T> {
    fn default() -> Self {
        Component::new()
    }
}

impl<T> Component<T> {
    /// Creates a new and empty storage for components.
    #[inline]
    pub fn new() -> Self {
        Component {
            remap: FastHashMap::default(),
            entities: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Adds a value to this storage, replacing the existing value, if any. Returns
    /// the replaced value.
    pub fn add(&mut self, ent: Entity, v: T) -> Option<T> {
        if let Some(&index) = self.remap.get(&ent) {
            Some(::std::mem::replace(&mut self.data[index], v))
        } else {
            self.remap.insert(ent, self.data.len());
            self.entities.push(ent);
            self.data.push(v);
            None
        }
    }

    /// Returns true if the storage contains a value.
    #[inline]
    pub fn contains(&self, ent: Entity) -> bool {
        self.remap.contains_key(&ent)
    }

    /// Removes and returns the value in the storage, if any.
    pub fn remove(&mut self, ent: Entity) -> Option<T> {
        let index = self.remap.remove(&ent)?;

        self.entities.swap_remove(index);
        let v = self.data.swap_remove(index);

        if index < self.entities.len() {
            self.remap.insert(self.entities[index], index);
        }

        Some(v)
    }

    #[inline]
    pub fn get(&self, ent: Entity) -> Option<&T> {
        self.remap.get(&ent).map(|&index| &self.data[index])
    }

    #[inline]
    pub fn get_mut(&mut self, ent: Entity) -> Option<&mut T> {
        let data = &mut self.data;
        self.remap.get(&ent).map(move |&index| &mut data[index])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over `(Entity, &T)` pairs in storage order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (Entity, &'a T)> + 'a {
        self.entities.iter().cloned().zip(self.data.iter())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use airsketch::utils::prelude::HandleLike;

    #[test]
    fn swap_remove_keeps_remap() {
        let e1 = Entity::new(0, 1);
        let e2 = Entity::new(1, 1);
        let e3 = Entity::new(2, 1);

        let mut c = Component::new();
        c.add(e1, 1);
        c.add(e2, 2);
        c.add(e3, 3);
        assert_eq!(c.add(e2, 20), Some(2));

        assert_eq!(c.remove(e1), Some(1));
        assert_eq!(c.get(e3), Some(&3));
        assert_eq!(c.get(e2), Some(&20));
        assert!(!c.contains(e1));
        assert_eq!(c.len(), 2);

        assert_eq!(c.remove(e3), Some(3));
        assert_eq!(c.remove(e3), None);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![(e2, &20)]);
    }
}
